//! links between adjacent nodes, derived from live positions

use crate::chain::Chain;
use crate::space::WSPoint;

/// source of link endpoints
pub trait LiveEndpoints {
    /// number of nodes in the chain, mounted or not
    fn node_count(&self) -> usize;
    /// current position of the node at `index`, none if it cannot be drawn yet
    fn live_position(&self, index: usize) -> Option<WSPoint>;
}

impl LiveEndpoints for Chain {
    fn node_count(&self) -> usize {
        self.len()
    }
    fn live_position(&self, index: usize) -> Option<WSPoint> {
        self.position(index)
    }
}

/// segment between node `src` and node `dst = src + 1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub src: usize,
    pub dst: usize,
    /// endpoint positions at the time the link was derived
    pub pts: (WSPoint, WSPoint),
}

impl Link {
    pub fn length(&self) -> f32 {
        (self.pts.1 - self.pts.0).length()
    }
}

/// derive one link per adjacent pair whose endpoints are both available.
/// pairs with a missing endpoint are skipped.
pub fn derive<E: LiveEndpoints + ?Sized>(endpoints: &E) -> Vec<Link> {
    (1..endpoints.node_count())
        .filter_map(|dst| {
            let src = dst - 1;
            let p0 = endpoints.live_position(src)?;
            let p1 = endpoints.live_position(dst)?;
            Some(Link {
                src,
                dst,
                pts: (p0, p1),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ShapeKind;

    /// three nodes, the middle one not mounted
    struct Gappy;

    impl LiveEndpoints for Gappy {
        fn node_count(&self) -> usize {
            3
        }
        fn live_position(&self, index: usize) -> Option<WSPoint> {
            match index {
                1 => None,
                i => Some(WSPoint::new(i as f32, 0.0, 0.0)),
            }
        }
    }

    #[test]
    fn empty_and_single_chains_have_no_links() {
        let mut chain = Chain::new();
        assert!(derive(&chain).is_empty());
        chain.append(ShapeKind::Digit);
        assert!(derive(&chain).is_empty());
    }

    #[test]
    fn links_connect_consecutive_indices() {
        let mut chain = Chain::new();
        for _ in 0..5 {
            chain.append(ShapeKind::Pyramid);
        }
        let links = derive(&chain);
        assert_eq!(links.len(), 4);
        for (i, l) in links.iter().enumerate() {
            assert_eq!((l.src, l.dst), (i, i + 1));
        }
    }

    #[test]
    fn links_follow_live_positions() {
        let mut chain = Chain::new();
        chain.append(ShapeKind::Pyramid);
        chain.append(ShapeKind::Digit);
        chain
            .get(1)
            .unwrap()
            .position()
            .set(WSPoint::new(0.0, 1.5, 0.0));
        let links = derive(&chain);
        assert_eq!(links[0].pts.1, WSPoint::new(0.0, 1.5, 0.0));
        assert_eq!(links[0].length(), 1.5);
    }

    #[test]
    fn unmounted_endpoint_skips_link() {
        assert!(derive(&Gappy).is_empty());
    }
}
