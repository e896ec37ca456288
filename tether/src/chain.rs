//! the chain store - ordered shape nodes, insertion order is link order

use std::{cell::RefCell, fmt, rc::Rc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::space::{WSBox, WSPoint};

/// kind of shape a node displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ShapeKind {
    Pyramid,
    Digit,
}

impl ShapeKind {
    /// every kind the editor can add
    pub const ALL: [ShapeKind; 2] = [ShapeKind::Pyramid, ShapeKind::Digit];
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Pyramid => write!(f, "pyramid"),
            ShapeKind::Digit => write!(f, "digit"),
        }
    }
}

/// newtype wrapper for `Rc<RefCell<WSPoint>>`
///
/// the live position of a node. Clones share the same position.
#[derive(Debug, Clone, Default)]
pub struct RcRPosition(pub Rc<RefCell<WSPoint>>);

impl RcRPosition {
    pub fn new(wsp: WSPoint) -> Self {
        Self(Rc::new(RefCell::new(wsp)))
    }
    /// read the current position
    pub fn get(&self) -> WSPoint {
        *self.0.borrow()
    }
    /// overwrite the current position
    pub fn set(&self, wsp: WSPoint) {
        *self.0.borrow_mut() = wsp;
    }
    /// true if both handles point at the same position
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// one shape instance in the chain
#[derive(Debug, Clone)]
pub struct Node {
    kind: ShapeKind,
    /// position in the chain, assigned on append
    index: usize,
    position: RcRPosition,
}

impl Node {
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }
    pub fn index(&self) -> usize {
        self.index
    }
    /// the live position handle of this node
    pub fn position(&self) -> &RcRPosition {
        &self.position
    }
}

/// ordered sequence of nodes. Indices always form the range `0..len`.
#[derive(Debug, Clone, Default)]
pub struct Chain {
    nodes: Vec<Node>,
}

impl Chain {
    pub fn new() -> Self {
        Chain::default()
    }

    /// append a node of `kind` at the world origin, returns its index
    pub fn append(&mut self, kind: ShapeKind) -> usize {
        self.append_at(kind, WSPoint::origin())
    }

    /// append a node of `kind` at `wsp`, returns its index
    pub fn append_at(&mut self, kind: ShapeKind, wsp: WSPoint) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node {
            kind,
            index,
            position: RcRPosition::new(wsp),
        });
        log::debug!("appended {} at index {}", kind, index);
        index
    }

    /// remove every node at or after `index`, returning the removed nodes.
    /// an index past the end removes nothing.
    pub fn truncate_from(&mut self, index: usize) -> Vec<Node> {
        if index >= self.nodes.len() {
            return vec![];
        }
        let removed = self.nodes.split_off(index);
        log::debug!(
            "truncated chain at {}, removed {} node(s)",
            index,
            removed.len()
        );
        removed
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<Node> {
        self.nodes.iter()
    }

    /// current position of the node at `index`
    pub fn position(&self, index: usize) -> Option<WSPoint> {
        self.nodes.get(index).map(|n| n.position.get())
    }

    /// current position of the node before `index`, none for the head of the chain
    pub fn predecessor_position(&self, index: usize) -> Option<WSPoint> {
        index.checked_sub(1).and_then(|i| self.position(i))
    }

    pub fn kinds(&self) -> Vec<ShapeKind> {
        self.nodes.iter().map(|n| n.kind).collect()
    }

    /// smallest box containing every node position
    pub fn bounding_box(&self) -> WSBox {
        WSBox::from_points(self.nodes.iter().map(|n| n.position.get()))
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_assigns_contiguous_indices() {
        let mut chain = Chain::new();
        for i in 0..4 {
            assert_eq!(chain.append(ShapeKind::Digit), i);
        }
        assert_eq!(chain.len(), 4);
        let indices: Vec<usize> = chain.iter().map(|n| n.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn truncate_out_of_range_is_noop() {
        let mut chain = Chain::new();
        chain.append(ShapeKind::Pyramid);
        chain.append(ShapeKind::Digit);
        assert!(chain.truncate_from(2).is_empty());
        assert!(chain.truncate_from(17).is_empty());
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn truncate_then_append_reuses_freed_index() {
        let mut chain = Chain::new();
        chain.append(ShapeKind::Pyramid);
        chain.append(ShapeKind::Digit);
        chain.append(ShapeKind::Digit);
        chain.truncate_from(1);
        assert_eq!(chain.append(ShapeKind::Pyramid), 1);
        assert_eq!(
            chain.kinds(),
            vec![ShapeKind::Pyramid, ShapeKind::Pyramid]
        );
    }

    #[test]
    fn position_handles_are_shared() {
        let mut chain = Chain::new();
        chain.append(ShapeKind::Pyramid);
        let handle = chain.get(0).unwrap().position().clone();
        handle.set(WSPoint::new(1.0, 2.0, 3.0));
        assert_eq!(chain.position(0), Some(WSPoint::new(1.0, 2.0, 3.0)));
        assert!(handle.ptr_eq(chain.get(0).unwrap().position()));
    }

    #[test]
    fn head_has_no_predecessor() {
        let mut chain = Chain::new();
        chain.append_at(ShapeKind::Pyramid, WSPoint::new(1.0, 0.0, 0.0));
        chain.append(ShapeKind::Digit);
        assert_eq!(chain.predecessor_position(0), None);
        assert_eq!(
            chain.predecessor_position(1),
            Some(WSPoint::new(1.0, 0.0, 0.0))
        );
        assert_eq!(chain.predecessor_position(5), None);
    }
}
