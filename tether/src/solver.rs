//! distance constraint between a node and its predecessor

use crate::chain::Chain;
use crate::space::WSPoint;

/// maximum separation between adjacent nodes, in world units
pub const D_MAX: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConstraintError {
    /// the zero-distance policy needs a strictly positive radius
    #[error("max distance must be finite and greater than zero, got {0}")]
    InvalidMaxDistance(f32),
}

/// outcome of constraining one proposed position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correction {
    /// the accepted position, written back into the node
    pub position: WSPoint,
    /// position the node is tethered to. the origin for the head of the chain
    pub anchor: WSPoint,
    /// true if the proposed position was moved onto the constraint sphere
    pub clamped: bool,
}

/// keeps dragged nodes within `max_distance` of their predecessor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solver {
    max_distance: f32,
}

impl Default for Solver {
    fn default() -> Self {
        Solver {
            max_distance: D_MAX,
        }
    }
}

impl Solver {
    pub fn new(max_distance: f32) -> Result<Self, ConstraintError> {
        if max_distance.is_finite() && max_distance > 0.0 {
            Ok(Solver { max_distance })
        } else {
            Err(ConstraintError::InvalidMaxDistance(max_distance))
        }
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// project `proposed` onto the sphere of radius `max_distance` around `anchor` if it lies outside.
    /// returns the accepted point and whether it was moved.
    pub fn clamp(&self, proposed: WSPoint, anchor: WSPoint) -> (WSPoint, bool) {
        let v = proposed - anchor;
        let distance = v.length();
        // coincident points are inside any positive radius, no division happens
        if distance <= self.max_distance {
            return (proposed, false);
        }
        (anchor + v * (self.max_distance / distance), true)
    }

    /// constrain `proposed` for the node at `index` and write the result into its live position.
    /// returns none if the chain has no such node.
    pub fn apply(&self, chain: &Chain, index: usize, proposed: WSPoint) -> Option<Correction> {
        let node = chain.get(index)?;
        let correction = match chain.predecessor_position(index) {
            Some(anchor) => {
                let (position, clamped) = self.clamp(proposed, anchor);
                Correction {
                    position,
                    anchor,
                    clamped,
                }
            }
            None => Correction {
                position: proposed,
                anchor: WSPoint::origin(),
                clamped: false,
            },
        };
        if correction.clamped {
            log::trace!(
                "node {} clamped to ({:.3}, {:.3}, {:.3})",
                index,
                correction.position.x,
                correction.position.y,
                correction.position.z
            );
        }
        node.position().set(correction.position);
        Some(correction)
    }
}
