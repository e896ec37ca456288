//! General Notes
//!
//! tether keeps a chain of shape nodes linked head to tail.
//! Each node after the first is held within a maximum distance of its predecessor while it is dragged.
//! Links are never stored: they are derived from live node positions whenever they are needed.
//!
//! Rendering, picking and the camera live with the caller. This crate only owns topology, positions and
//! the lifetime of drag subscriptions.

pub mod binding;
pub mod chain;
pub mod links;
pub mod solver;
pub mod space;

pub use binding::{DragBinding, DragBindings};
pub use chain::{Chain, Node, RcRPosition, ShapeKind};
pub use links::{Link, LiveEndpoints};
pub use solver::{ConstraintError, Correction, Solver, D_MAX};
pub use space::{WSBox, WSPoint, WSVec, WorldSpace};
