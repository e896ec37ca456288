//! unit tag and aliases for the 3D space nodes live in

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// PhantomData tag used to denote the f32 space in which the scene exists
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct WorldSpace;

/// WorldSpace Point
pub type WSPoint = euclid::Point3D<f32, WorldSpace>;
/// WorldSpace Vector
pub type WSVec = euclid::Vector3D<f32, WorldSpace>;
/// WorldSpace Box
pub type WSBox = euclid::Box3D<f32, WorldSpace>;
