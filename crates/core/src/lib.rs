//! Camera and transform math core.
//!
//! # Invariants
//! - A camera's view and projection matrices are always consistent with the
//!   eye/yaw/pitch and frustum state that produced them; every mutator
//!   rebuilds the affected matrix from scratch.
//! - One directed-difference convention (`direction`) and one matrix
//!   convention (column vectors, matrices applied on the left) hold
//!   throughout the crate.

pub mod camera;
pub mod transform;
pub mod vec;

pub use camera::Camera;
pub use transform::ModelTransform;
pub use vec::{direction, unit, WORLD_UP};
