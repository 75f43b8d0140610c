//! Scene building blocks: procedural meshes, lights, materials.
//!
//! # Invariants
//! - Mesh index buffers hold triangle strips separated by
//!   [`PRIMITIVE_RESTART`]; every other index is a valid vertex index.
//! - Light and material parameters are a fixed, typed field set; shader
//!   slots for them are resolved once at pipeline creation, never looked up
//!   by name at runtime.

pub mod lighting;
pub mod mesh;

pub use lighting::{Light, Material};
pub use mesh::{MeshData, PRIMITIVE_RESTART};
