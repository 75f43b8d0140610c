//! wgpu render backend for the prism demo.
//!
//! Thin glue over the graphics API: matrices come from `prism-core`,
//! geometry and light/material data from `prism-scene`.
//!
//! # Invariants
//! - The renderer never mutates camera or scene state.
//! - Uniform slots are resolved once at pipeline creation, never looked up
//!   by name at draw time.
//! - The camera's GL-style depth range is remapped to wgpu's [0, 1] at
//!   upload time; the camera's own matrices are never touched.

mod context;
mod gpu;
mod shaders;

pub use context::{GpuContext, GpuError};
pub use gpu::{MeshId, WgpuRenderer, MAX_LIGHTS};
