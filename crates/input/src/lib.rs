//! Input layer: keyboard events mapped to shared camera actions.
//!
//! # Invariants
//! - The camera consumes actions, never raw key events.
//! - Action steps are unit magnitudes; speed and frame-time scaling is the
//!   application's job.

pub mod action;

pub use action::Action;
