//! Bubble Swerve (workspace facade crate).
//!
//! Re-exports the workspace crates as `bubble_swerve::{core,input,term,types}` so the
//! binary, benches, and integration tests share one import path.

pub use bubble_swerve_core as core;
pub use bubble_swerve_input as input;
pub use bubble_swerve_term as term;
pub use bubble_swerve_types as types;
