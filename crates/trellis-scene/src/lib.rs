//! Scene-graph data model for the Trellis markup compiler.
//!
//! This crate defines the node tree consumed by the code generators:
//! - Node types with a tagged kind per shape (frames, groups, text, ...)
//! - Paint, gradient and effect types
//! - JSON ingestion from design-tool exports

pub mod json;
pub mod node;
pub mod paint;

pub use json::{parse_scene, SceneError};
pub use node::*;
pub use paint::*;
