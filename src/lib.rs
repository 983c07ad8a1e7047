//! space-ngin
//!
//! The scene-graph and render-resource core of a small real-time 3D engine.
//! A [`Space`](data_structures::space::Space) holds scenes, scenes hold nodes,
//! and once per frame the whole tree is traversed depth-first: parents push
//! their global transform into children, materials upload their uniforms to a
//! [`ShaderBackend`](resources::shader::ShaderBackend) and bind their
//! textures. The graphics API itself lives behind that trait.
//!
//! High-level modules
//! - `camera`: camera and the mouse-driven controller
//! - `config`: engine configuration and environment overrides
//! - `context`: engine-wide state and the per-frame `FrameContext`
//! - `data_structures`: scene nodes, transforms, colors, textures, collections
//! - `error`: the crate's error type
//! - `flow`: the frame driver
//! - `input`: window input state and observers
//! - `resources`: shader, texture, light and material storages
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod input;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use error::{NginError, Result};
