//! Shared resources referenced by the scene graph.
//!
//! Shaders, textures and point lights live in slot-map arenas and are
//! addressed by handle; materials are owned by [`material::MaterialStorage`]
//! and referenced weakly. Nothing here is freed implicitly.

pub mod light;
pub mod material;
pub mod shader;
pub mod storage;
pub mod texture;
