//! Engine data structures: the scene graph and the values it carries.
//!
//! - `collection` is the ordered container every aggregate is built on
//! - `transform` holds local transforms and the parent/global composition
//! - `scene_graph` defines the per-frame `Process` contract and `SceneNode`
//! - `object`, `light`, `material`, `scene` and `space` are the node types
//! - `color` and `texture` are plain values referenced by materials

pub mod collection;
pub mod color;
pub mod light;
pub mod material;
pub mod object;
pub mod scene;
pub mod scene_graph;
pub mod space;
pub mod texture;
pub mod transform;
