//! Local and global transforms of scene nodes.
//!
//! A [`Transform`] is the authored position/rotation/scale of a node relative
//! to its parent. The [`Transformable`] component pairs it with the matrix the
//! structural parent pushed down during the current traversal; the global
//! transform is derived from both on every query.

use cgmath::{Matrix4, One, SquareMatrix};

/// Position, rotation (as quaternion) and scale relative to the parent node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: cgmath::Vector3<f32>,
    pub rotation: cgmath::Quaternion<f32>,
    pub scale: cgmath::Vector3<f32>,
}

impl Transform {
    /// Identity transformation (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            position: cgmath::Vector3::new(0.0, 0.0, 0.0),
            // `Quaternion::one()` is the identity quaternion (no rotation)
            rotation: cgmath::Quaternion::one(),
            scale: cgmath::Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn from_translation(x: f32, y: f32, z: f32) -> Self {
        cgmath::Vector3::new(x, y, z).into()
    }

    pub fn with_rotation(mut self, rotation: cgmath::Quaternion<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = cgmath::Vector3::new(x, y, z);
        self
    }

    /// Translation * rotation * scale.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from(self.rotation)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

impl From<cgmath::Vector3<f32>> for Transform {
    fn from(position: cgmath::Vector3<f32>) -> Self {
        Transform {
            position,
            ..Default::default()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// Transform component attached to every node of the scene graph.
///
/// `set_parent_transform` is called by the node's structural parent strictly
/// before the node is processed. Nodes that nobody parents keep the identity.
#[derive(Clone, Debug, PartialEq)]
pub struct Transformable {
    local: Transform,
    parent: Matrix4<f32>,
}

impl Transformable {
    pub fn new(local: Transform) -> Self {
        Self {
            local,
            parent: Matrix4::identity(),
        }
    }

    pub fn local_transform(&self) -> &Transform {
        &self.local
    }

    pub fn local_transform_mut(&mut self) -> &mut Transform {
        &mut self.local
    }

    pub fn set_local_transform(&mut self, local: Transform) {
        self.local = local;
    }

    pub fn parent_transform(&self) -> Matrix4<f32> {
        self.parent
    }

    pub fn set_parent_transform(&mut self, parent: Matrix4<f32>) {
        self.parent = parent;
    }

    /// `parent ∘ local`, recomputed on every call since the parent may have
    /// moved since the last frame.
    pub fn global_transform(&self) -> Matrix4<f32> {
        self.parent * self.local.to_matrix()
    }
}

impl Default for Transformable {
    fn default() -> Self {
        Self::new(Transform::default())
    }
}
