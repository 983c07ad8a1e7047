//! Scene graph and the per-frame processing contract.
//!
//! Every node combines two orthogonal capabilities:
//!
//! - a [`Transformable`] component holding its local transform and the parent
//!   transform pushed down during traversal;
//! - the [`Process`] behavior, which advances the node by exactly one frame.
//!
//! Composite nodes ([`Scene`](super::scene::Scene),
//! [`Space`](super::space::Space)) push their global transform into every
//! child and then process it, in insertion order. Traversal is depth-first
//! and pre-order: a parent is fully updated before any child starts.

use cgmath::Matrix4;

use crate::{
    context::FrameContext,
    data_structures::transform::{Transform, Transformable},
};

/// Something that can advance one logical frame step.
pub trait Process {
    fn processing(&mut self, ctx: &mut FrameContext<'_>);
}

pub trait SceneNode: Process {
    fn transformable(&self) -> &Transformable;

    fn transformable_mut(&mut self) -> &mut Transformable;

    /// Called by the structural parent right before [`Process::processing`].
    fn set_parent_transform(&mut self, parent: Matrix4<f32>) {
        self.transformable_mut().set_parent_transform(parent);
    }

    fn global_transform(&self) -> Matrix4<f32> {
        self.transformable().global_transform()
    }

    fn local_transform(&self) -> Transform {
        *self.transformable().local_transform()
    }

    fn set_local_transform(&mut self, local: Transform) {
        self.transformable_mut().set_local_transform(local);
    }
}
