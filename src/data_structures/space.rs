use std::{cell::RefCell, rc::Rc};

use cgmath::{Matrix4, Vector4};

use crate::{
    context::FrameContext,
    data_structures::{
        collection::CollectionOfShared,
        scene::Scene,
        scene_graph::{Process, SceneNode},
    },
};

/// Root of the scene graph.
///
/// Pushes the identity model matrix into each of its scenes and processes
/// them in insertion order. Frames are skipped entirely while the window is
/// not focused. `S` is [`Scene`] unless a scene type wraps it.
pub struct Space<S: ?Sized = Scene> {
    scenes: CollectionOfShared<S>,
}

impl Space {
    /// Identity; the space itself never moves.
    pub const MODEL: Matrix4<f32> = Matrix4 {
        x: Vector4 { x: 1.0, y: 0.0, z: 0.0, w: 0.0 },
        y: Vector4 { x: 0.0, y: 1.0, z: 0.0, w: 0.0 },
        z: Vector4 { x: 0.0, y: 0.0, z: 1.0, w: 0.0 },
        w: Vector4 { x: 0.0, y: 0.0, z: 0.0, w: 1.0 },
    };

    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: ?Sized> Space<S> {
    pub fn add_scene(&mut self, scene: Rc<RefCell<S>>) {
        self.scenes.add(scene);
    }

    pub fn scenes(&self) -> &CollectionOfShared<S> {
        &self.scenes
    }

    pub fn scenes_mut(&mut self) -> &mut CollectionOfShared<S> {
        &mut self.scenes
    }
}

impl<S: ?Sized> Default for Space<S> {
    fn default() -> Self {
        Self {
            scenes: CollectionOfShared::new(),
        }
    }
}

impl<S: SceneNode + ?Sized> Process for Space<S> {
    fn processing(&mut self, ctx: &mut FrameContext<'_>) {
        if !ctx.input.is_focused() {
            return;
        }
        ctx.lights.begin_frame();
        for scene in self.scenes.iter() {
            let Ok(mut scene) = scene.try_borrow_mut() else {
                log::warn!("scene is already being processed, skipping it");
                continue;
            };
            scene.set_parent_transform(<Space>::MODEL);
            scene.processing(ctx);
        }
    }
}
