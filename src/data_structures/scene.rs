use std::{cell::RefCell, rc::Rc};

use crate::{
    context::FrameContext,
    data_structures::{
        collection::CollectionOfShared,
        scene_graph::{Process, SceneNode},
        transform::{Transform, Transformable},
    },
};

/// A group of nodes sharing one parent transform.
///
/// Nodes are shared: the same node may sit in several scenes and is then
/// processed once per occurrence, each time with that scene's transform.
pub struct Scene {
    transformable: Transformable,
    objects: CollectionOfShared<dyn SceneNode>,
}

impl Scene {
    pub fn new(local: Transform) -> Self {
        Self {
            transformable: Transformable::new(local),
            objects: CollectionOfShared::new(),
        }
    }

    pub fn add_object<N: SceneNode + 'static>(&mut self, node: Rc<RefCell<N>>) {
        let node: Rc<RefCell<dyn SceneNode>> = node;
        self.objects.add(node);
    }

    pub fn objects(&self) -> &CollectionOfShared<dyn SceneNode> {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut CollectionOfShared<dyn SceneNode> {
        &mut self.objects
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Transform::default())
    }
}

impl Process for Scene {
    fn processing(&mut self, ctx: &mut FrameContext<'_>) {
        let global = self.global_transform();
        for node in self.objects.iter() {
            let Ok(mut node) = node.try_borrow_mut() else {
                log::warn!("scene node is already being processed, skipping it");
                continue;
            };
            node.set_parent_transform(global);
            node.processing(ctx);
        }
    }
}

impl SceneNode for Scene {
    fn transformable(&self) -> &Transformable {
        &self.transformable
    }

    fn transformable_mut(&mut self) -> &mut Transformable {
        &mut self.transformable
    }
}
