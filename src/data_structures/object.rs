use std::{cell::RefCell, rc::Weak};

use crate::{
    context::FrameContext,
    data_structures::{
        material::Material,
        scene_graph::{Process, SceneNode},
        transform::{Transform, Transformable},
    },
};

/// Base scene node: a transform and at most one material.
///
/// The material is borrowed from [`MaterialStorage`](crate::resources::material::MaterialStorage);
/// once it is released there the object renders nothing and logs a warning.
pub struct Object {
    transformable: Transformable,
    material: Option<Weak<RefCell<Material>>>,
}

impl Object {
    pub fn new(local: Transform) -> Self {
        Self {
            transformable: Transformable::new(local),
            material: None,
        }
    }

    pub fn with_material(local: Transform, material: Weak<RefCell<Material>>) -> Self {
        Self {
            transformable: Transformable::new(local),
            material: Some(material),
        }
    }

    pub fn material(&self) -> Option<&Weak<RefCell<Material>>> {
        self.material.as_ref()
    }

    pub fn set_material(&mut self, material: Option<Weak<RefCell<Material>>>) {
        self.material = material;
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new(Transform::default())
    }
}

impl Process for Object {
    fn processing(&mut self, ctx: &mut FrameContext<'_>) {
        let Some(material) = &self.material else {
            return;
        };
        let Some(material) = material.upgrade() else {
            log::warn!("object refers to a released material, skipping it");
            return;
        };
        let Ok(mut material) = material.try_borrow_mut() else {
            log::warn!("material is already being processed, skipping it");
            return;
        };
        material.set_parent_transform(self.global_transform());
        material.processing(ctx);
    }
}

impl SceneNode for Object {
    fn transformable(&self) -> &Transformable {
        &self.transformable
    }

    fn transformable_mut(&mut self) -> &mut Transformable {
        &mut self.transformable
    }
}
