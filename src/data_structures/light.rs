use cgmath::{Matrix4, Vector3};

use crate::{
    context::FrameContext,
    data_structures::{
        color::Color,
        object::Object,
        scene_graph::{Process, SceneNode},
        transform::{Transform, Transformable},
    },
    resources::light::{LightHandle, PointLight},
};

/// An [`Object`] that also emits light.
///
/// Each frame it publishes its world position and color into the frame's
/// light storage. The slot is allocated on the first processed frame.
pub struct Light {
    object: Object,
    color: Color,
    handle: Option<LightHandle>,
}

impl Light {
    pub fn new(local: Transform) -> Self {
        Self::with_color(local, Color::WHITE)
    }

    pub fn with_color(local: Transform, color: Color) -> Self {
        Self {
            object: Object::new(local),
            color,
            handle: None,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn object(&self) -> &Object {
        &self.object
    }

    pub fn object_mut(&mut self) -> &mut Object {
        &mut self.object
    }

    /// `None` until the light has been processed once.
    pub fn handle(&self) -> Option<LightHandle> {
        self.handle
    }

    fn point_light(&self) -> PointLight {
        let world = self.global_transform();
        PointLight::from_color(translation(&world), self.color)
    }
}

fn translation(matrix: &Matrix4<f32>) -> Vector3<f32> {
    matrix.w.truncate()
}

impl Process for Light {
    fn processing(&mut self, ctx: &mut FrameContext<'_>) {
        self.object.processing(ctx);

        let light = self.point_light();
        match self.handle {
            Some(handle) if ctx.lights.update(handle, light) => {}
            _ => {
                let handle = ctx.lights.add(light);
                log::debug!("light published as {handle:?}");
                self.handle = Some(handle);
            }
        }
    }
}

impl SceneNode for Light {
    fn transformable(&self) -> &Transformable {
        self.object.transformable()
    }

    fn transformable_mut(&mut self) -> &mut Transformable {
        self.object.transformable_mut()
    }
}
