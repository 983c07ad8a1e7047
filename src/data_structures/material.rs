//! Materials and the shader-uniform synchronization protocol.
//!
//! A [`Material`] references one shader by handle (several materials may share
//! it) and any number of textures. Processing a material performs, in this
//! order:
//!
//! 1. one-time registration of its uniform callbacks (first frame only),
//! 2. upload of its global transform to the `model` uniform,
//! 3. every uniform callback, in registration order,
//! 4. the shader backend's own processing,
//! 5. binding of its textures.
//!
//! Callbacks never capture the material. Everything they need (base color,
//! Phong terms, camera position, active point lights) is handed to them as
//! [`UniformInputs`], so a callback cannot outlive the state it reads.

use cgmath::Vector3;

use crate::{
    context::FrameContext,
    data_structures::{
        collection::{CollectionOf, CollectionOfBoxed},
        color::Color,
        scene_graph::{Process, SceneNode},
        transform::{Transform, Transformable},
    },
    resources::{
        light::{LightStorage, PointLight},
        shader::{ShaderBackend, ShaderHandle, uniform_name},
        texture::TextureHandle,
    },
};

/// Phong reflection terms of a material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhongParams {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub shininess: f32,
}

impl Default for PhongParams {
    fn default() -> Self {
        Self {
            ambient: Vector3::new(0.1, 0.1, 0.1),
            diffuse: Vector3::new(1.0, 1.0, 1.0),
            specular: Vector3::new(0.5, 0.5, 0.5),
            shininess: 32.0,
        }
    }
}

/// Per-frame state a uniform callback may read.
pub struct UniformInputs<'a> {
    pub color: Color,
    pub phong: &'a PhongParams,
    pub camera_position: Vector3<f32>,
    pub lights: &'a LightStorage,
    pub max_point_lights: usize,
}

impl UniformInputs<'_> {
    /// Point lights to upload, capped at `max_point_lights`.
    pub fn active_lights(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.active(self.max_point_lights)
    }
}

pub type UniformCallback = dyn FnMut(&UniformInputs<'_>, &mut dyn ShaderBackend);
pub type UniformCallbacks = CollectionOfBoxed<UniformCallback>;

/// Box a closure as a [`UniformCallback`].
pub fn uniform_callback(
    callback: impl FnMut(&UniformInputs<'_>, &mut dyn ShaderBackend) + 'static,
) -> Box<UniformCallback> {
    Box::new(callback)
}

/// Decides which uniform callbacks a material registers on its first frame.
pub trait UniformSetup {
    fn register(&self, callbacks: &mut UniformCallbacks);
}

/// Standard lighting uniforms: material terms, point lights and camera.
#[derive(Clone, Copy, Debug, Default)]
pub struct PhongUniforms;

impl UniformSetup for PhongUniforms {
    fn register(&self, callbacks: &mut UniformCallbacks) {
        callbacks.add(uniform_callback(|inputs, shader| {
            shader.set_uniform(uniform_name::OBJECT_COLOR, inputs.color.into());
            shader.set_uniform(uniform_name::AMBIENT, inputs.phong.ambient.into());
            shader.set_uniform(uniform_name::DIFFUSE, inputs.phong.diffuse.into());
            shader.set_uniform(uniform_name::SPECULAR, inputs.phong.specular.into());
            shader.set_uniform(uniform_name::SHININESS, inputs.phong.shininess.into());
        }));
        callbacks.add(uniform_callback(|inputs, shader| {
            let mut count: i32 = 0;
            for (i, light) in inputs.active_lights().enumerate() {
                shader.set_uniform(&uniform_name::point_light(i, "position"), light.position.into());
                shader.set_uniform(&uniform_name::point_light(i, "ambient"), light.ambient.into());
                shader.set_uniform(&uniform_name::point_light(i, "diffuse"), light.diffuse.into());
                shader.set_uniform(&uniform_name::point_light(i, "specular"), light.specular.into());
                count += 1;
            }
            shader.set_uniform(uniform_name::POINT_LIGHTS_COUNT, count.into());
        }));
        callbacks.add(uniform_callback(|inputs, shader| {
            shader.set_uniform(uniform_name::VIEW_POSITION, inputs.camera_position.into());
        }));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UniformState {
    Unregistered,
    Registered,
}

pub struct Material {
    transformable: Transformable,
    shader: ShaderHandle,
    textures: Vec<TextureHandle>,
    color: Color,
    phong: PhongParams,
    setup: Box<dyn UniformSetup>,
    callbacks: UniformCallbacks,
    state: UniformState,
}

impl Material {
    pub fn new(shader: ShaderHandle) -> Self {
        Self::with_setup(shader, PhongUniforms)
    }

    pub fn with_setup(shader: ShaderHandle, setup: impl UniformSetup + 'static) -> Self {
        Self {
            transformable: Transformable::new(Transform::default()),
            shader,
            textures: Vec::new(),
            color: Color::WHITE,
            phong: PhongParams::default(),
            setup: Box::new(setup),
            callbacks: CollectionOf::new(),
            state: UniformState::Unregistered,
        }
    }

    pub fn shader(&self) -> ShaderHandle {
        self.shader
    }

    /// Switching shaders keeps the registered callbacks; they only write uniforms by name.
    pub fn set_shader(&mut self, shader: ShaderHandle) {
        self.shader = shader;
    }

    pub fn textures(&self) -> &[TextureHandle] {
        &self.textures
    }

    pub fn add_texture(&mut self, texture: TextureHandle) {
        self.textures.push(texture);
    }

    pub fn remove_texture(&mut self, texture: TextureHandle) -> bool {
        let before = self.textures.len();
        self.textures.retain(|t| *t != texture);
        before != self.textures.len()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn phong(&self) -> &PhongParams {
        &self.phong
    }

    pub fn phong_mut(&mut self) -> &mut PhongParams {
        &mut self.phong
    }

    pub fn uniform_state(&self) -> UniformState {
        self.state
    }

    pub fn uniform_callback_count(&self) -> usize {
        self.callbacks.len()
    }

    fn ensure_uniforms_registered(&mut self) {
        if self.state == UniformState::Registered {
            return;
        }
        self.setup.register(&mut self.callbacks);
        self.state = UniformState::Registered;
        log::debug!("registered {} uniform callbacks", self.callbacks.len());
    }
}

impl Process for Material {
    fn processing(&mut self, ctx: &mut FrameContext<'_>) {
        self.ensure_uniforms_registered();

        let model = self.global_transform();
        let Some(shader) = ctx.shaders.get_mut(self.shader) else {
            log::warn!("material refers to a released shader, skipping it");
            return;
        };
        shader.set_uniform(uniform_name::MODEL, model.into());

        let inputs = UniformInputs {
            color: self.color,
            phong: &self.phong,
            camera_position: ctx.camera.position(),
            lights: &*ctx.lights,
            max_point_lights: ctx.config.max_point_lights,
        };
        for callback in self.callbacks.iter_mut() {
            callback(&inputs, &mut *shader);
        }

        shader.processing();

        for handle in &self.textures {
            match ctx.textures.texture(*handle) {
                Some(texture) => texture.processing(&mut *shader),
                None => log::warn!("material refers to a released texture, skipping it"),
            }
        }
    }
}

impl SceneNode for Material {
    fn transformable(&self) -> &Transformable {
        &self.transformable
    }

    fn transformable_mut(&mut self) -> &mut Transformable {
        &mut self.transformable
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    #[test]
    fn texture_list_keeps_order_and_removes_every_copy() {
        let mut handles: SlotMap<TextureHandle, ()> = SlotMap::with_key();
        let (diffuse, normal) = (handles.insert(()), handles.insert(()));
        let mut material = Material::new(ShaderHandle::default());

        material.add_texture(diffuse);
        material.add_texture(normal);
        material.add_texture(diffuse);
        assert_eq!(material.textures(), &[diffuse, normal, diffuse]);

        assert!(material.remove_texture(diffuse));
        assert_eq!(material.textures(), &[normal]);
        assert!(!material.remove_texture(diffuse));
    }
}
