//! Shader programs as seen by the scene graph.
//!
//! Compiling, binding and drawing belong to the render backend, which plugs in
//! through [`ShaderBackend`]. Materials only write named uniforms, bind their
//! textures and hand over to the backend once per frame.

use cgmath::{Matrix4, Vector3, Vector4};
use slotmap::new_key_type;

use crate::{
    data_structures::{color::Color, texture::Texture},
    resources::storage::KeyedStorage,
};

new_key_type! {
    /// Stable reference to a shader in the [`ShaderStorage`].
    pub struct ShaderHandle;
}

/// Uniform names shared between the uniform callbacks and the shader sources.
pub mod uniform_name {
    pub const MODEL: &str = "model";
    pub const VIEW_POSITION: &str = "viewPos";

    pub const OBJECT_COLOR: &str = "material.objectColor";
    pub const AMBIENT: &str = "material.ambient";
    pub const DIFFUSE: &str = "material.diffuse";
    pub const SPECULAR: &str = "material.specular";
    pub const SHININESS: &str = "material.shininess";

    pub const POINT_LIGHTS_COUNT: &str = "pointLightsCount";

    /// `pointLights[index].field`
    pub fn point_light(index: usize, field: &str) -> String {
        format!("pointLights[{index}].{field}")
    }
}

/// A value that can be written into a uniform slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec3(Vector3<f32>),
    Vec4(Vector4<f32>),
    Mat4(Matrix4<f32>),
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        UniformValue::Int(value)
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        UniformValue::Float(value)
    }
}

impl From<Vector3<f32>> for UniformValue {
    fn from(value: Vector3<f32>) -> Self {
        UniformValue::Vec3(value)
    }
}

impl From<Vector4<f32>> for UniformValue {
    fn from(value: Vector4<f32>) -> Self {
        UniformValue::Vec4(value)
    }
}

impl From<Matrix4<f32>> for UniformValue {
    fn from(value: Matrix4<f32>) -> Self {
        UniformValue::Mat4(value)
    }
}

impl From<Color> for UniformValue {
    fn from(color: Color) -> Self {
        UniformValue::Vec4(color.to_vec4())
    }
}

/// The compiled program behind a material.
pub trait ShaderBackend {
    fn set_uniform(&mut self, name: &str, value: UniformValue);

    fn bind_texture(&mut self, unit: u32, texture: &Texture) {
        log::trace!("bind {} to unit {unit}", texture.path().display());
    }

    /// Activate the program and issue its draw work for this frame.
    fn processing(&mut self);
}

/// Compiled shaders, memoized by name.
#[derive(Default)]
pub struct ShaderStorage {
    shaders: KeyedStorage<String, ShaderHandle, Box<dyn ShaderBackend>>,
}

impl ShaderStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shader registered under `name`, creating it with `build`
    /// on first request.
    pub fn get_or_insert_with(
        &mut self,
        name: &str,
        build: impl FnOnce() -> Box<dyn ShaderBackend>,
    ) -> ShaderHandle {
        let result = self
            .shaders
            .get_or_try_insert_with::<str, std::convert::Infallible>(name, || Ok(build()));
        match result {
            Ok((handle, created)) => {
                if created {
                    log::debug!("registered shader {name}");
                }
                handle
            }
            Err(never) => match never {},
        }
    }

    pub fn handle(&self, name: &str) -> Option<ShaderHandle> {
        self.shaders.handle(name)
    }

    pub fn get_mut(&mut self, handle: ShaderHandle) -> Option<&mut (dyn ShaderBackend + 'static)> {
        self.shaders.get_mut(handle).map(|shader| &mut **shader)
    }

    pub fn contains(&self, handle: ShaderHandle) -> bool {
        self.shaders.contains(handle)
    }

    pub fn release(&mut self, handle: ShaderHandle) -> Option<Box<dyn ShaderBackend>> {
        self.shaders.release(handle)
    }

    pub fn len(&self) -> usize {
        self.shaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shaders.is_empty()
    }
}
