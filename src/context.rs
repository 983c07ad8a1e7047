//! Engine-wide state and the per-frame view handed to the scene graph.
//!
//! [`Context`] owns everything that used to be looked up through a global
//! registry: configuration, input, camera, and the shader, texture, light and
//! material storages. Every frame it lends the parts the scene graph needs as
//! a [`FrameContext`].

use anyhow::Context as _;

use crate::{
    camera::{Camera, CameraController},
    config::EngineConfig,
    data_structures::{
        scene_graph::{Process, SceneNode},
        space::Space,
    },
    input::Input,
    resources::{
        light::LightStorage, material::MaterialStorage, shader::ShaderStorage,
        texture::TextureStorage,
    },
};

/// Borrowed view of the [`Context`] for one traversal.
pub struct FrameContext<'a> {
    pub config: &'a EngineConfig,
    pub input: &'a Input,
    pub camera: &'a Camera,
    pub lights: &'a mut LightStorage,
    pub shaders: &'a mut ShaderStorage,
    pub textures: &'a TextureStorage,
}

pub struct Context {
    pub config: EngineConfig,
    pub input: Input,
    pub controller: CameraController,
    pub lights: LightStorage,
    pub shaders: ShaderStorage,
    pub textures: TextureStorage,
    pub materials: MaterialStorage,
    frame: u64,
}

impl Context {
    /// Fails if the configured default texture cannot be loaded.
    pub fn new(config: EngineConfig) -> anyhow::Result<Self> {
        let textures = TextureStorage::new(&config).with_context(|| {
            format!(
                "failed to load default texture {}",
                config.default_texture_path.display()
            )
        })?;
        log::info!(
            "context ready: default texture {}, {} point lights max",
            textures.default_texture_path().display(),
            config.max_point_lights
        );

        Ok(Self {
            config,
            input: Input::new(),
            controller: CameraController::default(),
            lights: LightStorage::new(),
            shaders: ShaderStorage::new(),
            textures,
            materials: MaterialStorage::new(),
            frame: 0,
        })
    }

    pub fn camera(&self) -> &Camera {
        self.controller.camera()
    }

    /// Number of frames ticked so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn frame_context(&mut self) -> FrameContext<'_> {
        FrameContext {
            config: &self.config,
            input: &self.input,
            camera: self.controller.camera(),
            lights: &mut self.lights,
            shaders: &mut self.shaders,
            textures: &self.textures,
        }
    }

    /// Advances one frame: input observers first, then the whole space.
    pub fn tick<S: SceneNode + ?Sized>(&mut self, space: &mut Space<S>) {
        self.input.processing(&mut [&mut self.controller]);

        let mut frame = self.frame_context();
        space.processing(&mut frame);

        self.frame += 1;
        log::trace!("frame {} done", self.frame);
    }
}
