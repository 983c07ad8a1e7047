#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    path::{Path, PathBuf},
    rc::Rc,
};

use space_ngin::{
    config::EngineConfig,
    context::{Context, FrameContext},
    data_structures::{
        material::{UniformCallbacks, UniformSetup, uniform_callback},
        scene_graph::{Process, SceneNode},
        texture::Texture,
        transform::{Transform, Transformable},
    },
    resources::shader::{ShaderBackend, UniformValue},
    Matrix4,
};

/// Everything a [`RecordingShader`] was asked to do, in call order.
#[derive(Clone, Debug, PartialEq)]
pub enum ShaderCall {
    Uniform(String, UniformValue),
    Bind(u32, PathBuf),
    Processing,
}

pub type CallLog = Rc<RefCell<Vec<ShaderCall>>>;

/// Shader backend that records its calls into a shared log.
pub struct RecordingShader {
    log: CallLog,
}

impl RecordingShader {
    pub fn new() -> (Self, CallLog) {
        let log: CallLog = Rc::default();
        (Self { log: log.clone() }, log)
    }
}

impl ShaderBackend for RecordingShader {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.log
            .borrow_mut()
            .push(ShaderCall::Uniform(name.to_string(), value));
    }

    fn bind_texture(&mut self, unit: u32, texture: &Texture) {
        self.log
            .borrow_mut()
            .push(ShaderCall::Bind(unit, texture.path().to_path_buf()));
    }

    fn processing(&mut self) {
        self.log.borrow_mut().push(ShaderCall::Processing);
    }
}

/// Last value written to `name`, if any.
pub fn last_uniform(log: &CallLog, name: &str) -> Option<UniformValue> {
    log.borrow().iter().rev().find_map(|call| match call {
        ShaderCall::Uniform(n, value) if n == name => Some(*value),
        _ => None,
    })
}

/// Every value written to `name`, in order.
pub fn uniform_writes(log: &CallLog, name: &str) -> Vec<UniformValue> {
    log.borrow()
        .iter()
        .filter_map(|call| match call {
            ShaderCall::Uniform(n, value) if n == name => Some(*value),
            _ => None,
        })
        .collect()
}

/// Uniform setup that counts how often it registers and how often its one
/// callback runs.
#[derive(Clone, Default)]
pub struct CountingSetup {
    pub registrations: Rc<Cell<usize>>,
    pub invocations: Rc<Cell<usize>>,
}

impl UniformSetup for CountingSetup {
    fn register(&self, callbacks: &mut UniformCallbacks) {
        self.registrations.set(self.registrations.get() + 1);
        let invocations = self.invocations.clone();
        callbacks.add(uniform_callback(move |inputs, shader| {
            invocations.set(invocations.get() + 1);
            shader.set_uniform("counted", inputs.color.into());
        }));
    }
}

/// Node that records its name and the parent transform it was given.
pub struct RecordingNode {
    name: &'static str,
    transformable: Transformable,
    visits: Rc<RefCell<Vec<(&'static str, Matrix4<f32>)>>>,
}

pub type Visits = Rc<RefCell<Vec<(&'static str, Matrix4<f32>)>>>;

impl RecordingNode {
    pub fn new(name: &'static str, local: Transform, visits: &Visits) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            name,
            transformable: Transformable::new(local),
            visits: visits.clone(),
        }))
    }
}

impl Process for RecordingNode {
    fn processing(&mut self, _ctx: &mut FrameContext<'_>) {
        let parent = self.transformable.parent_transform();
        self.visits.borrow_mut().push((self.name, parent));
    }
}

impl SceneNode for RecordingNode {
    fn transformable(&self) -> &Transformable {
        &self.transformable
    }

    fn transformable_mut(&mut self) -> &mut Transformable {
        &mut self.transformable
    }
}

/// Writes a solid `size`x`size` PNG into `dir`.
pub fn write_png(dir: &Path, name: &str, size: u32) -> anyhow::Result<PathBuf> {
    let path = dir.join(name);
    image::RgbaImage::from_pixel(size, size, image::Rgba([200, 100, 50, 255])).save(&path)?;
    Ok(path)
}

/// Context whose default texture lives in `dir`.
pub fn context_in(dir: &Path) -> anyhow::Result<Context> {
    let _ = env_logger::builder().is_test(true).try_init();
    let default = write_png(dir, "default_texture.png", 2)?;
    Context::new(EngineConfig::new().with_default_texture(default))
}
