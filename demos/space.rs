//! Small solar system driven for a few frames with a logging shader backend.
//!
//! Run with `RUST_LOG=debug cargo run --example space`. The default texture is
//! taken from `NGIN_DEFAULT_TEXTURE` if set, otherwise a placeholder is written
//! to the system temp directory.

use std::{cell::RefCell, rc::Rc};

use space_ngin::{
    Deg, Quaternion, Rotation3, Vector3,
    config::EngineConfig,
    context::Context,
    data_structures::{
        color::Color,
        light::Light,
        material::Material,
        object::Object,
        scene::Scene,
        scene_graph::SceneNode,
        space::Space,
        texture::Texture,
        transform::Transform,
    },
    flow::{Flow, run},
    resources::shader::{ShaderBackend, UniformValue},
};

/// Prints what a real backend would upload.
struct LogShader {
    name: &'static str,
    uniforms: usize,
}

impl ShaderBackend for LogShader {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.uniforms += 1;
        log::trace!("[{}] {name} = {value:?}", self.name);
    }

    fn bind_texture(&mut self, unit: u32, texture: &Texture) {
        log::debug!("[{}] unit {unit} <- {}", self.name, texture.path().display());
    }

    fn processing(&mut self) {
        log::info!("[{}] draw after {} uniforms", self.name, self.uniforms);
        self.uniforms = 0;
    }
}

struct SolarSystem {
    planets: Vec<Rc<RefCell<Object>>>,
    orbit: Rc<RefCell<Scene>>,
}

impl SolarSystem {
    fn new() -> Self {
        Self {
            planets: Vec::new(),
            orbit: Rc::new(RefCell::new(Scene::default())),
        }
    }
}

impl Flow for SolarSystem {
    fn on_init(&mut self, ctx: &mut Context, space: &mut Space) -> anyhow::Result<()> {
        let phong = ctx.shaders.get_or_insert_with("phong", || {
            Box::new(LogShader {
                name: "phong",
                uniforms: 0,
            })
        });
        let texture = ctx.textures.default_texture();

        let sun = Rc::new(RefCell::new(Light::with_color(
            Transform::default(),
            Color::rgb(1.0, 0.9, 0.7),
        )));
        let sun_scene = Rc::new(RefCell::new(Scene::default()));
        sun_scene.borrow_mut().add_object(sun);
        space.add_scene(sun_scene);

        for (i, color) in [Color::rgb(0.8, 0.3, 0.2), Color::rgb(0.2, 0.4, 0.9)]
            .into_iter()
            .enumerate()
        {
            let mut material = Material::new(phong);
            material.set_color(color);
            material.add_texture(texture);
            let material = ctx.materials.add(material);

            let distance = 5.0 * (i + 1) as f32;
            let planet = Rc::new(RefCell::new(Object::with_material(
                Transform::from_translation(distance, 0.0, 0.0).with_scale(0.5, 0.5, 0.5),
                material,
            )));
            self.orbit.borrow_mut().add_object(planet.clone());
            self.planets.push(planet);
        }
        space.add_scene(self.orbit.clone());
        Ok(())
    }

    fn on_tick(&mut self, _ctx: &mut Context, _space: &mut Space, frame: u64) {
        // the whole orbit turns, planets spin in place
        let mut orbit = self.orbit.borrow_mut();
        let local = orbit
            .local_transform()
            .with_rotation(Quaternion::from_angle_y(Deg(frame as f32 * 10.0)));
        orbit.set_local_transform(local);

        for planet in &self.planets {
            let mut planet = planet.borrow_mut();
            let local = planet.local_transform();
            planet.set_local_transform(
                local.with_rotation(local.rotation * Quaternion::from_angle_z(Deg(5.0))),
            );
        }
    }
}

fn main() -> anyhow::Result<()> {
    let mut config = EngineConfig::from_env();
    if std::env::var_os(space_ngin::config::DEFAULT_TEXTURE_ENV).is_none() {
        let path = std::env::temp_dir().join("space_ngin_default_texture.png");
        image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 255, 255, 255])).save(&path)?;
        config = config.with_default_texture(path);
    }

    let mut system = SolarSystem::new();
    let ctx = run(config, &mut system, 5)?;

    let position: Vector3<f32> = ctx.camera().position();
    log::info!(
        "ran {} frames, {} lights, camera at {:?}",
        ctx.frame(),
        ctx.lights.len(),
        position
    );
    Ok(())
}
