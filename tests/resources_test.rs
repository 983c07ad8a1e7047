use space_ngin::{
    NginError,
    config::EngineConfig,
    context::Context,
    data_structures::{space::Space, texture::TextureParams},
    flow::{Flow, run},
};

use winit::{event::ElementState, keyboard::KeyCode};

use crate::common::test_utils::{context_in, write_png};

mod common;

#[test]
fn should_fail_without_default_texture() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = EngineConfig::new().with_default_texture(dir.path().join("missing.png"));

    let err = match Context::new(config) {
        Ok(_) => anyhow::bail!("context must not start without its default texture"),
        Err(err) => err,
    };
    assert!(matches!(
        err.downcast_ref::<NginError>(),
        Some(NginError::ResourceNotFound { .. })
    ));
    Ok(())
}

#[test]
fn should_report_missing_texture_and_keep_default() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut ctx = context_in(dir.path())?;

    let result = ctx.textures.get(dir.path().join("nope.png"));
    assert!(matches!(result, Err(NginError::ResourceNotFound { .. })));

    let default = ctx.textures.default_texture();
    let texture = ctx
        .textures
        .texture(default)
        .ok_or_else(|| anyhow::anyhow!("default texture missing"))?;
    assert_eq!(texture.dimensions(), (2, 2));
    assert_eq!(ctx.textures.len(), 1);
    Ok(())
}

#[test]
fn should_resolve_params_through_cache() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut ctx = context_in(dir.path())?;
    let path = write_png(dir.path(), "grass.png", 8)?;

    let first = ctx.textures.get_params(&TextureParams::new(&path, 2))?;
    let second = ctx
        .textures
        .get_params(&TextureParams::new(dir.path().join(".").join("grass.png"), 5))?;
    assert_eq!(first, second);
    assert_eq!(ctx.textures.len(), 2);
    assert_eq!(ctx.textures.texture(first).map(|t| t.unit()), Some(5));

    ctx.textures.release(first)?;
    assert!(matches!(
        ctx.textures.release(first),
        Err(NginError::UnknownHandle(_))
    ));
    // a released path is loaded again on the next request
    let third = ctx.textures.get(&path)?;
    assert_ne!(third, first);
    Ok(())
}

struct CountingFlow {
    ticks: Vec<u64>,
}

impl Flow for CountingFlow {
    fn on_init(&mut self, _ctx: &mut Context, _space: &mut Space) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_tick(&mut self, _ctx: &mut Context, _space: &mut Space, frame: u64) {
        self.ticks.push(frame);
    }
}

#[test]
fn should_drive_requested_number_of_frames() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let default = write_png(dir.path(), "default_texture.png", 2)?;
    let mut flow = CountingFlow { ticks: Vec::new() };

    let ctx = run(EngineConfig::new().with_default_texture(default), &mut flow, 3)?;
    assert_eq!(flow.ticks, vec![0, 1, 2]);
    assert_eq!(ctx.frame(), 3);
    Ok(())
}

struct EscapeFlow {
    ticks: Vec<u64>,
    press_at: u64,
}

impl Flow for EscapeFlow {
    fn on_init(&mut self, _ctx: &mut Context, _space: &mut Space) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_tick(&mut self, ctx: &mut Context, _space: &mut Space, frame: u64) {
        self.ticks.push(frame);
        if frame == self.press_at {
            ctx.input.handle_key(KeyCode::Escape, ElementState::Pressed);
        }
    }
}

#[test]
fn should_stop_driving_frames_after_escape() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let default = write_png(dir.path(), "default_texture.png", 2)?;
    let mut flow = EscapeFlow {
        ticks: Vec::new(),
        press_at: 1,
    };

    let ctx = run(EngineConfig::new().with_default_texture(default), &mut flow, 10)?;
    assert_eq!(flow.ticks, vec![0, 1]);
    assert_eq!(ctx.frame(), 2);
    assert!(ctx.input.should_close());
    Ok(())
}
