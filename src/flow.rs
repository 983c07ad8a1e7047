//! Frame driver.
//!
//! A [`Flow`] builds its scene graph once in [`Flow::on_init`] and may mutate
//! it before every frame in [`Flow::on_tick`]. [`run`] owns the loop:
//!
//! 1. initialize logging and the [`Context`],
//! 2. call `on_init`,
//! 3. for each frame, call `on_tick` and then [`Context::tick`] on the space,
//!    stopping early once the input asks to close.

use crate::{config::EngineConfig, context::Context, data_structures::space::Space};

/// An application driving a [`Space`].
pub trait Flow {
    fn on_init(&mut self, ctx: &mut Context, space: &mut Space) -> anyhow::Result<()>;

    /// Runs before the space is processed. `frame` starts at 0.
    fn on_tick(&mut self, _ctx: &mut Context, _space: &mut Space, _frame: u64) {}
}

/// Runs `flow` for `frames` frames and returns the final context for inspection.
pub fn run<F: Flow>(config: EngineConfig, flow: &mut F, frames: u64) -> anyhow::Result<Context> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let mut ctx = Context::new(config)?;
    let mut space = Space::new();
    flow.on_init(&mut ctx, &mut space)?;
    log::info!("space initialized with {} scenes", space.scenes().len());

    for _ in 0..frames {
        let frame = ctx.frame();
        flow.on_tick(&mut ctx, &mut space, frame);
        ctx.tick(&mut space);
        if ctx.input.should_close() {
            log::info!("closing after frame {frame}");
            break;
        }
    }
    Ok(ctx)
}
