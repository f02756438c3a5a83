use anyhow::{Context, Result};
use orrery::{Config, OrreryApp, renderer::HeadlessBackend, scenario::Scenario};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    log::info!("Starting orrery...");

    // Usage: orrery [config.ron] [scenario.ron]
    let args: Vec<String> = env::args().collect();

    let config = match args.get(1) {
        Some(path) => {
            Config::load(path).with_context(|| format!("failed to load config '{path}'"))?
        }
        None => Config::default(),
    };

    let scenario = match args.get(2) {
        Some(path) => {
            Scenario::load(path).with_context(|| format!("failed to load scenario '{path}'"))?
        }
        None => Scenario::builtin()?,
    };

    let frames = config.headless.frames;
    let timestep = config.headless.timestep();
    let mut app = OrreryApp::new(config, &scenario, HeadlessBackend::new())?;
    app.run_headless(frames, timestep)?;

    if let Some(frame) = app.backend().last_frame() {
        log::info!(
            "Last frame: {} draw calls, {} triangles, {} meshes",
            frame.draw_calls,
            frame.triangles,
            frame.unique_meshes
        );
        for (name, position) in &frame.positions {
            log::info!(
                "{:>14}: ({:>8.3}, {:>8.3}, {:>8.3})",
                name,
                position.x,
                position.y,
                position.z
            );
        }
    }

    Ok(())
}
