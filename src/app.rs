/// Main application structure that coordinates all subsystems
/// Owns the simulation, the camera rig and a render back end, and routes
/// input between them
use std::time::Duration;

use crate::{
    OrreryError, OrreryResult,
    config::Config,
    graphics::MeshCache,
    input::{Action, InputEvent, InputHandler},
    orbits::OrbitalTransformEngine,
    renderer::{CameraRig, DrawCall, RenderBackend},
    scenario::Scenario,
};

pub struct OrreryApp<B: RenderBackend> {
    config: Config,
    engine: OrbitalTransformEngine,
    camera: CameraRig,
    meshes: MeshCache,
    backend: B,
    input_handler: InputHandler,
    focus_keys: Vec<String>,
    quit_requested: bool,
}

impl<B: RenderBackend> OrreryApp<B> {
    pub fn new(config: Config, scenario: &Scenario, backend: B) -> OrreryResult<Self> {
        log::info!("Initializing orrery with scenario '{}'", scenario.name);

        let mut meshes = MeshCache::with_ring_segments(config.meshes.ring_segments);
        let mut engine = scenario.build_engine(&mut meshes, config.simulation.time_scale)?;
        engine.set_paused(config.simulation.start_paused);

        let camera = CameraRig::from_engine(&config.camera, &engine)?;

        Ok(Self {
            focus_keys: scenario.focus_order(),
            config,
            engine,
            camera,
            meshes,
            backend,
            input_handler: InputHandler::new(),
            quit_requested: false,
        })
    }

    /// The built-in solar system with default settings
    pub fn with_builtin_scenario(backend: B) -> OrreryResult<Self> {
        Self::new(Config::default(), &Scenario::builtin()?, backend)
    }

    /// Feed a raw window event through the input handler
    pub fn handle_event(&mut self, event: &InputEvent) -> OrreryResult<()> {
        match self.input_handler.handle_event(event) {
            Some(action) => self.handle_action(action),
            None => Ok(()),
        }
    }

    pub fn handle_action(&mut self, action: Action) -> OrreryResult<()> {
        match action {
            // Grab-and-pull: the scene follows the cursor
            Action::Drag { dx, dy } => self.camera.drag(-dx, -dy),
            Action::Zoom(notches) => self.camera.scroll(notches),
            Action::Focus(key) => match self.focus_keys.get(key) {
                Some(name) => self.camera.set_focus(&self.engine, name)?,
                None => log::warn!("No body bound to focus key {key}"),
            },
            Action::TogglePause => {
                self.engine.toggle_pause();
            }
            Action::SpeedUp => self.engine.scale_time(self.config.simulation.speed_factor)?,
            Action::SlowDown => self
                .engine
                .scale_time(self.config.simulation.speed_factor.recip())?,
            Action::ResetSpeed => self.engine.reset_time_scale(),
            Action::ResetSimulation => self.engine.reset_simulation(),
            Action::Quit => {
                log::info!("Quit requested");
                self.quit_requested = true;
            }
        }
        Ok(())
    }

    /// Advance the simulation by one frame's worth of wall time
    pub fn update(&mut self, dt: Duration) -> OrreryResult<()> {
        self.engine.advance(dt)
    }

    /// Submit one frame: the eye follows the focus, then every body is drawn
    /// parents first
    pub fn render(&mut self) -> OrreryResult<()> {
        let eye = self.camera.follow(&self.engine)?;
        self.backend.begin_frame(&eye)?;

        for (id, body, model) in self.engine.draw_list()? {
            self.backend.draw(DrawCall {
                body: id,
                name: &body.name,
                mesh: &body.mesh,
                model: model.as_mat4(),
                material: &body.material,
            })?;
        }

        self.backend.end_frame()
    }

    /// Fixed-step update and render loop without a window
    pub fn run_headless(&mut self, frames: u32, timestep: Duration) -> OrreryResult<()> {
        if timestep.is_zero() && !self.engine.is_paused() {
            return Err(OrreryError::InvalidParameter(
                "headless timestep must be non-zero".to_string(),
            ));
        }

        for frame in 0..frames {
            if self.quit_requested {
                log::info!("Stopping after {frame} frames");
                break;
            }
            self.update(timestep)?;
            self.render()?;
        }

        log::info!(
            "Simulated {:.2} days over {} frames",
            self.engine.elapsed_days(),
            frames
        );
        Ok(())
    }

    pub fn engine(&self) -> &OrbitalTransformEngine {
        &self.engine
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Body names bound to focus keys 0-9
    pub fn focus_keys(&self) -> &[String] {
        &self.focus_keys
    }

    /// Distinct meshes generated for the scenario
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}
