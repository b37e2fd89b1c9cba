//! Toon Sandbox - Headless Demo
//!
//! Renders the demo room on the recording device while a scripted input
//! timeline walks the camera, drives every light control mode, toggles
//! shadows and resizes the window. Usage: `toon-sandbox [config.ron]`.

mod room;
mod script;

use anyhow::Result;
use toon_core::{FrameTime, SandboxConfig, Timer};
use toon_platform::InputState;
use toon_renderer::{FrameStats, Overlay, OverlayInfo, Renderer};
use toon_rhi::{GraphicsDevice, RecordingDevice, count_draws};
use toon_scene::ControlMode;
use tracing::{debug, error, info, trace};

use crate::script::InputScript;

/// Fixed update step so scripted runs are reproducible. The measured wall
/// time is only logged.
const FRAME_DT: f32 = 1.0 / 60.0;

/// Frames rendered after the script ends if nothing quits earlier.
const TRAILING_FRAMES: u64 = 30;

/// Overlay that logs the help text whenever the displayed state changes.
#[derive(Default)]
struct LogOverlay {
    shown: Option<(ControlMode, bool)>,
}

impl Overlay for LogOverlay {
    fn draw(&mut self, _device: &mut dyn GraphicsDevice, info: &OverlayInfo) {
        let state = (info.mode, info.shadows_enabled);
        if self.shown == Some(state) {
            return;
        }
        self.shown = Some(state);
        for line in info.lines() {
            debug!(target: "toon::overlay", "{}", line);
        }
    }
}

/// Stats line with the measured wall time of the frame.
fn frame_line(stats: &FrameStats, time: FrameTime) -> String {
    format!(
        "{} | wall {:.2} ms, {:.2} s total",
        stats,
        time.delta * 1000.0,
        time.total
    )
}

fn load_config() -> Result<SandboxConfig> {
    match std::env::args().nth(1) {
        Some(path) => Ok(SandboxConfig::load(path)?),
        None => {
            info!("No config given, using defaults");
            Ok(SandboxConfig::default())
        }
    }
}

fn main() -> Result<()> {
    toon_core::init_logging();
    info!("Starting Toon Sandbox");

    let config = load_config()?;
    let mut device = RecordingDevice::new(config.window.width, config.window.height);
    let room = room::build_room(&mut device)?;
    let mut renderer = Renderer::new(&mut device, config, room.scene, room.assets)?;

    let script = InputScript::demo();
    let mut input = InputState::new();
    let mut overlay = LogOverlay::default();
    let mut timer = Timer::new();
    let mut rendered = 0u64;
    let mut draws = 0usize;

    info!("Initialization complete, running {} scripted actions", script.len());
    for frame in 0..=script.last_frame() + TRAILING_FRAMES {
        let time = timer.tick();
        for (width, height) in script.apply(frame, &mut input) {
            if let Err(e) = renderer.on_resize(&mut device, width, height) {
                error!("Resize error: {}", e);
            }
        }

        if renderer.update(FRAME_DT, &input) {
            info!("Escape pressed, stopping at frame {}", frame);
            break;
        }

        match renderer.render_frame(&mut device, &mut overlay) {
            Ok(stats) => {
                if stats.frame_index % 60 == 0 {
                    info!("{}", frame_line(&stats, time));
                } else {
                    trace!("{}", frame_line(&stats, time));
                }
                rendered += 1;
            }
            Err(e) => error!("Render error: {}", e),
        }

        // The log is only inspected per frame
        draws += count_draws(&device.take_commands());
    }

    info!(
        "Rendered {} frames ({} draws) in {:.2?}",
        rendered,
        draws,
        timer.elapsed()
    );
    Ok(())
}
