//! The single-threaded editor loop: draw, poll, dispatch.

use anyhow::{Result, bail};
use core_actions::Editor;
use core_events::InputEvent;
use core_input::InputSource;
use core_plugin::PluginHost;
use core_render::Renderer;
use core_state::Mode;
use core_terminal::TerminalBackend;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Consecutive failed frames tolerated before the session gives up.
pub const MAX_DRAW_FAILURES: u32 = 3;

#[derive(Debug, Clone, Copy)]
pub struct LoopSettings {
    pub poll_interval: Duration,
}

pub fn log_shutdown_stage(reason: &str, stage: &'static str) {
    info!(target: "runtime.shutdown", reason, stage, "shutdown_stage");
}

/// Run until the editor requests quit. A window size change observed through
/// the backend is applied even when no resize event arrives.
pub fn run<B, I>(
    backend: &mut B,
    input: &mut I,
    editor: &mut Editor,
    renderer: &mut Renderer,
    plugins: &mut PluginHost,
    settings: LoopSettings,
) -> Result<()>
where
    B: TerminalBackend + ?Sized,
    I: InputSource + ?Sized,
{
    let mut draw_failures = 0u32;
    loop {
        let size = backend.size();
        if size != editor.model().window() {
            editor.handle_resize(size.0, size.1);
        }

        match renderer.draw(backend, editor.model_mut(), plugins) {
            Ok(_) => draw_failures = 0,
            Err(e) => {
                draw_failures += 1;
                warn!(target: "runtime", error = %e, attempt = draw_failures, "draw_failed");
                if draw_failures >= MAX_DRAW_FAILURES {
                    bail!("terminal output failed: {e}");
                }
            }
        }

        if editor.should_quit() {
            log_shutdown_stage("quit", "loop_exit");
            return Ok(());
        }

        match input.poll_event(settings.poll_interval)? {
            None => {}
            Some(InputEvent::Resize(cols, rows)) => editor.handle_resize(cols, rows),
            Some(InputEvent::Key(key)) => {
                let offered = editor.state().mode == Mode::Insert && !plugins.is_empty();
                if offered
                    && editor.offer_key(|buffer, cursor| {
                        plugins.on_key_press(&key, buffer, cursor)
                    })
                {
                    debug!(target: "runtime", %key, "key_consumed_by_plugin");
                    continue;
                }
                editor.handle_key(&key, Instant::now());
            }
        }
    }
}
