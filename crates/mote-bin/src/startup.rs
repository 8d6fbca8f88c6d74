//! Process setup: logging, panic hook, configuration, the initial document
//! and plugins, then the terminal session.

use crate::Args;
use crate::runtime::{self, LoopSettings};
use anyhow::{Context, Result};
use core_actions::{ChordSettings, Editor, io_ops};
use core_config::Config;
use core_input::CrosstermInput;
use core_plugin::{PluginHost, PluginRegistry};
use core_render::Renderer;
use core_state::{DEFAULT_FILE_NAME, EditorState};
use core_terminal::{CrosstermBackend, TerminalBackend};
use core_text::Buffer;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

pub const LOG_FILE_NAME: &str = "mote.log";

#[derive(Default)]
pub struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    pub fn new() -> Self {
        Self { log_guard: None }
    }

    pub fn run(&mut self, args: &Args) -> Result<()> {
        self.configure_logging()?;
        Self::install_panic_hook();
        info!(target: "runtime", version = env!("CARGO_PKG_VERSION"), "startup");

        let config = core_config::load_from(args.config.clone())?;
        let state = load_editor_state(args.path.as_deref());
        let plugins = load_plugins(&config);

        let mut backend = CrosstermBackend::new();
        let mut guard = backend
            .enter_guard()
            .context("failed to enter raw mode / alternate screen")?;
        guard.set_title("mote")?;
        let window = guard.size();
        info!(
            target: "runtime.startup",
            file = %state.display_name(),
            plugins = plugins.len(),
            cols = window.0,
            rows = window.1,
            config_override = args.config.is_some(),
            "bootstrap_complete"
        );

        let mut editor = Editor::new(state, window, ChordSettings::from_config(&config));
        let mut renderer = Renderer::new(config.filler());
        let mut plugins = plugins;
        let settings = LoopSettings {
            poll_interval: config.poll_interval(),
        };
        let mut input = CrosstermInput::new();
        let result = runtime::run(
            &mut *guard,
            &mut input,
            &mut editor,
            &mut renderer,
            &mut plugins,
            settings,
        );
        runtime::log_shutdown_stage(if result.is_ok() { "quit" } else { "error" }, "terminal_restore");
        drop(guard);
        result
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE_NAME);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .with_ansi(false)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global subscriber already installed; drop guard so the writer shuts down.
            }
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

/// Initial document. A missing file is an empty buffer under that name; a
/// file that cannot be read opens an unnamed empty buffer so a later `:w`
/// cannot clobber it.
pub fn load_editor_state(path: Option<&Path>) -> EditorState {
    let path: PathBuf = path.map_or_else(|| PathBuf::from(DEFAULT_FILE_NAME), Path::to_path_buf);
    match io_ops::open_buffer(&path) {
        Ok(buffer) => EditorState::new(buffer).with_file_name(path),
        Err(e) => {
            error!(target: "io", error = %e, "file_open_error");
            let mut state = EditorState::new(Buffer::new());
            state.set_status(format!("Open failed: {e}"));
            state
        }
    }
}

/// Config-enabled built-ins first, then manifests from the plugin directory.
pub fn load_plugins(config: &Config) -> PluginHost {
    let registry = PluginRegistry::with_builtins();
    let mut host = PluginHost::new();
    host.load_enabled(config.file.plugins.enabled.as_slice(), &registry);
    host.discover(&config.file.plugins.dir, &registry);
    host
}
