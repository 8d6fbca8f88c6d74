use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

mod runtime;
mod startup;

#[derive(Parser, Debug)]
#[command(name = "mote", version, about = "mote modal text editor")]
struct Args {
    /// File to edit. Created on first save if it does not exist; defaults to
    /// `untitled.txt`.
    pub path: Option<PathBuf>,
    /// Configuration file (overrides discovery of `mote.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let mut app = startup::AppStartup::new();
    match app.run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(target: "runtime", error = %format!("{e:#}"), "fatal");
            // The terminal guard has been dropped by now, so this reaches a sane screen.
            eprintln!("mote: {e:#}");
            ExitCode::from(1)
        }
    }
}
