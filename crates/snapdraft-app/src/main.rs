//! Replays an event script against a canvas and writes the exported shapes.
//!
//! Usage: `snapdraft <script.json> [output.json]`. Without an output path
//! the export goes to stdout.

mod script;

use script::Script;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
enum AppError {
    #[error("usage: snapdraft <script.json> [output.json]")]
    Usage,
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid script: {0}")]
    Script(#[source] serde_json::Error),
    #[error("export failed: {0}")]
    Export(#[source] serde_json::Error),
}

fn run() -> Result<(), AppError> {
    let mut args = std::env::args_os().skip(1);
    let input = PathBuf::from(args.next().ok_or(AppError::Usage)?);
    let output = args.next().map(PathBuf::from);

    let json = std::fs::read_to_string(&input).map_err(|source| AppError::Io {
        path: input.clone(),
        source,
    })?;
    let script = Script::from_json(&json).map_err(AppError::Script)?;
    let canvas = script.replay();
    let exported = canvas.export_json().map_err(AppError::Export)?;

    match output {
        Some(path) => {
            std::fs::write(&path, exported).map_err(|source| AppError::Io {
                path: path.clone(),
                source,
            })?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{exported}"),
    }
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Starting SnapDraft");

    if let Err(err) = run() {
        log::error!("{err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}
