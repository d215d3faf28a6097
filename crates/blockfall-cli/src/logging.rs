use std::{fs::File, path::Path};

use anyhow::Context;
use env_logger::{Builder, Env, Target};

/// Sends log records to `log_file`.
///
/// The terminal belongs to the TUI, so without a file no logger is installed
/// and every record is discarded. The filter is read from `RUST_LOG` and
/// defaults to `info`.
pub fn init(log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to initialize logger")?;

    Ok(())
}
