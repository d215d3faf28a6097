use std::path::PathBuf;

use blockfall_runtime::Runtime;
use log::info;

use self::app::PlayApp;
use crate::{
    config::{ConfigOverrides, PlayConfig},
    logging,
};

mod app;
mod input;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Read settings from a JSON file; command line options take precedence
    #[clap(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Write log output to a file
    #[clap(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
    #[clap(flatten)]
    overrides: ConfigOverrides,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        config,
        log_file,
        overrides,
    } = arg;

    logging::init(log_file.as_deref())?;

    let config = match config {
        Some(path) => PlayConfig::load(path)?,
        None => PlayConfig::default(),
    }
    .with_overrides(overrides);
    let seed = config.seed.unwrap_or_else(rand::random);
    info!("starting game (seed {seed}, {} fps)", config.fps);

    let mut app = PlayApp::new(&config, seed);
    Runtime::new().run(&mut app)?;

    let stats = app.session().stats();
    info!(
        "game finished: score {}, level {}, {} resets",
        stats.score(),
        stats.level(),
        app.session().game_overs()
    );
    Ok(())
}
