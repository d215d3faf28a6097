mod audio;
mod command;
mod config;
mod logging;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}
