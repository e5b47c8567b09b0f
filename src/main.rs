//! Framesnap - save BGRA video stills as sequentially numbered PNG files.

mod adapters;
mod cli;
mod config;
mod error;
mod frame;
mod output;
mod params;
mod ports;
mod writer;

use std::process;

use clap::Parser;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::StillError;
use crate::writer::ImageWriter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<(), StillError> {
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(StillError::Config)?;

    let settings = cli.encoder_settings(&config);
    let mut writer = ImageWriter::initialize(settings)?;

    let frame = cli.read_frame()?;

    let output_path = match &cli.output {
        Some(path) => path.clone(),
        None => writer.next_filename(cli.output_dir(&config), cli.prefix(&config))?,
    };

    let result = writer.write_bgra32_png(&frame, &output_path);
    writer.uninitialize();
    let still = result?;

    eprintln!("Saved: {}", still.path.display());
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&still)?);
    }

    Ok(())
}
