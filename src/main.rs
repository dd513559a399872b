use std::error::Error;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use log::error;

mod cli;
mod config;
mod run;

use cli::{Cli, Command};
use config::{MapConfig, load_config_from_path};
use run::Session;

const DEFAULT_CONFIG: &str = "voxmap.toml";

fn init_logging(level: Option<&str>) {
    let env = env_logger::Env::default().default_filter_or(level.unwrap_or("info"));
    let mut builder = env_logger::Builder::from_env(env);
    // an explicit level beats RUST_LOG
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    builder.format_timestamp_millis().init();
}

fn load_config(path: Option<&Path>) -> Result<MapConfig, Box<dyn Error>> {
    match path {
        Some(path) => load_config_from_path(path),
        None if Path::new(DEFAULT_CONFIG).exists() => load_config_from_path(Path::new(DEFAULT_CONFIG)),
        None => Ok(MapConfig::default()),
    }
}

fn execute(cli: Cli, mut config: MapConfig) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Render { view, output, exact } => {
            config.apply_cli_overrides(&view);
            let mut session = Session::new(&config, view.highlight)?;
            session.set_exact(exact);
            let (image, report) = session.draw()?;
            run::write_png(&image, &output)?;
            if report.error.is_some() {
                return Err(format!("rendered with load errors (status {})", report.status_code()).into());
            }
        }
        Command::Pick { view, at } => {
            config.apply_cli_overrides(&view);
            let mut session = Session::new(&config, view.highlight)?;
            session.draw()?;
            let lookup = session.pick(at.0, at.1)?;
            println!("{}", run::describe(&lookup));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };
    let level = cli.log_level.clone().or_else(|| config.log_level.clone());
    init_logging(level.as_deref());
    match execute(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
