//! shiftlight - Author and program LED shift-light animations
//!
//! A shift light is a strip of 13 RGB LEDs driven by a microcontroller that
//! reads engine RPM. Its behaviour is programmed as a list of frames, each
//! lighting a set of LEDs over an RPM window. This tool checks program
//! files, evaluates the expressions they contain, uploads them over a serial
//! link and feeds test RPM values to the device.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands, PortArgs};
use shiftlight_serial::SessionConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    match cli.command {
        Commands::Check { file } => commands::program::run_check(&file),
        Commands::Eval { expr, vars } => commands::program::run_eval(&expr, vars.as_deref()),
        Commands::Upload {
            port,
            file,
            ack_timeout,
            skip_ack_comments,
        } => {
            let mut config = session_config(&port)?;
            if let Some(ms) = ack_timeout {
                config.ack_timeout_ms = ms;
            }
            if skip_ack_comments {
                config.skip_ack_comments = true;
            }
            commands::upload::run_upload(&port.port, &file, config)
        }
        Commands::Rpm {
            port,
            values,
            interval,
        } => {
            let config = session_config(&port)?;
            commands::rpm::run_rpm(&port.port, &values, interval, &config)
        }
        Commands::ListPorts => commands::list_serial_ports(),
    }
}

/// Load the session configuration and apply port overrides
fn session_config(args: &PortArgs) -> Result<SessionConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => {
            log::debug!("Loading session config from {}", path.display());
            SessionConfig::from_toml_file(path)?
        }
        None => SessionConfig::default(),
    };
    if let Some(baud) = args.baud {
        config.baud_rate = baud;
    }
    Ok(config)
}
