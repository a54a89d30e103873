//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shiftlight")]
#[command(author, version, about = "LED shift-light programmer", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Serial link options shared across commands
#[derive(clap::Args, Debug, Clone)]
pub struct PortArgs {
    /// Serial port the device is attached to (e.g. /dev/ttyACM0, COM3)
    #[arg(short, long)]
    pub port: String,

    /// Session configuration file (TOML, `[session]` table)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the configured baud rate
    #[arg(long)]
    pub baud: Option<u32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a program file and show its evaluated frame lines
    Check {
        /// Program file
        file: PathBuf,
    },

    /// Evaluate an expression
    Eval {
        /// Expression, e.g. "redline-500"
        #[arg(allow_hyphen_values = true)]
        expr: String,

        /// Program file whose variables the expression may use
        #[arg(long)]
        vars: Option<PathBuf>,
    },

    /// Program the device with an animation
    Upload {
        #[command(flatten)]
        port: PortArgs,

        /// Program file
        file: PathBuf,

        /// Frame acknowledgement timeout in milliseconds
        #[arg(long)]
        ack_timeout: Option<u64>,

        /// Ignore `#` comment lines while waiting for frame acknowledgements
        #[arg(long)]
        skip_ack_comments: bool,
    },

    /// Feed RPM values to a programmed device
    Rpm {
        #[command(flatten)]
        port: PortArgs,

        /// Values to send, clamped to 0-9999
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i64>,

        /// Delay between values in milliseconds
        #[arg(long, default_value_t = 500)]
        interval: u64,
    },

    /// List available serial ports
    ListPorts,
}
