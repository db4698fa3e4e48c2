//! CLI argument definitions for the Courier Console binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use url::Url;

/// Courier admin console client
#[derive(Parser, Debug)]
#[command(name = "courier-console")]
#[command(about = "Courier Console: admin client for the Courier messaging server")]
#[command(version)]
pub struct Cli {
    /// Base URL of the Courier server
    #[arg(
        short,
        long,
        default_value = "http://127.0.0.1:8000/",
        env = "COURIER_SERVER"
    )]
    pub server: Url,

    /// Data directory for persisted console state.
    /// Holds courier.json (preferences) and courier-session.json (session flags)
    #[arg(short = 'D', long, env = "COURIER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate against the server and store the session
    Login(LoginArgs),
    /// Drop the stored session
    Logout,
    /// Show session flags, update state, and current settings
    Status,
    /// Read or change user settings
    Settings(SettingsArgs),
}

/// Arguments for the login command
#[derive(clap::Args, Debug)]
pub struct LoginArgs {
    /// Admin password
    #[arg(short, long, env = "COURIER_PASSWORD")]
    pub password: String,
}

/// Arguments for the settings command
#[derive(clap::Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommands,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Print the current settings record
    Get,
    /// Update settings fields
    Set(SetArgs),
}

/// Arguments for the settings set command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Color scheme to use
    #[arg(long, value_enum)]
    pub color_mode: Option<ColorModeArg>,
}

/// Color scheme choice
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorModeArg {
    /// Light scheme
    Light,
    /// Dark scheme
    Dark,
}
