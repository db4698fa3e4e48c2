//! Courier Console CLI: a terminal client for the Courier admin console.
//!
//! Composes the shell library with file-backed stores so preferences and the
//! session survive between invocations, then dispatches one command per run.

use std::{path::PathBuf, sync::Arc};

use courier_console::{
    AuthClient, ColorMode, SettingsUpdate, Shell,
    constants::DEFAULT_APP_NAME,
    session::store::JsonFileLocal,
    storage::JsonFile,
};
use tracing_subscriber::EnvFilter;

mod cli;

use clap::Parser;
use cli::{Cli, ColorModeArg, Commands, SettingsCommands};

/// File holding the session flags, next to the preference file.
const SESSION_FILE: &str = "courier-session.json";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("courier_console=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => PathBuf::from("."),
    };
    if !data_dir.exists() {
        tokio::fs::create_dir_all(&data_dir).await?;
    }

    let prefs = Arc::new(JsonFile::open(&data_dir, DEFAULT_APP_NAME).await?);
    let local = Arc::new(JsonFileLocal::open(data_dir.join(SESSION_FILE)));
    let auth = AuthClient::new(cli.server);

    let shell = Shell::open(prefs, local, auth);

    // All commands run below the bootstrap gate, settings-dependent or not;
    // this is the one suspension point before the console is usable.
    shell.bootstrap().await?;

    match cli.command {
        Commands::Login(args) => {
            if shell.login(&args.password).await {
                let flags = shell.session_flags();
                if flags.insecure {
                    println!("Logged in (insecure mode: the server runs without real credentials)");
                } else {
                    println!("Logged in");
                }
            } else {
                eprintln!("Login failed; see log output for details");
                std::process::exit(1);
            }
        }
        Commands::Logout => {
            shell.logout();
            println!("Logged out");
        }
        Commands::Status => {
            let flags = shell.session_flags();
            let settings = shell.settings()?.get_user_settings();
            println!("Server session:");
            println!("  authenticated: {}", flags.authenticated);
            println!("  insecure:      {}", flags.insecure);
            println!("Console:");
            println!("  color mode:    {:?}", settings.color_mode);
            println!("  update ready:  {}", shell.update_available());
        }
        Commands::Settings(args) => match args.command {
            SettingsCommands::Get => {
                let settings = shell.settings()?.get_user_settings();
                println!("{}", serde_json::to_string_pretty(&settings)?);
            }
            SettingsCommands::Set(set) => {
                let update = SettingsUpdate {
                    color_mode: set.color_mode.map(|mode| match mode {
                        ColorModeArg::Light => ColorMode::Light,
                        ColorModeArg::Dark => ColorMode::Dark,
                    }),
                };
                shell.settings()?.update_user_settings(update).await?;
                println!("Settings updated");
            }
        },
    }

    Ok(())
}
