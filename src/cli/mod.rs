//! CLI module for the user directory
//!
//! Provides subcommands:
//! - `serve`: HTTP API server
//! - `sign-up`: register a single user against the configured store

pub mod serve;
pub mod sign_up;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// User directory - registers users with unique id, username and email
#[derive(Parser)]
#[command(name = "user-directory")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Register one user and print the outcome
    SignUp(sign_up::SignUpArgs),
}

/// Loads `.env`, configuration and logging shared by every subcommand
///
/// Invalid configuration stops the command instead of falling back to defaults.
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    logging::init_logging(&config.logging);

    Ok(config)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sign_up() {
        let cli = Cli::try_parse_from([
            "user-directory",
            "sign-up",
            "--name",
            "Jane Doe",
            "--username",
            "janedoe",
            "--email-address",
            "jane@example.com",
        ])
        .unwrap();

        match cli.command {
            Command::SignUp(args) => {
                assert_eq!(args.name, "Jane Doe");
                assert_eq!(args.username, "janedoe");
                assert_eq!(args.email_address, "jane@example.com");
            }
            Command::Serve => panic!("Expected sign-up command"),
        }
    }

    #[test]
    fn test_sign_up_requires_all_fields() {
        let result = Cli::try_parse_from(["user-directory", "sign-up", "--name", "Jane Doe"]);
        assert!(result.is_err());
    }
}
