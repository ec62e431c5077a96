//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "askloop",
    version,
    about = "Ask a question, share the link, collect anonymous feedback"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve(ServeArgs),
    /// Print core linkage info and exit.
    Ping,
}

/// Flags for `serve`. Set flags override every config source.
///
/// Serialized as a figment layer; unset flags are skipped so they do not
/// shadow lower-priority values.
#[derive(Debug, Default, Clone, Args, Serialize)]
pub struct ServeArgs {
    /// Extra TOML config file.
    #[arg(long, value_name = "PATH")]
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:8080.
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind: Option<SocketAddr>,

    /// SQLite database file.
    #[arg(long = "db", value_name = "PATH")]
    #[serde(rename = "db_path", skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files (stderr when unset).
    #[arg(long, value_name = "DIR")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Public origin used in share links.
    #[arg(long, value_name = "URL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_base_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_flags_parse() {
        let cli = Cli::parse_from([
            "askloop",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--db",
            "data.sqlite3",
        ]);
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.bind.unwrap().port(), 8080);
                assert_eq!(args.db_path.unwrap().to_str(), Some("data.sqlite3"));
                assert!(args.log_dir.is_none());
            }
            Command::Ping => panic!("expected serve"),
        }
    }
}
