//! Layered server configuration.
//!
//! Priority (highest to lowest):
//! 1. `serve` flags
//! 2. `ASKLOOP_*` environment variables
//! 3. `--config <path>`
//! 4. `./askloop.toml`
//! 5. Built-in defaults

use crate::cli::ServeArgs;
use askloop_core::{default_log_level, LogTarget};
use askloop_http::ServerSettings;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const PROJECT_CONFIG_FILE: &str = "askloop.toml";
pub const ENV_PREFIX: &str = "ASKLOOP_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    pub public_base_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            db_path: PathBuf::from("askloop.sqlite3"),
            log_level: default_log_level().to_string(),
            log_dir: None,
            public_base_url: None,
        }
    }
}

impl ServerConfig {
    pub fn log_target(&self) -> LogTarget {
        match &self.log_dir {
            Some(dir) => LogTarget::Directory(dir.clone()),
            None => LogTarget::Stderr,
        }
    }

    pub fn server_settings(&self) -> ServerSettings {
        ServerSettings {
            bind: self.bind,
            public_base_url: self.public_base_url.clone(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    /// `--config` pointed at a file that does not exist.
    MissingFile(PathBuf),
    Invalid(Box<figment::Error>),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFile(path) => write!(f, "config file `{}` does not exist", path.display()),
            Self::Invalid(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingFile(_) => None,
            Self::Invalid(err) => Some(err.as_ref()),
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from every source for a `serve` invocation.
    pub fn load(args: &ServeArgs) -> Result<ServerConfig, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(ServerConfig::default()));

        let project = Path::new(PROJECT_CONFIG_FILE);
        if project.exists() {
            figment = figment.merge(Toml::file(project));
        }

        if let Some(path) = args.config.as_deref() {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        Self::finish(figment.merge(Env::prefixed(ENV_PREFIX)), args)
    }

    /// Applies flag overrides on top of `figment` and extracts the config.
    pub fn finish(figment: Figment, args: &ServeArgs) -> Result<ServerConfig, ConfigError> {
        figment
            .merge(Serialized::defaults(args))
            .extract()
            .map_err(|err| ConfigError::Invalid(Box::new(err)))
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ConfigLoader, ServerConfig};
    use crate::cli::ServeArgs;
    use askloop_core::LogTarget;
    use figment::providers::{Format, Serialized, Toml};
    use figment::Figment;
    use std::path::PathBuf;

    fn base() -> Figment {
        Figment::from(Serialized::defaults(ServerConfig::default()))
    }

    #[test]
    fn defaults_bind_localhost_and_log_to_stderr() {
        let config = ConfigLoader::finish(base(), &ServeArgs::default()).unwrap();
        assert_eq!(config.bind.to_string(), "127.0.0.1:3000");
        assert_eq!(config.db_path, PathBuf::from("askloop.sqlite3"));
        assert_eq!(config.log_target(), LogTarget::Stderr);
    }

    #[test]
    fn toml_values_override_defaults() {
        let figment = base().merge(Toml::string(
            r#"
            bind = "0.0.0.0:9000"
            log_dir = "/var/log/askloop"
            public_base_url = "https://ask.example.com"
            "#,
        ));
        let config = ConfigLoader::finish(figment, &ServeArgs::default()).unwrap();
        assert_eq!(config.bind.port(), 9000);
        assert_eq!(
            config.log_target(),
            LogTarget::Directory(PathBuf::from("/var/log/askloop"))
        );
        assert_eq!(
            config.server_settings().public_base_url.as_deref(),
            Some("https://ask.example.com")
        );
    }

    #[test]
    fn flags_override_file_values_and_unset_flags_do_not() {
        let figment = base().merge(Toml::string(
            r#"
            bind = "0.0.0.0:9000"
            db_path = "from-file.sqlite3"
            "#,
        ));
        let args = ServeArgs {
            db_path: Some(PathBuf::from("from-flag.sqlite3")),
            ..ServeArgs::default()
        };
        let config = ConfigLoader::finish(figment, &args).unwrap();
        assert_eq!(config.db_path, PathBuf::from("from-flag.sqlite3"));
        assert_eq!(config.bind.port(), 9000);
    }

    #[test]
    fn invalid_bind_is_reported() {
        let figment = base().merge(Toml::string(r#"bind = "not an address""#));
        let err = ConfigLoader::finish(figment, &ServeArgs::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = ServeArgs {
            config: Some(dir.path().join("absent.toml")),
            ..ServeArgs::default()
        };
        let err = ConfigLoader::load(&args).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile(_)));
    }
}
