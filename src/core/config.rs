//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.unibot/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UnibotConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub level: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_LOG_FILE: &str = "unibot.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

pub const ENV_BASE_URL: &str = "UNIBOT_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "UNIBOT_TIMEOUT_SECS";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    /// `None` leaves timeouts to the transport.
    pub request_timeout: Option<Duration>,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

/// Values given on the command line. `None` / `false` = not specified.
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub base_url: Option<&'a str>,
    pub timeout_secs: Option<u64>,
    pub log_file: Option<&'a Path>,
    pub verbose: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.unibot/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".unibot").join("config.toml"))
}

/// Where the file config came from.
#[derive(Debug)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file yet; [`ConfigLoad::report`] writes the commented default.
    Missing(PathBuf),
    NoHomeDir,
    /// The file exists but couldn't be used; defaults apply.
    Invalid { path: PathBuf, error: ConfigError },
}

/// Result of reading the config file.
///
/// Loading happens before the logger exists, so it neither logs nor writes.
/// Call [`ConfigLoad::report`] once logging is up.
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: UnibotConfig,
    pub source: ConfigSource,
}

impl ConfigLoad {
    /// Log the outcome and generate the default file on first run.
    pub fn report(&self) {
        match &self.source {
            ConfigSource::File(path) => {
                info!("Loaded config from {}", path.display());
                debug!("Config: {:?}", self.config);
            }
            ConfigSource::Missing(path) => {
                info!("No config file found, generating default at {}", path.display());
                generate_default_config(path);
            }
            ConfigSource::NoHomeDir => {
                warn!("Could not determine home directory, using default config");
            }
            ConfigSource::Invalid { path, error } => {
                warn!("Ignoring {}, using defaults: {}", path.display(), error);
            }
        }
    }
}

/// Load config from `~/.unibot/config.toml`.
pub fn load_config() -> ConfigLoad {
    load_config_at(config_path())
}

/// Load config from `path`, or defaults when there is no path, no file, or a
/// malformed one.
pub fn load_config_at(path: Option<PathBuf>) -> ConfigLoad {
    let Some(path) = path else {
        return ConfigLoad {
            config: UnibotConfig::default(),
            source: ConfigSource::NoHomeDir,
        };
    };

    if !path.exists() {
        return ConfigLoad {
            config: UnibotConfig::default(),
            source: ConfigSource::Missing(path),
        };
    }

    match load_config_from(&path) {
        Ok(config) => ConfigLoad {
            config,
            source: ConfigSource::File(path),
        },
        Err(error) => ConfigLoad {
            config: UnibotConfig::default(),
            source: ConfigSource::Invalid { path, error },
        },
    }
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<UnibotConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# UniBot Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# base_url = "http://localhost:8080"   # Or set UNIBOT_BASE_URL
# request_timeout_secs = 60            # Or set UNIBOT_TIMEOUT_SECS; unset = no timeout

# [logging]
# file = "unibot.log"
# level = "info"                       # "error", "warn", "info", "debug", "trace"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &UnibotConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env<F>(config: &UnibotConfig, cli: &CliOverrides<'_>, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .map(|s| s.to_string())
        .or_else(|| env(ENV_BASE_URL))
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Timeout: CLI → env → config → none. Zero means "no timeout".
    let timeout_secs = cli
        .timeout_secs
        .or_else(|| env(ENV_TIMEOUT_SECS).and_then(|v| v.trim().parse().ok()))
        .or(config.server.request_timeout_secs)
        .filter(|secs| *secs > 0);

    let log_file = cli
        .log_file
        .map(Path::to_path_buf)
        .or_else(|| config.logging.file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        config
            .logging
            .level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    };

    ResolvedConfig {
        base_url,
        request_timeout: timeout_secs.map(Duration::from_secs),
        log_file,
        log_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&UnibotConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.request_timeout, None);
        assert_eq!(resolved.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(resolved.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = UnibotConfig {
            server: ServerConfig {
                base_url: Some("http://uni.example:9000".to_string()),
                request_timeout_secs: Some(30),
            },
            logging: LoggingConfig {
                file: Some("/tmp/bot.log".to_string()),
                level: Some("warn".to_string()),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, "http://uni.example:9000");
        assert_eq!(resolved.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(resolved.log_file, PathBuf::from("/tmp/bot.log"));
        assert_eq!(resolved.log_level, LevelFilter::Warn);
    }

    #[test]
    fn test_env_wins_over_config() {
        let config = UnibotConfig {
            server: ServerConfig {
                base_url: Some("http://from-file".to_string()),
                request_timeout_secs: Some(30),
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            ENV_BASE_URL => Some("http://from-env".to_string()),
            ENV_TIMEOUT_SECS => Some("5".to_string()),
            _ => None,
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.base_url, "http://from-env");
        assert_eq!(resolved.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_cli_wins_over_everything() {
        let config = UnibotConfig {
            server: ServerConfig {
                base_url: Some("http://from-file".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |key: &str| (key == ENV_BASE_URL).then(|| "http://from-env".to_string());
        let cli = CliOverrides {
            base_url: Some("http://from-cli"),
            timeout_secs: Some(12),
            log_file: Some(Path::new("cli.log")),
            verbose: true,
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.base_url, "http://from-cli");
        assert_eq!(resolved.request_timeout, Some(Duration::from_secs(12)));
        assert_eq!(resolved.log_file, PathBuf::from("cli.log"));
        assert_eq!(resolved.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let cli = CliOverrides {
            timeout_secs: Some(0),
            ..Default::default()
        };
        let resolved = resolve_with_env(&UnibotConfig::default(), &cli, no_env);
        assert_eq!(resolved.request_timeout, None);
    }

    #[test]
    fn test_bad_env_timeout_falls_through_to_config() {
        let config = UnibotConfig {
            server: ServerConfig {
                request_timeout_secs: Some(20),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |key: &str| (key == ENV_TIMEOUT_SECS).then(|| "soon".to_string());
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.request_timeout, Some(Duration::from_secs(20)));
    }

    #[test]
    fn test_unknown_log_level_uses_default() {
        let config = UnibotConfig {
            logging: LoggingConfig {
                level: Some("chatty".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[server]
base_url = "http://10.0.0.5:8080"
"#;
        let config: UnibotConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.base_url.as_deref(), Some("http://10.0.0.5:8080"));
        assert!(config.server.request_timeout_secs.is_none());
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_load_config_from_reports_parse_errors() {
        let dir = std::env::temp_dir().join(format!("unibot-config-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[server\nbase_url = ").unwrap();

        let result = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_generated_default_parses_as_empty_config() {
        let dir = std::env::temp_dir().join(format!("unibot-default-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        generate_default_config(&path);

        let config = load_config_from(&path).unwrap();
        assert!(config.server.base_url.is_none());
        assert!(config.logging.level.is_none());

        fs::remove_dir_all(&dir).unwrap();
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("unibot-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_missing_file_is_not_written_until_reported() {
        let dir = scratch_dir("missing");
        let path = dir.join("config.toml");

        let loaded = load_config_at(Some(path.clone()));
        assert!(matches!(&loaded.source, ConfigSource::Missing(p) if *p == path));
        assert!(loaded.config.server.base_url.is_none());
        assert!(!path.exists());

        loaded.report();
        assert!(path.exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = scratch_dir("invalid");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[server\nbase_url = ").unwrap();

        let loaded = load_config_at(Some(path));
        assert!(matches!(
            loaded.source,
            ConfigSource::Invalid { error: ConfigError::Parse(_), .. }
        ));
        assert!(loaded.config.server.base_url.is_none());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_valid_file_is_loaded() {
        let dir = scratch_dir("valid");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[server]\nbase_url = \"http://uni.example\"\n").unwrap();

        let loaded = load_config_at(Some(path.clone()));
        assert!(matches!(&loaded.source, ConfigSource::File(p) if *p == path));
        assert_eq!(loaded.config.server.base_url.as_deref(), Some("http://uni.example"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_no_home_dir_uses_defaults() {
        let loaded = load_config_at(None);
        assert!(matches!(loaded.source, ConfigSource::NoHomeDir));
        assert!(loaded.config.logging.file.is_none());
    }
}
