// Configuration module
use pulseboard_core::PersonaMeta;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
    /// Persona id → display metadata, rendered verbatim by the front end.
    #[serde(default)]
    pub personas: HashMap<String, PersonaMeta>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// 0 means one worker per CPU core.
    #[serde(default)]
    pub workers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// "rocksdb" or "memory". The in-memory backend loses everything on
    /// restart and exists for local development.
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file_path: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Raw events returned in a warmup snapshot.
    #[serde(default = "default_warmup_recent_limit")]
    pub warmup_recent_limit: usize,
    /// Raw events returned in a posts snapshot.
    #[serde(default = "default_posts_recent_limit")]
    pub posts_recent_limit: usize,
    /// Days a day's counter records survive past their last write.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            db_path: default_db_path(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: default_log_file(),
            log_to_console: true,
            format: default_log_format(),
        }
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            warmup_recent_limit: default_warmup_recent_limit(),
            posts_recent_limit: default_posts_recent_limit(),
            retention_days: default_retention_days(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            storage: StorageSettings::default(),
            logging: LoggingSettings::default(),
            dashboard: DashboardSettings::default(),
            personas: HashMap::new(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_backend() -> String {
    "rocksdb".to_string()
}

fn default_db_path() -> String {
    "./data/rocksdb".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "./logs/pulseboard.log".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

fn default_warmup_recent_limit() -> usize {
    50
}

fn default_posts_recent_limit() -> usize {
    20
}

fn default_retention_days() -> u32 {
    7
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let mut config: ServerConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - PULSEBOARD_HOST: Override server.host
    /// - PULSEBOARD_PORT: Override server.port
    /// - PULSEBOARD_DB_PATH: Override storage.db_path
    /// - PULSEBOARD_LOG_FILE_PATH: Override logging.file_path
    fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        use std::env;

        if let Ok(host) = env::var("PULSEBOARD_HOST") {
            self.server.host = host;
        }

        if let Ok(port_str) = env::var("PULSEBOARD_PORT") {
            self.server.port = port_str
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid PULSEBOARD_PORT value: {}", port_str))?;
        }

        if let Ok(path) = env::var("PULSEBOARD_DB_PATH") {
            self.storage.db_path = path;
        }

        if let Ok(path) = env::var("PULSEBOARD_LOG_FILE_PATH") {
            self.logging.file_path = path;
        }

        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        let valid_backends = ["rocksdb", "memory"];
        if !valid_backends.contains(&self.storage.backend.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid storage backend '{}'. Must be one of: {}",
                self.storage.backend,
                valid_backends.join(", ")
            ));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }

        let valid_formats = ["compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        if self.dashboard.warmup_recent_limit == 0 || self.dashboard.posts_recent_limit == 0 {
            return Err(anyhow::anyhow!("Recent-event limits cannot be 0"));
        }

        if self.dashboard.retention_days == 0 {
            return Err(anyhow::anyhow!("retention_days cannot be 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.dashboard.warmup_recent_limit, 50);
        assert_eq!(config.dashboard.posts_recent_limit, 20);
        assert_eq!(config.dashboard.retention_days, 7);
    }

    #[test]
    fn test_invalid_port() {
        let mut config = ServerConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_backend() {
        let mut config = ServerConfig::default();
        config.storage.backend = "redis".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = ServerConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_retention_rejected() {
        let mut config = ServerConfig::default();
        config.dashboard.retention_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_with_personas() {
        let raw = r#"
            [server]
            host = "0.0.0.0"
            port = 9090

            [storage]
            backend = "memory"

            [personas.green]
            label = "Green Machine"
            emoji = "🟢"

            [personas.blue]
            label = "Blue Steel"
            emoji = "🔵"
        "#;
        let config: ServerConfig = toml::from_str(raw).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.personas["green"].label, "Green Machine");
        assert_eq!(config.personas["blue"].emoji, "🔵");
        // Sections absent from the file fall back to defaults.
        assert_eq!(config.dashboard.warmup_recent_limit, 50);
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.personas.is_empty());
    }
}
