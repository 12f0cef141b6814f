//! Layered server configuration.
//!
//! Sources, lowest to highest precedence:
//! 1. compiled defaults
//! 2. YAML file passed with `--config`
//! 3. bare `APP_ENV` / `PORT` variables (dotenv-style deployments)
//! 4. `APP__*` variables, nested with `__` (e.g. `APP__SERVER__MODE`)
//! 5. CLI overrides

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

const DEVELOPMENT_PORT: u16 = 3000;
const PRODUCTION_PORT: u16 = 8080;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

/// Deployment mode; selects the listening port when none is configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    #[serde(alias = "dev")]
    Development,
    #[serde(alias = "prod")]
    Production,
}

impl RunMode {
    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Self::Development => DEVELOPMENT_PORT,
            Self::Production => PRODUCTION_PORT,
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub mode: RunMode,
    pub host: String,
    /// Explicit port; falls back to the mode's default when unset.
    pub port: Option<u16>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::default(),
            host: "0.0.0.0".to_owned(),
            port: None,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.mode.default_port())
    }

    /// # Errors
    /// Returns an error if `host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("invalid server.host '{}'", self.host))?;
        Ok(SocketAddr::new(ip, self.effective_port()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub cors_enabled: bool,
    pub cors: CorsConfig,
    pub body_limit_bytes: usize,
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            cors_enabled: true,
            cors: CorsConfig::default(),
            body_limit_bytes: 64 * 1024,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_owned()],
            allowed_methods: ["GET", "POST", "PUT", "PATCH", "DELETE"]
                .map(str::to_owned)
                .to_vec(),
            allowed_headers: vec!["content-type".to_owned()],
            max_age_seconds: 600,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Build the full provider chain (defaults, optional YAML, environment).
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::raw().only(&["APP_ENV"]).map(|_| "server.mode".into()))
            .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()))
            .merge(Env::prefixed("APP__").split("__"))
    }

    /// # Errors
    /// Returns an error if any provider holds a value of the wrong shape.
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        figment
            .extract()
            .context("failed to load configuration")
    }

    /// Load configuration from every layer.
    ///
    /// # Errors
    /// Returns an error if the config file is missing or any layer is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            anyhow::ensure!(
                path.is_file(),
                "config file does not exist: {}",
                path.display()
            );
        }
        Self::from_figment(&Self::figment(path))
    }

    pub fn apply_cli_overrides(&mut self, port: Option<u16>) {
        if let Some(port) = port {
            self.server.port = Some(port);
        }
    }

    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to render configuration")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn from_yaml(yaml: &str) -> Result<AppConfig> {
        let figment =
            Figment::from(Serialized::defaults(AppConfig::default())).merge(Yaml::string(yaml));
        AppConfig::from_figment(&figment)
    }

    #[test]
    fn defaults_listen_on_development_port() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.mode, RunMode::Development);
        assert_eq!(cfg.server.effective_port(), 3000);
        assert_eq!(
            cfg.server.bind_addr().unwrap(),
            "0.0.0.0:3000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn production_mode_switches_default_port() {
        let cfg = from_yaml("server:\n  mode: production\n").unwrap();
        assert_eq!(cfg.server.mode, RunMode::Production);
        assert_eq!(cfg.server.effective_port(), 8080);
    }

    #[test]
    fn explicit_port_wins_over_mode() {
        let cfg = from_yaml("server:\n  mode: prod\n  port: 9090\n").unwrap();
        assert_eq!(cfg.server.effective_port(), 9090);
    }

    #[test]
    fn cli_port_override_wins() {
        let mut cfg = from_yaml("server:\n  port: 9090\n").unwrap();
        cfg.apply_cli_overrides(Some(4000));
        assert_eq!(cfg.server.effective_port(), 4000);
        cfg.apply_cli_overrides(None);
        assert_eq!(cfg.server.effective_port(), 4000);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let cfg = from_yaml("logging:\n  format: json\nhttp:\n  cors_enabled: false\n").unwrap();
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert_eq!(cfg.logging.level, "info");
        assert!(!cfg.http.cors_enabled);
        assert_eq!(cfg.http.request_timeout_secs, 30);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(from_yaml("server:\n  mode: staging\n").is_err());
    }

    #[test]
    fn invalid_host_is_rejected() {
        let cfg = from_yaml("server:\n  host: not-an-ip\n").unwrap();
        assert!(cfg.server.bind_addr().is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/definitely/not/here.yaml"))).unwrap_err();
        assert!(err.to_string().contains("config file does not exist"));
    }

    #[test]
    fn yaml_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calculadora.yaml");
        std::fs::write(&path, "server:\n  host: 127.0.0.1\nhttp:\n  body_limit_bytes: 1024\n")
            .unwrap();
        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.http.body_limit_bytes, 1024);
    }

    #[test]
    fn config_renders_as_json() {
        let rendered = AppConfig::default().to_pretty_json().unwrap();
        assert!(rendered.contains("\"mode\": \"development\""));
    }
}
