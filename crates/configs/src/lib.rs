use std::str::FromStr;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;
use tracing::info;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_ORIGIN: &str = "https://hciucci.github.io";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: DEFAULT_PORT, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_origin")]
    pub allowed_origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { allowed_origin: default_origin() }
    }
}

/// Which backend keeps the reviews.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(anyhow!("unknown store backend '{other}'; expected postgres or memory")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Upper bound for a single store call.
    #[serde(default = "default_store_timeout")]
    pub timeout_secs: u64,
    /// Seed the in-memory store with the sample catalogue on startup.
    #[serde(default)]
    pub seed_sample: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { backend: StoreBackend::default(), timeout_secs: default_store_timeout(), seed_sample: false }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            run_migrations: true,
        }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { DEFAULT_PORT }
fn default_origin() -> String { DEFAULT_ORIGIN.into() }
fn default_store_timeout() -> u64 { 10 }
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_true() -> bool { true }

/// Load from `CONFIG_PATH` (default `config.toml`). A missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    match std::fs::metadata(&path) {
        Ok(_) => load_from_file(&path),
        Err(_) => {
            info!(%path, "config file not found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

/// Parse a port value; `0` and anything outside `u16` are rejected.
pub fn parse_port(raw: &str) -> Result<u16> {
    let port: u16 = raw
        .trim()
        .parse()
        .map_err(|_| anyhow!("PORT '{raw}' is not a valid port number"))?;
    if port == 0 {
        return Err(anyhow!("PORT must be in 1..=65535"));
    }
    Ok(port)
}

/// Parse a worker thread count; `0` means "use the default" and is accepted.
pub fn parse_worker_threads(raw: &str) -> Result<usize> {
    raw.trim()
        .parse()
        .map_err(|_| anyhow!("TOKIO_WORKER_THREADS '{raw}' is not a valid thread count"))
}

impl AppConfig {
    /// File, then environment overrides, then validation.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Apply environment overrides through a lookup function so tests can feed their own values.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_port(&port)?;
        }
        if let Some(threads) = lookup("TOKIO_WORKER_THREADS") {
            self.server.worker_threads = Some(parse_worker_threads(&threads)?);
        }
        if let Some(origin) = lookup("CORS_ORIGIN") {
            self.cors.allowed_origin = origin;
        }
        if let Some(backend) = lookup("REVIEW_STORE") {
            self.store.backend = backend.parse()?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            if self.database.url.trim().is_empty() {
                self.database.url = url;
            }
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        match self.cors.allowed_origin.trim() {
            "" => return Err(anyhow!("cors.allowed_origin must not be empty")),
            "*" => return Err(anyhow!("cors.allowed_origin must name a single origin, not '*'")),
            _ => {}
        }
        if self.store.timeout_secs == 0 {
            return Err(anyhow!("store.timeout_secs must be a positive number of seconds"));
        }
        if self.store.backend == StoreBackend::Postgres {
            self.database.validate()?;
        }
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_fall_back_to_port_3001_and_single_origin() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 3001);
        assert_eq!(cfg.cors.allowed_origin, "https://hciucci.github.io");
        assert_eq!(cfg.store.backend, StoreBackend::Postgres);
        assert_eq!(cfg.store.timeout_secs, 10);
    }

    #[test]
    fn port_env_overrides_file() -> Result<()> {
        let mut cfg = parse("[server]\nport = 8080\n")?;
        cfg.apply_env(env(&[("PORT", "4000")]))?;
        assert_eq!(cfg.server.port, 4000);
        Ok(())
    }

    #[test]
    fn unusable_port_is_an_error() {
        let mut cfg = AppConfig::default();
        assert!(cfg.apply_env(env(&[("PORT", "not-a-port")])).is_err());
        assert!(cfg.apply_env(env(&[("PORT", "0")])).is_err());
        assert!(cfg.apply_env(env(&[("PORT", "70000")])).is_err());
    }

    #[test]
    fn unusable_worker_threads_is_an_error() -> Result<()> {
        let mut cfg = AppConfig::default();
        assert!(cfg.apply_env(env(&[("TOKIO_WORKER_THREADS", "many")])).is_err());
        assert!(cfg.apply_env(env(&[("TOKIO_WORKER_THREADS", "-2")])).is_err());

        cfg.apply_env(env(&[("TOKIO_WORKER_THREADS", "8")]))?;
        assert_eq!(cfg.server.worker_threads, Some(8));
        Ok(())
    }

    #[test]
    fn wildcard_origin_is_rejected() -> Result<()> {
        let mut cfg = AppConfig::default();
        cfg.apply_env(env(&[("REVIEW_STORE", "memory"), ("CORS_ORIGIN", "*")]))?;
        assert!(cfg.normalize_and_validate().is_err());
        Ok(())
    }

    #[test]
    fn memory_backend_skips_database_validation() -> Result<()> {
        let mut cfg = AppConfig::default();
        cfg.apply_env(env(&[("REVIEW_STORE", "memory")]))?;
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.store.backend, StoreBackend::Memory);
        Ok(())
    }

    #[test]
    fn postgres_backend_requires_database_url() -> Result<()> {
        let mut cfg = AppConfig::default();
        assert!(cfg.normalize_and_validate().is_err());

        cfg.apply_env(env(&[("DATABASE_URL", "postgres://u:p@localhost/reviews")]))?;
        cfg.normalize_and_validate()?;
        Ok(())
    }

    #[test]
    fn file_sections_parse() -> Result<()> {
        let cfg = parse(
            r#"
            [cors]
            allowed_origin = "http://localhost:5173"

            [store]
            backend = "memory"
            timeout_secs = 3
            seed_sample = true
            "#,
        )?;
        assert_eq!(cfg.cors.allowed_origin, "http://localhost:5173");
        assert_eq!(cfg.store.backend, StoreBackend::Memory);
        assert_eq!(cfg.store.timeout_secs, 3);
        assert!(cfg.store.seed_sample);
        Ok(())
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!("sqlite".parse::<StoreBackend>().is_err());
        assert_eq!("Memory".parse::<StoreBackend>().ok(), Some(StoreBackend::Memory));
    }
}
