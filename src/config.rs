use std::env;
use std::time::Duration;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

/// Upstream product API configuration
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub accept_invalid_certs: bool,
}

/// Values rendered by the static responders
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub domain: String,
    pub security_contact: String,
    pub security_expires: String,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub fetcher: FetcherConfig,
    pub site: SiteConfig,
    pub log_level: String,
    pub log_format: LogFormat,
    pub port: u16,
    pub environment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl DatabaseConfig {
    /// Create database config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let path = env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "/data/monsterdatabase.db".to_string());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(5);

        let acquire_timeout_secs = env::var("DATABASE_ACQUIRE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(10);

        if path.trim().is_empty() {
            return Err("DATABASE_PATH must not be empty".to_string());
        }

        if max_connections == 0 {
            return Err("DATABASE_MAX_CONNECTIONS must be greater than 0".to_string());
        }

        if acquire_timeout_secs == 0 {
            return Err("DATABASE_ACQUIRE_TIMEOUT_SECS must be greater than 0".to_string());
        }

        Ok(Self {
            path,
            max_connections,
            acquire_timeout_secs,
        })
    }

    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "/data/monsterdatabase.db".to_string(),
            max_connections: 5,
            acquire_timeout_secs: 10,
        }
    }
}

impl FetcherConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let endpoint = env::var("PRICE_ENDPOINT").unwrap_or(defaults.endpoint);

        let timeout_secs = env::var("PRICE_FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.timeout_secs);

        let accept_invalid_certs = match env::var("PRICE_ACCEPT_INVALID_CERTS") {
            Ok(value) => parse_flag("PRICE_ACCEPT_INVALID_CERTS", &value)?,
            Err(_) => defaults.accept_invalid_certs,
        };

        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(format!("Invalid PRICE_ENDPOINT: {}", endpoint));
        }

        if timeout_secs == 0 {
            return Err("PRICE_FETCH_TIMEOUT_SECS must be greater than 0".to_string());
        }

        Ok(Self {
            endpoint,
            timeout_secs,
            accept_invalid_certs,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://oda.com/tienda-web-api/v1/products/23300/".to_string(),
            timeout_secs: 10,
            accept_invalid_certs: true,
        }
    }
}

impl SiteConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            domain: env::var("SITE_DOMAIN")
                .map(|d| d.trim_end_matches('/').to_string())
                .unwrap_or(defaults.domain),
            security_contact: env::var("SECURITY_CONTACT").unwrap_or(defaults.security_contact),
            security_expires: env::var("SECURITY_EXPIRES").unwrap_or(defaults.security_expires),
        }
    }

    /// Canonical location of security.txt, always on the bare domain
    pub fn security_canonical(&self) -> String {
        let bare = self.domain.replacen("://www.", "://", 1);
        format!("{}/.well-known/security.txt", bare)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            domain: "https://www.monsterindeks.no".to_string(),
            security_contact: "mailto:larskhaga@gmail.com".to_string(),
            security_expires: "2030-12-31T22:59:00.000Z".to_string(),
        }
    }
}

/// Strict boolean parsing for switches; anything unrecognised is an error
fn parse_flag(name: &str, value: &str) -> Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(format!(
            "Invalid {}: {}. Must be one of: [\"true\", \"false\", \"1\", \"0\", \"yes\", \"no\", \"on\", \"off\"]",
            name, other
        )),
    }
}

impl AppConfig {
    /// Create application config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let database = DatabaseConfig::from_env()?;
        let fetcher = FetcherConfig::from_env()?;
        let site = SiteConfig::from_env();

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "json".to_string())
            .to_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            other => {
                return Err(format!(
                    "Invalid LOG_FORMAT: {}. Must be one of: [\"json\", \"pretty\"]",
                    other
                ))
            }
        };

        // An empty PORT falls back to the default, like an unset one
        let port = match env::var("PORT") {
            Ok(p) if !p.trim().is_empty() => p
                .trim()
                .parse::<u16>()
                .map_err(|e| format!("Invalid PORT: {}: {}", p, e))?,
            _ => 8080,
        };

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        // Validate log level
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid LOG_LEVEL: {}. Must be one of: {:?}",
                log_level, valid_log_levels
            ));
        }

        // Validate environment
        let valid_environments = ["development", "staging", "production"];
        if !valid_environments.contains(&environment.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid ENVIRONMENT: {}. Must be one of: {:?}",
                environment, valid_environments
            ));
        }

        Ok(Self {
            database,
            fetcher,
            site,
            log_level: log_level.to_lowercase(),
            log_format,
            port,
            environment: environment.to_lowercase(),
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Check if running in development
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            fetcher: FetcherConfig::default(),
            site: SiteConfig::default(),
            log_level: "info".to_string(),
            log_format: LogFormat::Json,
            port: 8080,
            environment: "development".to_string(),
        }
    }
}
