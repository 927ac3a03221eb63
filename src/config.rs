use crate::models::FALLBACK_LOCALE;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub test_before_acquire: bool,
}

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid LOG_FORMAT: {}. Must be one of: pretty, json", s)),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub log_level: String,
    pub log_format: LogFormat,
    pub environment: String,
    pub default_locale: String,
}

impl DatabaseConfig {
    /// Create database config from environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create database config from any key lookup
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, String> {
        let url = lookup("DATABASE_URL")
            .ok_or("DATABASE_URL environment variable is required")?;

        let max_connections = parse_var(&lookup, "DATABASE_MAX_CONNECTIONS", 10u32)?;
        let acquire_timeout_secs = parse_var(&lookup, "DATABASE_ACQUIRE_TIMEOUT_SECS", 30u64)?;
        let idle_timeout_secs = parse_var(&lookup, "DATABASE_IDLE_TIMEOUT_SECS", 600u64)?; // 10 minutes
        let max_lifetime_secs = parse_var(&lookup, "DATABASE_MAX_LIFETIME_SECS", 1800u64)?; // 30 minutes
        let test_before_acquire = parse_var(&lookup, "DATABASE_TEST_BEFORE_ACQUIRE", true)?;

        // Validate configuration
        if max_connections == 0 {
            return Err("DATABASE_MAX_CONNECTIONS must be greater than 0".to_string());
        }

        if acquire_timeout_secs == 0 {
            return Err("DATABASE_ACQUIRE_TIMEOUT_SECS must be greater than 0".to_string());
        }

        Ok(Self {
            url,
            max_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
            test_before_acquire,
        })
    }

    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Get idle timeout as Duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Get max lifetime as Duration
    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/pollinator".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            test_before_acquire: true,
        }
    }
}

impl AppConfig {
    /// Create application config from environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create application config from any key lookup
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, String> {
        let database = DatabaseConfig::from_lookup(&lookup)?;

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let log_format = lookup("LOG_FORMAT")
            .map(|s| LogFormat::from_str(&s))
            .transpose()?
            .unwrap_or(LogFormat::Pretty);

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let default_locale =
            lookup("DEFAULT_LOCALE").unwrap_or_else(|| FALLBACK_LOCALE.to_string());

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

        let valid_locales = ["en", "de"];
        if !valid_locales.contains(&default_locale.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid DEFAULT_LOCALE: {}. Must be one of: {:?}",
                default_locale, valid_locales
            ));
        }

        Ok(Self {
            database,
            log_level: log_level.to_lowercase(),
            log_format,
            environment: environment.to_lowercase(),
            default_locale: default_locale.to_lowercase(),
        })
    }
}

/// Parse an optional variable, rejecting values that are set but malformed
fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| format!("Invalid {}: {}", key, raw)),
        None => Ok(default),
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            environment: "development".to_string(),
            default_locale: FALLBACK_LOCALE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.acquire_timeout_secs, 30);
        assert_eq!(config.idle_timeout(), Duration::from_secs(600));
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("JSON"), Ok(LogFormat::Json));
        assert_eq!(LogFormat::from_str("pretty"), Ok(LogFormat::Pretty));
        assert!(LogFormat::from_str("xml").is_err());
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_reads_values() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgresql://localhost/pollinator"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("DATABASE_TEST_BEFORE_ACQUIRE", "false"),
            ("LOG_FORMAT", "json"),
            ("DEFAULT_LOCALE", "DE"),
        ]))
        .unwrap();

        assert_eq!(config.database.max_connections, 4);
        assert!(!config.database.test_before_acquire);
        assert_eq!(config.database.acquire_timeout_secs, 30);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.default_locale, "de");
    }

    #[test]
    fn test_missing_database_url_is_rejected() {
        assert!(DatabaseConfig::from_lookup(lookup(&[])).is_err());
    }

    #[test]
    fn test_malformed_database_values_are_rejected() {
        for (key, value) in [
            ("DATABASE_MAX_CONNECTIONS", "lots"),
            ("DATABASE_ACQUIRE_TIMEOUT_SECS", "-1"),
            ("DATABASE_IDLE_TIMEOUT_SECS", "soon"),
            ("DATABASE_MAX_LIFETIME_SECS", "1.5"),
            ("DATABASE_TEST_BEFORE_ACQUIRE", "maybe"),
        ] {
            let err = DatabaseConfig::from_lookup(lookup(&[
                ("DATABASE_URL", "postgresql://localhost/pollinator"),
                (key, value),
            ]))
            .unwrap_err();
            assert_eq!(err, format!("Invalid {}: {}", key, value));
        }
    }

    #[test]
    fn test_zero_max_connections_is_rejected() {
        let result = DatabaseConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgresql://localhost/pollinator"),
            ("DATABASE_MAX_CONNECTIONS", "0"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_app_values_are_rejected() {
        for (key, value) in [
            ("LOG_LEVEL", "loud"),
            ("LOG_FORMAT", "xml"),
            ("ENVIRONMENT", "moon"),
            ("DEFAULT_LOCALE", "fr"),
        ] {
            let result = AppConfig::from_lookup(lookup(&[
                ("DATABASE_URL", "postgresql://localhost/pollinator"),
                (key, value),
            ]));
            assert!(result.is_err(), "{}={} should be rejected", key, value);
        }
    }
}
