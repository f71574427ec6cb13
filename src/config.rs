use std::env;
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

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub log_level: String,
    pub environment: String,
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse::<T>().ok())
}

impl DatabaseConfig {
    /// Create database config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL environment variable is required")?;

        let defaults = Self::default();

        let config = Self {
            url,
            max_connections: parse_env("DATABASE_MAX_CONNECTIONS")
                .unwrap_or(defaults.max_connections),
            acquire_timeout_secs: parse_env("DATABASE_ACQUIRE_TIMEOUT_SECS")
                .unwrap_or(defaults.acquire_timeout_secs),
            idle_timeout_secs: parse_env("DATABASE_IDLE_TIMEOUT_SECS")
                .unwrap_or(defaults.idle_timeout_secs),
            max_lifetime_secs: parse_env("DATABASE_MAX_LIFETIME_SECS")
                .unwrap_or(defaults.max_lifetime_secs),
            test_before_acquire: parse_env("DATABASE_TEST_BEFORE_ACQUIRE")
                .unwrap_or(defaults.test_before_acquire),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pool cannot work with
    pub fn validate(&self) -> Result<(), String> {
        if self.max_connections == 0 {
            return Err("DATABASE_MAX_CONNECTIONS must be greater than 0".to_string());
        }

        if self.acquire_timeout_secs == 0 {
            return Err("DATABASE_ACQUIRE_TIMEOUT_SECS must be greater than 0".to_string());
        }

        Ok(())
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
            url: "postgresql://localhost/scoreline".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,  // 10 minutes
            max_lifetime_secs: 1800, // 30 minutes
            test_before_acquire: true,
        }
    }
}

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_ENVIRONMENTS: [&str; 3] = ["development", "staging", "production"];

impl AppConfig {
    /// Create application config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let database = DatabaseConfig::from_env()?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Self::build(database, &log_level, &environment)
    }

    /// Assemble and validate a config from already-read values
    pub fn build(
        database: DatabaseConfig,
        log_level: &str,
        environment: &str,
    ) -> Result<Self, String> {
        let log_level = log_level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&log_level.as_str()) {
            return Err(format!(
                "Invalid LOG_LEVEL: {}. Must be one of: {:?}",
                log_level, VALID_LOG_LEVELS
            ));
        }

        let environment = environment.to_lowercase();
        if !VALID_ENVIRONMENTS.contains(&environment.as_str()) {
            return Err(format!(
                "Invalid ENVIRONMENT: {}. Must be one of: {:?}",
                environment, VALID_ENVIRONMENTS
            ));
        }

        database.validate()?;

        Ok(Self {
            database,
            log_level,
            environment,
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
            log_level: "info".to_string(),
            environment: "development".to_string(),
        }
    }
}
