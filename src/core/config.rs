use std::env;

use crate::modules::proximity::{DistanceUnit, DEFAULT_PROXIMITY_THRESHOLD};

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub swagger: SwaggerConfig,
    pub matching: MatchingConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Proximity matching parameters
///
/// The threshold is expressed in `distance_unit`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingConfig {
    pub proximity_threshold: f64,
    pub distance_unit: DistanceUnit,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            matching: MatchingConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    // Default values for database connection pool (conservative defaults for small-medium apps)
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Freightmatch API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION").unwrap_or_else(|_| {
            "Vehicles, shipments and proximity matching between them".to_string()
        });

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl MatchingConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::parse(
            env::var("PROXIMITY_THRESHOLD").ok(),
            env::var("DISTANCE_UNIT").ok(),
        )
    }

    /// Build from raw values; `None` or blank falls back to the defaults.
    pub fn parse(threshold: Option<String>, unit: Option<String>) -> Result<Self, String> {
        let proximity_threshold = match threshold.filter(|s| !s.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|_| "PROXIMITY_THRESHOLD must be a valid number".to_string())?,
            None => DEFAULT_PROXIMITY_THRESHOLD,
        };

        if !proximity_threshold.is_finite() || proximity_threshold <= 0.0 {
            return Err("PROXIMITY_THRESHOLD must be a positive number".to_string());
        }

        let distance_unit = match unit.filter(|s| !s.trim().is_empty()) {
            Some(raw) => raw
                .parse::<DistanceUnit>()
                .map_err(|e| format!("DISTANCE_UNIT: {}", e))?,
            None => DistanceUnit::default(),
        };

        Ok(Self {
            proximity_threshold,
            distance_unit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_config_defaults() {
        let config = MatchingConfig::parse(None, None).unwrap();
        assert_eq!(config.proximity_threshold, 450.0);
        assert_eq!(config.distance_unit, DistanceUnit::Miles);

        let blank = MatchingConfig::parse(Some("  ".to_string()), Some(String::new())).unwrap();
        assert_eq!(blank, config);
    }

    #[test]
    fn test_matching_config_overrides() {
        let config =
            MatchingConfig::parse(Some("724.2".to_string()), Some("km".to_string())).unwrap();
        assert_eq!(config.proximity_threshold, 724.2);
        assert_eq!(config.distance_unit, DistanceUnit::Kilometers);
    }

    #[test]
    fn test_matching_config_rejects_invalid_threshold() {
        assert!(MatchingConfig::parse(Some("far".to_string()), None).is_err());
        assert!(MatchingConfig::parse(Some("0".to_string()), None).is_err());
        assert!(MatchingConfig::parse(Some("-5".to_string()), None).is_err());
        assert!(MatchingConfig::parse(Some("inf".to_string()), None).is_err());
    }

    #[test]
    fn test_matching_config_rejects_unknown_unit() {
        let err = MatchingConfig::parse(None, Some("leagues".to_string())).unwrap_err();
        assert!(err.contains("leagues"));
    }

    #[test]
    fn test_swagger_credentials() {
        let mut swagger = SwaggerConfig {
            username: Some("admin".to_string()),
            password: None,
            title: String::new(),
            version: String::new(),
            description: String::new(),
        };
        assert_eq!(swagger.credentials(), None);

        swagger.password = Some("secret".to_string());
        assert_eq!(swagger.credentials(), Some("admin:secret".to_string()));
    }
}
