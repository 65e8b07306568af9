use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub catalog: CatalogConfig,
    pub search: SearchConfig,
    pub geocoding: GeocodingConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

/// Which Service Catalog Store backend to run against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub backend: CatalogBackend,
    /// Present only when the backend is Postgres
    pub database: Option<DatabaseConfig>,
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

/// Urgency-to-radius policy values, in kilometers.
/// Invariant: high > medium > low, checked at load.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub radius_high_km: f64,
    pub radius_medium_km: f64,
    pub radius_low_km: f64,
}

#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
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
            catalog: CatalogConfig::from_env()?,
            search: SearchConfig::from_env()?,
            geocoding: GeocodingConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
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

impl CatalogConfig {
    pub fn from_env() -> Result<Self, String> {
        let backend = match env::var("CATALOG_BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .to_lowercase()
            .as_str()
        {
            "postgres" => CatalogBackend::Postgres,
            "memory" => CatalogBackend::Memory,
            other => {
                return Err(format!(
                    "CATALOG_BACKEND must be 'postgres' or 'memory', got '{}'",
                    other
                ))
            }
        };

        let database = match backend {
            CatalogBackend::Postgres => Some(DatabaseConfig::from_env()?),
            CatalogBackend::Memory => None,
        };

        Ok(Self { backend, database })
    }
}

impl DatabaseConfig {
    // Conservative pool defaults for small-medium deployments
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

impl SearchConfig {
    const DEFAULT_RADIUS_HIGH_KM: f64 = 50.0;
    const DEFAULT_RADIUS_MEDIUM_KM: f64 = 20.0;
    const DEFAULT_RADIUS_LOW_KM: f64 = 10.0;

    pub fn from_env() -> Result<Self, String> {
        let radius_high_km = env::var("SEARCH_RADIUS_HIGH_KM")
            .unwrap_or_else(|_| Self::DEFAULT_RADIUS_HIGH_KM.to_string())
            .parse::<f64>()
            .map_err(|_| "SEARCH_RADIUS_HIGH_KM must be a valid number".to_string())?;

        let radius_medium_km = env::var("SEARCH_RADIUS_MEDIUM_KM")
            .unwrap_or_else(|_| Self::DEFAULT_RADIUS_MEDIUM_KM.to_string())
            .parse::<f64>()
            .map_err(|_| "SEARCH_RADIUS_MEDIUM_KM must be a valid number".to_string())?;

        let radius_low_km = env::var("SEARCH_RADIUS_LOW_KM")
            .unwrap_or_else(|_| Self::DEFAULT_RADIUS_LOW_KM.to_string())
            .parse::<f64>()
            .map_err(|_| "SEARCH_RADIUS_LOW_KM must be a valid number".to_string())?;

        let config = Self {
            radius_high_km,
            radius_medium_km,
            radius_low_km,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.radius_high_km > self.radius_medium_km
            && self.radius_medium_km > self.radius_low_km)
        {
            return Err(format!(
                "Search radii must satisfy high > medium > low, got {} / {} / {}",
                self.radius_high_km, self.radius_medium_km, self.radius_low_km
            ));
        }
        if self.radius_low_km <= 0.0 {
            return Err("SEARCH_RADIUS_LOW_KM must be positive".to_string());
        }
        Ok(())
    }
}

impl GeocodingConfig {
    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("GEOCODER_BASE_URL")
            .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string());

        Ok(Self { base_url })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Helpline API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION").unwrap_or_else(|_| {
            "Location-based emergency-services lookup API".to_string()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_config_rejects_unordered_radii() {
        // Low above Medium (the 20/50/30 source variant) must fail
        let cfg = SearchConfig {
            radius_high_km: 50.0,
            radius_medium_km: 20.0,
            radius_low_km: 30.0,
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn search_config_accepts_default_radii() {
        let cfg = SearchConfig {
            radius_high_km: SearchConfig::DEFAULT_RADIUS_HIGH_KM,
            radius_medium_km: SearchConfig::DEFAULT_RADIUS_MEDIUM_KM,
            radius_low_km: SearchConfig::DEFAULT_RADIUS_LOW_KM,
        };
        assert!(cfg.validate().is_ok());
    }
}
