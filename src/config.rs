use crate::database::IdStrategy;
use crate::utils::error::ErrorStatusPolicy;
use std::env;
use std::path::PathBuf;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_USERS_FILE: &str = "data/users.json";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Runtime settings, read from the environment after `.env` is loaded.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub users_file: PathBuf,
    pub id_strategy: IdStrategy,
    pub write_failure_status: ErrorStatusPolicy,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Invalid values fall back to the default and log a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                log::warn!("⚠️  Invalid PORT {:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let users_file = lookup("USERS_FILE")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_USERS_FILE));

        let id_strategy = match lookup("USER_ID_STRATEGY") {
            Some(raw) => IdStrategy::parse(&raw).unwrap_or_else(|| {
                log::warn!("⚠️  Unknown USER_ID_STRATEGY {:?}, using length", raw);
                IdStrategy::default()
            }),
            None => IdStrategy::default(),
        };

        let write_failure_status = match lookup("WRITE_FAILURE_STATUS") {
            Some(raw) => ErrorStatusPolicy::parse(&raw).unwrap_or_else(|| {
                log::warn!("⚠️  Unknown WRITE_FAILURE_STATUS {:?}, using conventional", raw);
                ErrorStatusPolicy::default()
            }),
            None => ErrorStatusPolicy::default(),
        };

        let cors_allowed_origins: Vec<String> = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .filter(|origins: &Vec<String>| !origins.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_CORS_ORIGIN.to_string()]);

        Self {
            host,
            port,
            users_file,
            id_strategy,
            write_failure_status,
            cors_allowed_origins,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.bind_address(), "localhost:4000");
        assert_eq!(config.users_file, PathBuf::from("data/users.json"));
        assert_eq!(config.id_strategy, IdStrategy::CollectionLength);
        assert_eq!(config.write_failure_status, ErrorStatusPolicy::Conventional);
        assert_eq!(config.cors_allowed_origins, vec!["http://localhost:3000".to_string()]);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("USERS_FILE", "/tmp/u.json"),
            ("USER_ID_STRATEGY", "max"),
            ("WRITE_FAILURE_STATUS", "legacy"),
            ("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test,"),
        ]);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.users_file, PathBuf::from("/tmp/u.json"));
        assert_eq!(config.id_strategy, IdStrategy::HighestPlusOne);
        assert_eq!(config.write_failure_status, ErrorStatusPolicy::Legacy);
        assert_eq!(config.cors_allowed_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("PORT", "not-a-port"),
            ("USER_ID_STRATEGY", "uuid"),
            ("WRITE_FAILURE_STATUS", "418"),
            ("CORS_ALLOWED_ORIGINS", " , "),
        ]);
        assert_eq!(config.port, 4000);
        assert_eq!(config.id_strategy, IdStrategy::CollectionLength);
        assert_eq!(config.write_failure_status, ErrorStatusPolicy::Conventional);
        assert_eq!(config.cors_allowed_origins, vec!["http://localhost:3000".to_string()]);
    }
}
