use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// Process-level settings: where to listen and how to log.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// `EnvFilter` directive, from `RUST_LOG`.
    pub log_level: String,
    /// Shipping logs to Loki is enabled by setting `LOKI_URL`.
    pub loki_url: Option<String>,
    pub environment: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = match lookup("HOST") {
            Some(raw) => raw
                .parse()
                .map_err(|_| format!("HOST is not a valid IP address: {}", raw))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| format!("PORT is not a valid port number: {}", raw))?,
            None => 5000,
        };

        Ok(Self {
            host,
            port,
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            loki_url: lookup("LOKI_URL").filter(|url| !url.trim().is_empty()),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Locations of the flat files the dataset is loaded from.
///
/// Every path defaults to the conventional layout under `DATA_ROOT` and can be
/// overridden individually.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub cleaned_prices_path: PathBuf,
    pub raw_prices_path: PathBuf,
    pub events_path: PathBuf,
    pub change_points_path: PathBuf,
}

impl DataConfig {
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            cleaned_prices_path: root
                .join("results")
                .join("change_point_analysis")
                .join("brent_oil_cleaned.csv"),
            raw_prices_path: root.join("data").join("raw").join("BrentOilPrices.csv"),
            events_path: root.join("results").join("events.csv"),
            change_points_path: root.join("results").join("change_point_results.json"),
        }
    }

    pub fn from_env() -> Self {
        let root = std::env::var("DATA_ROOT").unwrap_or_else(|_| ".".to_string());
        let defaults = Self::with_root(root);
        let path_or = |key: &str, fallback: PathBuf| {
            std::env::var(key).map(PathBuf::from).unwrap_or(fallback)
        };

        Self {
            cleaned_prices_path: path_or("PRICES_CLEANED_PATH", defaults.cleaned_prices_path),
            raw_prices_path: path_or("PRICES_RAW_PATH", defaults.raw_prices_path),
            events_path: path_or("EVENTS_PATH", defaults.events_path),
            change_points_path: path_or("CHANGE_POINTS_PATH", defaults.change_points_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn server_config(vars: &[(&str, &str)]) -> Result<ServerConfig, String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_server_defaults() {
        let config = server_config(&[]).unwrap();
        assert_eq!(config.addr(), SocketAddr::from(([0, 0, 0, 0], 5000)));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.loki_url, None);
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_server_overrides() {
        let config = server_config(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("RUST_LOG", "debug"),
            ("LOKI_URL", "http://loki:3100"),
            ("ENVIRONMENT", "production"),
        ])
        .unwrap();
        assert_eq!(config.addr(), SocketAddr::from(([127, 0, 0, 1], 8080)));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.loki_url.as_deref(), Some("http://loki:3100"));
        assert_eq!(config.environment, "production");
    }

    #[test]
    fn test_blank_loki_url_disables_loki() {
        let config = server_config(&[("LOKI_URL", "  ")]).unwrap();
        assert_eq!(config.loki_url, None);
    }

    #[test]
    fn test_bad_port_is_rejected() {
        let err = server_config(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.contains("PORT"));
    }

    #[test]
    fn test_with_root_layout() {
        let config = DataConfig::with_root("/srv/oil");
        assert_eq!(
            config.cleaned_prices_path,
            PathBuf::from("/srv/oil/results/change_point_analysis/brent_oil_cleaned.csv")
        );
        assert_eq!(config.raw_prices_path, PathBuf::from("/srv/oil/data/raw/BrentOilPrices.csv"));
        assert_eq!(config.events_path, PathBuf::from("/srv/oil/results/events.csv"));
        assert_eq!(
            config.change_points_path,
            PathBuf::from("/srv/oil/results/change_point_results.json")
        );
    }
}
