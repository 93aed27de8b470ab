use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use color_eyre::{
    Result,
    eyre::{WrapErr, eyre},
};
use domain::PortfolioDataset;
use tracing::info;

lazy_static::lazy_static! {
    pub static ref PROJECT_NAME: String = String::from("Folio").to_uppercase();
    pub static ref DATASET_ENV: String = format!("{}_DATASET", PROJECT_NAME.clone());
    pub static ref HOST_ENV: String = format!("{}_HOST", PROJECT_NAME.clone());
    pub static ref STATIC_DIR_ENV: String = format!("{}_STATIC_DIR", PROJECT_NAME.clone());
    pub static ref LOG_FORMAT_ENV: String = format!("{}_LOG_FORMAT", PROJECT_NAME.clone());
}

pub const DEFAULT_PORT: u16 = 3001;
const DATASET_FILE: &str = "portfolio.json";

/// Get the data directory for the application
pub fn get_data_dir() -> PathBuf {
    let project_name = PROJECT_NAME.clone().to_lowercase();

    if let Ok(data_dir) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(data_dir).join(&project_name)
    } else if let Ok(home_dir) = std::env::var("HOME") {
        PathBuf::from(home_dir)
            .join(".local")
            .join("share")
            .join(&project_name)
    } else {
        // Fallback to current directory if no home directory is found
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(&project_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    File(PathBuf),
    Sample,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub dataset: DatasetSource,
    /// Built frontend to serve next to the API.
    pub static_dir: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Config {
    /// Reads `.env` (if any) and the process environment.
    /// # Errors
    /// Returns an error if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self> {
        // A missing .env file is the common case.
        let _ = dotenvy::dotenv();
        let default_dataset = get_data_dir().join(DATASET_FILE);
        Self::from_vars(|key| std::env::var(key).ok(), default_dataset)
    }

    /// Builds the configuration from `var`; `default_dataset` is used when it exists
    /// and no dataset is configured explicitly.
    /// # Errors
    /// Returns an error if a variable is set to an unparsable value.
    pub fn from_vars<F>(var: F, default_dataset: PathBuf) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match var("PORT") {
            Some(port) => port
                .parse::<u16>()
                .wrap_err_with(|| format!("PORT={port} is not a valid port"))?,
            None => DEFAULT_PORT,
        };
        let host = match var(HOST_ENV.as_str()) {
            Some(host) => host
                .parse::<IpAddr>()
                .wrap_err_with(|| format!("{}={host} is not an IP address", *HOST_ENV))?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        let dataset = match var(DATASET_ENV.as_str()) {
            Some(path) => DatasetSource::File(PathBuf::from(path)),
            None if default_dataset.is_file() => DatasetSource::File(default_dataset),
            None => DatasetSource::Sample,
        };

        let log_format = match var(LOG_FORMAT_ENV.as_str()).as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(eyre!(
                    "{}={other} is not supported, use text or json",
                    *LOG_FORMAT_ENV
                ));
            }
        };

        Ok(Self {
            listen_addr: SocketAddr::new(host, port),
            dataset,
            static_dir: var(STATIC_DIR_ENV.as_str()).map(PathBuf::from),
            log_format,
        })
    }

    /// # Errors
    /// Returns an error if the configured dataset file cannot be read or parsed.
    pub fn load_dataset(&self) -> Result<PortfolioDataset> {
        match &self.dataset {
            DatasetSource::File(path) => {
                info!("Loading portfolio dataset from {}", path.display());
                PortfolioDataset::from_path(path)
                    .wrap_err_with(|| format!("failed to load dataset {}", path.display()))
            }
            DatasetSource::Sample => {
                info!("Using built-in sample portfolio");
                Ok(PortfolioDataset::sample())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_vars(
            |key| vars.get(key).cloned(),
            PathBuf::from("/nonexistent/folio/portfolio.json"),
        )
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:3001".parse().unwrap());
        assert_eq!(config.dataset, DatasetSource::Sample);
        assert_eq!(config.static_dir, None);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("FOLIO_HOST", "0.0.0.0"),
            ("FOLIO_DATASET", "/srv/portfolio.json"),
            ("FOLIO_STATIC_DIR", "client/build"),
            ("FOLIO_LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(
            config.dataset,
            DatasetSource::File(PathBuf::from("/srv/portfolio.json"))
        );
        assert_eq!(config.static_dir, Some(PathBuf::from("client/build")));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config_from(&[("PORT", "http")]).is_err());
        assert!(config_from(&[("FOLIO_HOST", "localhost:80")]).is_err());
        assert!(config_from(&[("FOLIO_LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn test_sample_dataset_loads() {
        let config = config_from(&[]).unwrap();
        let dataset = config.load_dataset().unwrap();
        assert_eq!(dataset.holdings.len(), 12);
    }

    #[test]
    fn test_missing_dataset_file_fails() {
        let config = config_from(&[("FOLIO_DATASET", "/nonexistent/data.json")]).unwrap();
        assert!(config.load_dataset().is_err());
    }
}
