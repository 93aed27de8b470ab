use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{holding::HoldingInput, performance::Performance, summary::RiskLevel};

#[derive(Debug)]
pub enum DatasetError {
    Io { path: PathBuf, source: std::io::Error },
    Json(serde_json::Error),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io { path, source } => {
                write!(f, "Cannot read dataset {}: {source}", path.display())
            }
            DatasetError::Json(e) => write!(f, "Malformed dataset: {e}"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io { source, .. } => Some(source),
            DatasetError::Json(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(error: serde_json::Error) -> Self {
        DatasetError::Json(error)
    }
}

/// Source document the store is built from.
///
/// Only raw positions are read; any derived figures a file carries
/// (`value`, `gainLoss`, allocation, summary totals) are ignored and recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDataset {
    pub holdings: Vec<HoldingInput>,
    pub performance: Performance,
    pub diversification_score: f64,
    pub risk_level: RiskLevel,
}

impl PortfolioDataset {
    /// # Errors
    /// Returns `DatasetError::Json` if `json` does not describe a dataset.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    /// Returns `DatasetError` if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
