use anyhow::{Context, Result};
use oledlab_core::store::{LotStore, YamlLotStore};
use oledlab_schemas::lot::Lot;
use serde::Deserialize;
use std::fs;

/// Parameters for one analysis run, loaded from `request.yaml`.
#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    /// Path to the YAML lot book to analyze.
    pub lot_book: String,
    /// Metal elements tracked individually in the regression, in report order.
    pub metal_elements: Vec<String>,
}

impl AnalysisRequest {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file '{}'", path))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse request file '{}'", path))
    }
}

/// The full set of lot documents for a run, fetched once through the store
/// boundary and treated as read-only afterwards.
pub struct LotBook {
    pub lots: Vec<Lot>,
}

impl LotBook {
    pub fn load(path: &str) -> Result<Self> {
        println!("Loading lot book from '{}'...", path);
        let store = YamlLotStore::new(path);
        let lots = store
            .fetch_lots()
            .with_context(|| format!("Failed to fetch lots from '{}'", path))?;
        println!("Lot book loaded: {} lots.", lots.len());
        Ok(Self { lots })
    }
}
