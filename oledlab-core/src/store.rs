//! Boundary to the document store.
//!
//! The numeric engines only ever see in-memory records; everything remote is
//! hidden behind [`LotStore`]. The cloud-backed implementation lives in the
//! hosting application; [`YamlLotStore`] is the local file-backed one used by
//! the CLI and by tests.

use crate::error::OledLabError;
use oledlab_schemas::{file_formats::LotFile, lot::Lot};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOT_FILE_SCHEMA_VERSION: &str = "1.0";

/// Opaque persistence boundary: fetch the full lot list, persist the full lot
/// list (last write wins), and upload a binary blob in exchange for a reference.
pub trait LotStore {
    fn fetch_lots(&self) -> Result<Vec<Lot>, OledLabError>;
    fn persist_lots(&self, lots: &[Lot]) -> Result<(), OledLabError>;
    fn upload_blob(&self, name: &str, bytes: &[u8]) -> Result<String, OledLabError>;
}

/// Lot store over a single YAML lot book on disk.
pub struct YamlLotStore {
    lot_file: PathBuf,
}

impl YamlLotStore {
    pub fn new<P: Into<PathBuf>>(lot_file: P) -> Self {
        Self {
            lot_file: lot_file.into(),
        }
    }

    fn display_path(&self) -> String {
        self.lot_file.display().to_string()
    }
}

impl LotStore for YamlLotStore {
    fn fetch_lots(&self) -> Result<Vec<Lot>, OledLabError> {
        let content = fs::read_to_string(&self.lot_file)
            .map_err(|e| OledLabError::FileIO(self.display_path(), e))?;
        let file: LotFile = serde_yaml::from_str(&content)
            .map_err(|e| OledLabError::YamlParsing(self.display_path(), e))?;
        Ok(file.lots)
    }

    fn persist_lots(&self, lots: &[Lot]) -> Result<(), OledLabError> {
        let file = LotFile {
            schema_version: LOT_FILE_SCHEMA_VERSION.to_string(),
            lots: lots.to_vec(),
        };
        let content = serde_yaml::to_string(&file)
            .map_err(|e| OledLabError::YamlWriting(self.display_path(), e))?;
        fs::write(&self.lot_file, content)
            .map_err(|e| OledLabError::FileIO(self.display_path(), e))?;
        Ok(())
    }

    fn upload_blob(&self, name: &str, bytes: &[u8]) -> Result<String, OledLabError> {
        let blob_dir = self
            .lot_file
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("blobs");
        fs::create_dir_all(&blob_dir)
            .map_err(|e| OledLabError::FileIO(blob_dir.display().to_string(), e))?;
        let blob_path = blob_dir.join(name);
        fs::write(&blob_path, bytes)
            .map_err(|e| OledLabError::FileIO(blob_path.display().to_string(), e))?;
        Ok(format!("blobs/{name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lot_book_yaml_round_trips_the_hplc_grid() {
        let lot = Lot {
            id: "LOT-001".to_string(),
            name: "BD-121 1st".to_string(),
            hplc_grid: vec![
                vec!["Parameter".into(), "Peak 1".into()],
                vec!["RT".into(), "12.34".into()],
                vec!["RRT".into(), "1.00".into()],
                vec!["Content(%)".into(), " 99.12 ".into()],
            ],
            lifetime: "105".to_string(),
            ..Lot::default()
        };
        let file = LotFile {
            schema_version: LOT_FILE_SCHEMA_VERSION.to_string(),
            lots: vec![lot],
        };

        let yaml = serde_yaml::to_string(&file).unwrap();
        let back: LotFile = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.lots[0].hplc_grid, file.lots[0].hplc_grid);
        assert_eq!(back.lots[0].lifetime, "105");
    }
}
