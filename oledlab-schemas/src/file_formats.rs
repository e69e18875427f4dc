use crate::lot::Lot;
use serde::{Deserialize, Serialize};

/// On-disk wrapper for a lot book: the full list of lot documents as fetched from
/// (or destined for) the document store.
#[derive(Debug, Serialize, Deserialize)]
pub struct LotFile {
    pub schema_version: String,
    pub lots: Vec<Lot>,
}
