use crate::cost::CostData;
use crate::loose::de_loose_f64;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label expected in row 0, column 0 of a well-formed HPLC grid.
pub const PARAMETER_LABEL: &str = "Parameter";

/// One manufactured and analyzed batch of material.
///
/// The `hplc_grid` is a row-major string matrix with four semantic rows
/// (`Parameter` labels, `RT`, `RRT`, `Content`) and a variable number of peak
/// columns; column 0 of every row is the row label. Rows stay aligned by column
/// index. The grid is kept as raw strings so it round-trips byte-for-byte through
/// storage; numeric interpretation happens in the analysis engines.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Lot {
    pub id: String,
    pub name: String,
    pub hplc_grid: Vec<Vec<String>>,
    /// Purity of the main component in percent, as reported by the instrument.
    pub hplc_sub: String,
    pub deuteration_rate: String,
    /// Element symbol -> reading in ppm, as entered.
    pub metal_results: HashMap<String, String>,
    /// Halogen symbol (`f`, `cl`, `br`) -> reading in ppm, as entered.
    pub halogen_results: HashMap<String, String>,
    /// Device efficiency from IVL measurement.
    pub ivl_eff: String,
    /// Device stability proxy in percent; the regression target. Kept raw because
    /// an unparseable or non-positive value excludes the lot from regression.
    pub lifetime: String,
    /// Stored synthesis yield rollup in percent (as last saved, not recomputed).
    #[serde(deserialize_with = "de_loose_f64")]
    pub syn_yield: f64,
    /// Stored purification yield rollup in percent.
    #[serde(deserialize_with = "de_loose_f64")]
    pub sub_yield: f64,
    pub cost_data: CostData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hplc_grid_round_trips_byte_for_byte() {
        let lot = Lot {
            id: "LOT-001".to_string(),
            name: "BD-121 1st".to_string(),
            hplc_grid: vec![
                vec!["Parameter".into(), "Peak 1".into(), "Peak 2".into()],
                vec!["RT".into(), "12.34".into(), "13.01".into()],
                vec!["RRT".into(), "1.00".into(), "1.054".into()],
                vec!["Content(%)".into(), "99.12".into(), " 0.43 ".into()],
            ],
            ..Lot::default()
        };

        let json = serde_json::to_string(&lot).unwrap();
        let back: Lot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hplc_grid, lot.hplc_grid);
        assert_eq!(back, lot);
    }

    #[test]
    fn loose_fields_tolerate_strings_and_nulls() {
        let doc = r#"{
            "id": "LOT-002",
            "name": "BD-121 2nd",
            "synYield": "62.5",
            "subYield": null,
            "costData": { "targetMw": "1,012.3", "steps": [] }
        }"#;
        let lot: Lot = serde_json::from_str(doc).unwrap();
        assert_eq!(lot.syn_yield, 62.5);
        assert_eq!(lot.sub_yield, 0.0);
        assert_eq!(lot.cost_data.target_mw, 1012.3);
        assert!(lot.hplc_grid.is_empty());
    }
}
