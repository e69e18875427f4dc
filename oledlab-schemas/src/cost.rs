use crate::loose::de_loose_f64;
use serde::{Deserialize, Serialize};

/// One synthesis-cost simulation attached to a lot.
///
/// `steps` are causally ordered: step 0 is the root/limiting step and every later
/// step's limiting quantity derives from the yields upstream of it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CostData {
    /// Target molecular weight of the final product in g/mol.
    #[serde(deserialize_with = "de_loose_f64")]
    pub target_mw: f64,
    #[serde(deserialize_with = "de_loose_f64")]
    pub process_cost_per_day: f64,
    #[serde(deserialize_with = "de_loose_f64")]
    pub process_days: f64,
    /// First post-synthesis purification yield in percent.
    #[serde(deserialize_with = "de_loose_f64")]
    pub sub_yield1: f64,
    /// Second post-synthesis purification yield in percent.
    #[serde(deserialize_with = "de_loose_f64")]
    pub sub_yield2: f64,
    pub steps: Vec<Step>,
}

/// One synthetic transformation. `materials[0]` is the limiting reagent; the
/// others are dosed in equivalents relative to it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Step {
    pub name: String,
    /// Step yield in percent, 0-100.
    #[serde(rename = "yield", deserialize_with = "de_loose_f64")]
    pub yield_pct: f64,
    pub materials: Vec<Material>,
}

/// One reagent line item in a synthesis step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Material {
    pub name: String,
    /// Molecular weight in g/mol.
    #[serde(deserialize_with = "de_loose_f64")]
    pub mw: f64,
    /// Purchase price per kilogram.
    #[serde(deserialize_with = "de_loose_f64")]
    pub price: f64,
    /// Equivalents relative to the step's limiting reagent.
    #[serde(deserialize_with = "de_loose_f64")]
    pub eq: f64,
    /// Molar amount; derived everywhere except the absolute root material.
    #[serde(deserialize_with = "de_loose_f64")]
    pub mol: f64,
}
