//! Correlation of derived lot factors against device lifetime.
//!
//! For every lot with a usable lifetime, a row of scalar factors is derived
//! (purity, impurity/metal/halogen totals, overall yield, plus one factor per
//! individual element and non-main peak). Each factor column is then correlated
//! against lifetime with Pearson's r and the strongest factors are surfaced.

use crate::alignment::{align_peaks, is_main_peak, CrossLotPeak};
use oledlab_schemas::{
    loose::{clean_number, coerce_number},
    lot::Lot,
};

/// Halogens tracked individually, in reporting order.
pub const HALOGEN_ELEMENTS: [&str; 3] = ["f", "cl", "br"];

/// Fewer valid lots than this and correlation math degenerates.
pub const MIN_LOTS_FOR_REGRESSION: usize = 2;

/// How many top-ranked factors are surfaced as critical.
pub const CRITICAL_FACTOR_COUNT: usize = 3;

/// One lot's derived regression row. `factors` preserves enumeration order:
/// totals group, then metals, halogens, and non-main peaks ascending by rrt.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisDataPoint {
    pub lot_id: String,
    pub lot_name: String,
    pub lifetime: f64,
    pub factors: Vec<(String, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FactorCorrelation {
    pub key: String,
    pub r: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegressionReport {
    pub points: Vec<AnalysisDataPoint>,
    /// One entry per factor, in enumeration order.
    pub correlations: Vec<FactorCorrelation>,
    /// Top factors by |r|, descending; ties keep enumeration order.
    pub top_factors: Vec<FactorCorrelation>,
    pub excluded_lots: usize,
}

/// Regression either produces a report or flags that there is not enough data.
/// Insufficient data is an expected state the UI renders, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum RegressionOutcome {
    InsufficientData { valid_lots: usize, total_lots: usize },
    Computed(RegressionReport),
}

/// Derives per-lot factors and correlates each against lifetime.
///
/// A lot is excluded before any math when its lifetime does not parse to a
/// positive number. With fewer than [`MIN_LOTS_FOR_REGRESSION`] valid lots the
/// outcome is `InsufficientData` carrying the valid/total counts.
pub fn compute_correlations(lots: &[Lot], metal_elements: &[String]) -> RegressionOutcome {
    let peaks = align_peaks(lots);
    let impurity_peaks: Vec<&CrossLotPeak> =
        peaks.iter().filter(|p| !is_main_peak(p.rrt)).collect();

    let mut points = Vec::new();
    for lot in lots {
        let Some(lifetime) = clean_number(&lot.lifetime).filter(|v| *v > 0.0) else {
            continue;
        };
        points.push(derive_factors(lot, lifetime, metal_elements, &impurity_peaks));
    }

    let total_lots = lots.len();
    let valid_lots = points.len();
    if valid_lots < MIN_LOTS_FOR_REGRESSION {
        return RegressionOutcome::InsufficientData {
            valid_lots,
            total_lots,
        };
    }

    let lifetimes: Vec<f64> = points.iter().map(|p| p.lifetime).collect();
    let factor_count = points[0].factors.len();
    let mut correlations = Vec::with_capacity(factor_count);
    for idx in 0..factor_count {
        let xs: Vec<f64> = points.iter().map(|p| p.factors[idx].1).collect();
        correlations.push(FactorCorrelation {
            key: points[0].factors[idx].0.clone(),
            r: pearson(&xs, &lifetimes),
        });
    }

    // sort_by is stable, so |r| ties fall back to enumeration order.
    let mut ranked = correlations.clone();
    ranked.sort_by(|a, b| b.r.abs().total_cmp(&a.r.abs()));
    ranked.truncate(CRITICAL_FACTOR_COUNT);

    RegressionOutcome::Computed(RegressionReport {
        points,
        correlations,
        top_factors: ranked,
        excluded_lots: total_lots - valid_lots,
    })
}

fn derive_factors(
    lot: &Lot,
    lifetime: f64,
    metal_elements: &[String],
    impurity_peaks: &[&CrossLotPeak],
) -> AnalysisDataPoint {
    let metal_total: f64 = lot.metal_results.values().map(|v| coerce_number(v)).sum();
    let halogen_total: f64 = HALOGEN_ELEMENTS
        .iter()
        .map(|el| halogen_reading(lot, el))
        .sum();
    let total_impurity: f64 = impurity_peaks
        .iter()
        .map(|p| p.contents.get(&lot.id).copied().unwrap_or(0.0))
        .sum();
    // Overall yield reuses the yields as last stored on the lot, not the cost
    // engine's recomputation.
    let overall_yield = lot.syn_yield * lot.sub_yield / 100.0;

    let mut factors = vec![
        ("purity".to_string(), coerce_number(&lot.hplc_sub)),
        ("total_impurity".to_string(), total_impurity),
        ("metal".to_string(), metal_total),
        ("halogen".to_string(), halogen_total),
        ("overall_yield".to_string(), overall_yield),
    ];
    for element in metal_elements {
        factors.push((
            format!("metal_{element}"),
            lot.metal_results
                .get(element)
                .map_or(0.0, |v| coerce_number(v)),
        ));
    }
    for element in HALOGEN_ELEMENTS {
        factors.push((format!("halogen_{element}"), halogen_reading(lot, element)));
    }
    for peak in impurity_peaks {
        factors.push((
            format!("peak_{:.2}", peak.rrt),
            peak.contents.get(&lot.id).copied().unwrap_or(0.0),
        ));
    }

    AnalysisDataPoint {
        lot_id: lot.id.clone(),
        lot_name: lot.name.clone(),
        lifetime,
        factors,
    }
}

fn halogen_reading(lot: &Lot, element: &str) -> f64 {
    lot.halogen_results
        .get(element)
        .map_or(0.0, |v| coerce_number(v))
}

/// Pearson correlation coefficient. Defined as 0 when either variable has no
/// variance, so degenerate columns never propagate NaN into the ranking.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return 0.0;
    }
    let n_f = n as f64;

    let (mut sx, mut sy, mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for i in 0..n {
        let (x, y) = (xs[i], ys[i]);
        sx += x;
        sy += y;
        sxy += x * y;
        sxx += x * x;
        syy += y * y;
    }

    let var_x = n_f * sxx - sx * sx;
    let var_y = n_f * syy - sy * sy;
    if var_x <= 0.0 || var_y <= 0.0 {
        return 0.0;
    }
    (n_f * sxy - sx * sy) / (var_x * var_y).sqrt()
}
