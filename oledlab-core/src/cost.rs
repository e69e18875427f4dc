//! Synthesis cost and yield rollup.
//!
//! Two pure transforms over a lot's `CostData`: forward propagation of molar
//! quantities through the step chain, and the yield/output/unit-cost rollup the
//! cost table displays. Both recompute from scratch on every call; there is no
//! incremental path.

use crate::numeric::round1;
use oledlab_schemas::cost::{CostData, Step};

/// Rolled-up metrics for one cost simulation. Yields and output mass carry the
/// display rounding (one decimal); `unit_cost` is rounded to the nearest whole
/// currency unit.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LotMetrics {
    /// Product of step yields, percent.
    pub syn_yield: f64,
    /// Product of the two purification yields, percent.
    pub sub_yield: f64,
    /// (material cost + process cost) per gram of actual output.
    pub unit_cost: f64,
    /// Grams of product after all yields.
    pub actual_output: f64,
    /// Grams of product at 100% yield.
    pub theoretical_output: f64,
}

/// Back-computes the root limiting mol from a target theoretical output mass.
pub fn back_solve_root_mol(target_output_g: f64, target_mw: f64) -> f64 {
    if target_mw == 0.0 {
        0.0
    } else {
        target_output_g / target_mw
    }
}

/// Propagates molar quantities through the step chain.
///
/// Step 0's limiting material mol is the authoritative input. For every later
/// step the limiting mol is the root mol scaled by the yields of all steps before
/// it, and that material's equivalents are forced to 1.0. Non-limiting materials
/// are dosed as `limiting mol x eq`.
pub fn recalculate_mols(steps: &[Step]) -> Vec<Step> {
    let mut steps = steps.to_vec();
    let root_mol = steps
        .first()
        .and_then(|s| s.materials.first())
        .map_or(0.0, |m| m.mol);

    let mut upstream_yield = 1.0;
    for (i, step) in steps.iter_mut().enumerate() {
        let limiting_mol = if i == 0 {
            root_mol
        } else {
            let mol = root_mol * upstream_yield;
            if let Some(limiting) = step.materials.first_mut() {
                limiting.mol = mol;
                limiting.eq = 1.0;
            }
            mol
        };

        for material in step.materials.iter_mut().skip(1) {
            material.mol = limiting_mol * material.eq;
        }

        upstream_yield *= step.yield_pct / 100.0;
    }
    steps
}

/// Rolls a cost simulation up into yields, output mass, and unit cost.
///
/// An empty step list returns all-zero metrics. Unit cost is defined as 0 when
/// the actual output mass is 0, so a blank or degenerate recipe never renders
/// NaN into the form.
pub fn calculate_lot_metrics(cost: &CostData) -> LotMetrics {
    if cost.steps.is_empty() {
        return LotMetrics::default();
    }

    let syn_fraction: f64 = cost.steps.iter().map(|s| s.yield_pct / 100.0).product();
    let sub1 = cost.sub_yield1 / 100.0;
    let sub2 = cost.sub_yield2 / 100.0;
    let total_yield = syn_fraction * sub1 * sub2;

    let root_mol = cost
        .steps
        .first()
        .and_then(|s| s.materials.first())
        .map_or(0.0, |m| m.mol);
    let theoretical_grams = root_mol * cost.target_mw;
    // Unrounded grams feed the cost division; rounding is display-only.
    let actual_grams = theoretical_grams * total_yield;

    let material_cost: f64 = cost
        .steps
        .iter()
        .flat_map(|s| s.materials.iter())
        .map(|m| (m.mol * m.mw / 1000.0) * m.price)
        .sum();
    let process_cost = cost.process_cost_per_day * cost.process_days;

    let unit_cost = if actual_grams == 0.0 || !actual_grams.is_finite() {
        0.0
    } else {
        ((material_cost + process_cost) / actual_grams).round()
    };

    LotMetrics {
        syn_yield: round1(syn_fraction * 100.0),
        sub_yield: round1(sub1 * sub2 * 100.0),
        unit_cost,
        actual_output: round1(actual_grams),
        theoretical_output: theoretical_grams,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oledlab_schemas::cost::Material;

    fn material(name: &str, mw: f64, price: f64, eq: f64, mol: f64) -> Material {
        Material {
            name: name.to_string(),
            mw,
            price,
            eq,
            mol,
        }
    }

    fn step(name: &str, yield_pct: f64, materials: Vec<Material>) -> Step {
        Step {
            name: name.to_string(),
            yield_pct,
            materials,
        }
    }

    #[test]
    fn mols_propagate_through_yields() {
        let steps = vec![
            step(
                "coupling",
                50.0,
                vec![
                    material("SM-1", 250.0, 800.0, 1.0, 10.0),
                    material("boronic acid", 122.0, 300.0, 1.2, 0.0),
                ],
            ),
            step(
                "cyclization",
                80.0,
                vec![
                    material("intermediate", 360.0, 0.0, 3.0, 0.0),
                    material("catalyst", 915.0, 12000.0, 2.0, 0.0),
                ],
            ),
        ];

        let out = recalculate_mols(&steps);

        // Step 1 limiting mol = 10 * 50% and its eq is forced to 1.0.
        assert_eq!(out[1].materials[0].mol, 5.0);
        assert_eq!(out[1].materials[0].eq, 1.0);
        // Non-limiting materials follow the step's limiting mol.
        assert_eq!(out[0].materials[1].mol, 12.0);
        assert_eq!(out[1].materials[1].mol, 10.0);
        // The root is left untouched.
        assert_eq!(out[0].materials[0].mol, 10.0);
        assert_eq!(out[0].materials[0].eq, 1.0);
    }

    #[test]
    fn recalculate_is_a_full_top_down_recompute() {
        let steps = vec![
            step("s0", 40.0, vec![material("a", 100.0, 0.0, 1.0, 2.0)]),
            step("s1", 50.0, vec![material("b", 100.0, 0.0, 7.0, 99.0)]),
            step("s2", 100.0, vec![material("c", 100.0, 0.0, 1.0, 99.0)]),
        ];
        let out = recalculate_mols(&steps);
        assert_eq!(out[1].materials[0].mol, 0.8);
        // s2 limiting mol = 2 * 0.4 * 0.5, stale values are overwritten.
        assert_eq!(out[2].materials[0].mol, 0.4);
    }

    #[test]
    fn single_step_unit_cost_round_trip() {
        let cost = CostData {
            target_mw: 100.0,
            sub_yield1: 100.0,
            sub_yield2: 100.0,
            steps: vec![step(
                "only",
                100.0,
                vec![material("SM", 100.0, 1000.0, 1.0, 1.0)],
            )],
            ..CostData::default()
        };
        let metrics = calculate_lot_metrics(&cost);
        assert_eq!(metrics.theoretical_output, 100.0);
        assert_eq!(metrics.actual_output, 100.0);
        assert_eq!(metrics.syn_yield, 100.0);
        assert_eq!(metrics.sub_yield, 100.0);
        // (1 mol * 100 g/mol / 1000) kg * 1000 /kg = 100; 100 / 100 g = 1.
        assert_eq!(metrics.unit_cost, 1.0);
    }

    #[test]
    fn process_overhead_enters_unit_cost() {
        let cost = CostData {
            target_mw: 500.0,
            process_cost_per_day: 1200.0,
            process_days: 5.0,
            sub_yield1: 80.0,
            sub_yield2: 50.0,
            steps: vec![step(
                "only",
                50.0,
                vec![material("SM", 200.0, 2000.0, 1.0, 2.0)],
            )],
            ..CostData::default()
        };
        let metrics = calculate_lot_metrics(&cost);
        // theoretical = 2 * 500 = 1000 g; total yield = 0.5 * 0.8 * 0.5 = 0.2.
        assert_eq!(metrics.theoretical_output, 1000.0);
        assert_eq!(metrics.actual_output, 200.0);
        // materials = (2 * 200 / 1000) * 2000 = 800; process = 6000.
        assert_eq!(metrics.unit_cost, 34.0);
    }

    #[test]
    fn empty_steps_yield_zeroed_metrics() {
        let cost = CostData {
            target_mw: 450.0,
            sub_yield1: 90.0,
            sub_yield2: 90.0,
            ..CostData::default()
        };
        let metrics = calculate_lot_metrics(&cost);
        assert_eq!(metrics, LotMetrics::default());
    }

    #[test]
    fn zero_output_defines_unit_cost_as_zero() {
        let cost = CostData {
            target_mw: 300.0,
            sub_yield1: 100.0,
            sub_yield2: 100.0,
            steps: vec![step(
                "dead",
                0.0,
                vec![material("SM", 150.0, 500.0, 1.0, 1.0)],
            )],
            ..CostData::default()
        };
        let metrics = calculate_lot_metrics(&cost);
        assert_eq!(metrics.actual_output, 0.0);
        assert_eq!(metrics.unit_cost, 0.0);
        assert!(metrics.unit_cost.is_finite());
    }

    #[test]
    fn steps_without_materials_do_not_panic() {
        let cost = CostData {
            target_mw: 300.0,
            steps: vec![step("empty", 75.0, vec![])],
            ..CostData::default()
        };
        let metrics = calculate_lot_metrics(&cost);
        assert_eq!(metrics.unit_cost, 0.0);
        assert_eq!(metrics.syn_yield, 75.0);

        let out = recalculate_mols(&cost.steps);
        assert!(out[0].materials.is_empty());
    }

    #[test]
    fn back_solving_the_root_mol() {
        assert_eq!(back_solve_root_mol(500.0, 250.0), 2.0);
        assert_eq!(back_solve_root_mol(500.0, 0.0), 0.0);
    }
}
