use crate::plotting;
use anyhow::Result;
use oledlab_core::{
    alignment,
    correlation::{self, RegressionOutcome},
    cost,
    numeric::{format_compact, format_thousands},
    report,
};
use oledlab_schemas::{cost::CostData, lot::Lot};
use std::path::Path;

/// Runs one full analysis over the lot book: peak alignment, per-lot cost
/// rollup, and the lifetime regression, writing reports and charts as it goes.
pub fn run_analysis(lots: &[Lot], metal_elements: &[String], output_dir: &str) -> Result<()> {
    println!(
        "\n--- [Workflow] Aligning impurity peaks across {} lots ---",
        lots.len()
    );
    let peaks = alignment::align_peaks(lots);
    let impurity_count = peaks
        .iter()
        .filter(|p| !alignment::is_main_peak(p.rrt))
        .count();
    println!(
        "Found {} peak clusters ({} impurity, {} in the main-peak band).",
        peaks.len(),
        impurity_count,
        peaks.len() - impurity_count
    );

    let peak_table = Path::new(output_dir).join("peak_table.csv");
    report::write_peak_table(peak_table.to_str().unwrap(), &peaks, lots)?;

    print_cost_summary(lots);

    println!("\n--- [Workflow] Correlating factors against lifetime ---");
    let outcome = correlation::compute_correlations(lots, metal_elements);
    match &outcome {
        RegressionOutcome::InsufficientData {
            valid_lots,
            total_lots,
        } => {
            println!(
                "Insufficient data for regression: {} of {} lots have a usable lifetime \
                 (at least {} required).",
                valid_lots,
                total_lots,
                correlation::MIN_LOTS_FOR_REGRESSION
            );
        }
        RegressionOutcome::Computed(regression) => {
            if regression.excluded_lots > 0 {
                println!(
                    "Excluded {} lots without a positive, parseable lifetime.",
                    regression.excluded_lots
                );
            }
            println!("Critical factors (by |r| against lifetime):");
            for (rank, factor) in regression.top_factors.iter().enumerate() {
                println!("  {}. {:<16} r = {:+.3}", rank + 1, factor.key, factor.r);
            }

            let factor_table = Path::new(output_dir).join("factor_table.csv");
            report::write_factor_table(factor_table.to_str().unwrap(), regression)?;
            let ranking = Path::new(output_dir).join("correlation_ranking.csv");
            report::write_correlation_ranking(ranking.to_str().unwrap(), regression)?;

            plotting::plot_correlation_ranking(output_dir, regression)?;
        }
    }

    plotting::plot_impurity_profile(output_dir, &peaks, lots)?;

    Ok(())
}

/// Recomputes every lot's mole chain and prints the cost rollup table.
fn print_cost_summary(lots: &[Lot]) {
    println!("\n--- [Workflow] Synthesis cost rollup ---");
    for lot in lots {
        let cost_data = CostData {
            steps: cost::recalculate_mols(&lot.cost_data.steps),
            ..lot.cost_data.clone()
        };
        let metrics = cost::calculate_lot_metrics(&cost_data);
        println!(
            "  - {:<16} | syn {:>5.1}% | sub {:>5.1}% | output {:>10} g | unit cost {:>8}/g",
            lot.name,
            metrics.syn_yield,
            metrics.sub_yield,
            format_thousands(metrics.actual_output, 1),
            format_compact(metrics.unit_cost)
        );
    }
}
