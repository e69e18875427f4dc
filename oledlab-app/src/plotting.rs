//! This module is responsible for generating all visualizations from analysis results.

use anyhow::Result;
use oledlab_core::alignment::{self, CrossLotPeak};
use oledlab_core::correlation::RegressionReport;
use oledlab_schemas::lot::Lot;
use plotters::prelude::*;

/// How many ranked factors fit on the correlation chart before labels collide.
const MAX_BARS: usize = 15;

/// Generates a bar chart of |r| per factor, strongest first, with the critical
/// factors highlighted.
pub fn plot_correlation_ranking(output_dir: &str, regression: &RegressionReport) -> Result<()> {
    let path = format!("{}/1_correlation_ranking.png", output_dir);
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut ranked = regression.correlations.clone();
    ranked.sort_by(|a, b| b.r.abs().total_cmp(&a.r.abs()));
    ranked.truncate(MAX_BARS);
    if ranked.is_empty() {
        println!("[Plotting] Warning: no factors to plot.");
        return Ok(());
    }

    let max_abs = ranked[0].r.abs().max(0.1);
    let keys: Vec<String> = ranked.iter().map(|c| c.key.clone()).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption("Factor Correlation vs Lifetime", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(120)
        .y_label_area_size(60)
        .build_cartesian_2d(0i32..ranked.len() as i32, 0f64..max_abs * 1.1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(ranked.len())
        .x_label_formatter(&|x| keys.get(*x as usize).cloned().unwrap_or_default())
        .y_desc("|r|")
        .draw()?;

    chart.draw_series(ranked.iter().enumerate().map(|(i, corr)| {
        let critical = regression.top_factors.iter().any(|t| t.key == corr.key);
        let style = if critical { RED.filled() } else { BLUE.filled() };
        Rectangle::new([(i as i32, 0.0), (i as i32 + 1, corr.r.abs())], style)
    }))?;

    root.present()?;
    Ok(())
}

/// Generates a line chart of impurity content versus RRT, one series per lot,
/// over the non-main aligned peaks.
pub fn plot_impurity_profile(
    output_dir: &str,
    peaks: &[CrossLotPeak],
    lots: &[Lot],
) -> Result<()> {
    let path = format!("{}/2_impurity_profile.png", output_dir);

    let impurity: Vec<&CrossLotPeak> = peaks
        .iter()
        .filter(|p| !alignment::is_main_peak(p.rrt))
        .collect();
    if impurity.is_empty() || lots.is_empty() {
        println!("[Plotting] Warning: no impurity peaks to plot.");
        return Ok(());
    }

    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let min_rrt = impurity.first().unwrap().rrt;
    let max_rrt = impurity.last().unwrap().rrt;
    let max_content: f64 = impurity
        .iter()
        .flat_map(|p| p.contents.values())
        .fold(0.0, |acc: f64, v| acc.max(*v));

    let mut chart = ChartBuilder::on(&root)
        .caption("Cross-Lot Impurity Profile", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(
            min_rrt - 0.05..max_rrt + 0.05,
            0f64..(max_content * 1.1).max(0.1),
        )?;

    chart
        .configure_mesh()
        .x_desc("RRT")
        .y_desc("Content (%)")
        .draw()?;

    let colors = [RED, GREEN, BLUE, MAGENTA, CYAN, BLACK];

    for (i, lot) in lots.iter().enumerate() {
        let color = colors[i % colors.len()].clone();
        chart
            .draw_series(LineSeries::new(
                impurity
                    .iter()
                    .map(|p| (p.rrt, p.contents.get(&lot.id).cloned().unwrap_or(0.0))),
                color.stroke_width(2),
            ))?
            .label(lot.name.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}
