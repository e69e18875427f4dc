use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::Path;

mod config;
mod plotting;
mod workflow;

/// OLED lot analytics: cross-lot peak alignment, synthesis cost rollup, and
/// lifetime factor regression over a lot book.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to the analysis request file.
    #[arg(long, default_value = "oledlab-app/request.yaml")]
    request: String,
    /// Base directory for run outputs.
    #[arg(long, default_value = "./data/runs")]
    out_dir: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    println!("--- OledLab Analytics ---");

    let request = config::AnalysisRequest::load(&cli.request)?;
    let book = config::LotBook::load(&request.lot_book)?;

    let output_dir = format!(
        "{}/run_{}",
        cli.out_dir,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir))?;

    // Copy the request file to the output directory for traceability
    fs::copy(&cli.request, Path::new(&output_dir).join("request.yaml"))?;

    workflow::run_analysis(&book.lots, &request.metal_elements, &output_dir)?;

    println!("\nAnalysis complete. Results are in '{}'", output_dir);

    Ok(())
}
