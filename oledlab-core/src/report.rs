//! CSV report writers for analysis results.

use crate::alignment::CrossLotPeak;
use crate::correlation::RegressionReport;
use crate::error::OledLabError;
use csv::Writer;
use oledlab_schemas::lot::Lot;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CorrelationRow {
    factor: String,
    r: f64,
    abs_r: f64,
    critical: bool,
}

/// Writes the aligned peak matrix: one row per cross-lot peak, one content
/// column per lot. Lots without a matching peak get an empty cell.
pub fn write_peak_table(
    path: &str,
    peaks: &[CrossLotPeak],
    lots: &[Lot],
) -> Result<(), OledLabError> {
    let mut writer =
        Writer::from_path(path).map_err(|e| OledLabError::CsvError(path.to_string(), e))?;

    let mut header = vec!["rrt".to_string()];
    header.extend(lots.iter().map(|l| l.name.clone()));
    writer
        .write_record(&header)
        .map_err(|e| OledLabError::CsvError(path.to_string(), e))?;

    for peak in peaks {
        let mut record = vec![format!("{:.3}", peak.rrt)];
        for lot in lots {
            record.push(
                peak.contents
                    .get(&lot.id)
                    .map_or(String::new(), |v| v.to_string()),
            );
        }
        writer
            .write_record(&record)
            .map_err(|e| OledLabError::CsvError(path.to_string(), e))?;
    }

    writer
        .flush()
        .map_err(|e| OledLabError::FileIO(path.to_string(), e))?;
    Ok(())
}

/// Writes the per-lot factor table the regression ran on: lot, lifetime, then
/// one column per factor in enumeration order.
pub fn write_factor_table(path: &str, report: &RegressionReport) -> Result<(), OledLabError> {
    let mut writer =
        Writer::from_path(path).map_err(|e| OledLabError::CsvError(path.to_string(), e))?;

    let mut header = vec!["lot".to_string(), "lifetime".to_string()];
    if let Some(first) = report.points.first() {
        header.extend(first.factors.iter().map(|(key, _)| key.clone()));
    }
    writer
        .write_record(&header)
        .map_err(|e| OledLabError::CsvError(path.to_string(), e))?;

    for point in &report.points {
        let mut record = vec![point.lot_name.clone(), point.lifetime.to_string()];
        record.extend(point.factors.iter().map(|(_, value)| value.to_string()));
        writer
            .write_record(&record)
            .map_err(|e| OledLabError::CsvError(path.to_string(), e))?;
    }

    writer
        .flush()
        .map_err(|e| OledLabError::FileIO(path.to_string(), e))?;
    Ok(())
}

/// Writes the factor ranking, strongest |r| first, flagging the critical ones.
pub fn write_correlation_ranking(
    path: &str,
    report: &RegressionReport,
) -> Result<(), OledLabError> {
    let mut writer =
        Writer::from_path(path).map_err(|e| OledLabError::CsvError(path.to_string(), e))?;

    let mut ranked = report.correlations.clone();
    ranked.sort_by(|a, b| b.r.abs().total_cmp(&a.r.abs()));

    for corr in &ranked {
        let row = CorrelationRow {
            factor: corr.key.clone(),
            r: corr.r,
            abs_r: corr.r.abs(),
            critical: report.top_factors.iter().any(|t| t.key == corr.key),
        };
        writer
            .serialize(row)
            .map_err(|e| OledLabError::CsvError(path.to_string(), e))?;
    }

    writer
        .flush()
        .map_err(|e| OledLabError::FileIO(path.to_string(), e))?;
    Ok(())
}
