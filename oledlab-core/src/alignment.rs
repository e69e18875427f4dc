//! Cross-lot impurity peak alignment.
//!
//! Each lot carries an HPLC grid with one retention-time observation per column.
//! Alignment merges peaks that represent the same compound across lots by relative
//! retention time, producing a single ordered peak set the correlation engine and
//! the reports work from.

use oledlab_schemas::{loose::clean_number, lot::Lot};
use std::collections::HashMap;

/// Absolute RRT distance within which two peaks count as the same compound.
pub const RRT_TOLERANCE: f64 = 0.05;

/// Peaks inside this band are conventionally the main product peak. Callers
/// exclude them from impurity sums; alignment itself never filters.
pub const MAIN_PEAK_BAND: (f64, f64) = (0.95, 1.05);

/// One merged peak cluster across lots. Not persisted; recomputed on every read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossLotPeak {
    /// Representative relative retention time. Fixed at the first-seen value;
    /// absorbing more observations never recenters it.
    pub rrt: f64,
    /// Lot id -> observed content percent. A lot with no matching peak is absent.
    pub contents: HashMap<String, f64>,
}

pub fn is_main_peak(rrt: f64) -> bool {
    rrt >= MAIN_PEAK_BAND.0 && rrt <= MAIN_PEAK_BAND.1
}

/// Merges every lot's peak observations into one cluster list, sorted ascending
/// by representative RRT.
///
/// Cluster assignment is first-match in cluster creation order, not best-match:
/// an observation joins the earliest cluster with any absorbed observation within
/// [`RRT_TOLERANCE`], so a peak near the boundary of two close clusters depends on
/// lot processing order. Given a fixed lot order the result is fully deterministic.
///
/// Malformed input degrades silently: a grid with fewer than 4 rows or without an
/// `RRT`/`Content` row contributes no peaks, and a column whose RRT is negative or
/// unparseable (or whose content does not parse) is skipped.
pub fn align_peaks(lots: &[Lot]) -> Vec<CrossLotPeak> {
    // Matching walks every observation a cluster has absorbed, so a run of peaks
    // spaced under the tolerance chains into one cluster even when its extremes
    // are further apart. The reported rrt stays the first-seen value.
    struct Cluster {
        representative: f64,
        observed_rrts: Vec<f64>,
        contents: HashMap<String, f64>,
    }

    let mut clusters: Vec<Cluster> = Vec::new();

    for lot in lots {
        let Some((rrt_row, content_row)) = locate_rows(&lot.hplc_grid) else {
            continue;
        };

        // Column 0 is the row label.
        for col in 1..rrt_row.len() {
            let Some(rrt) = clean_number(&rrt_row[col]) else {
                continue;
            };
            if rrt < 0.0 {
                continue;
            }
            let Some(content) = content_row.get(col).and_then(|cell| clean_number(cell))
            else {
                continue;
            };

            let hit = clusters.iter_mut().find(|c| {
                c.observed_rrts
                    .iter()
                    .any(|seen| (seen - rrt).abs() <= RRT_TOLERANCE)
            });
            match hit {
                Some(cluster) => {
                    cluster.observed_rrts.push(rrt);
                    cluster.contents.insert(lot.id.clone(), content);
                }
                None => {
                    let mut contents = HashMap::new();
                    contents.insert(lot.id.clone(), content);
                    clusters.push(Cluster {
                        representative: rrt,
                        observed_rrts: vec![rrt],
                        contents,
                    });
                }
            }
        }
    }

    let mut peaks: Vec<CrossLotPeak> = clusters
        .into_iter()
        .map(|c| CrossLotPeak {
            rrt: c.representative,
            contents: c.contents,
        })
        .collect();
    peaks.sort_by(|a, b| a.rrt.total_cmp(&b.rrt));
    peaks
}

/// Finds the RRT row (label equals `RRT`, case-insensitive) and the content row
/// (label contains `Content`). Returns `None` for grids that cannot be aligned.
fn locate_rows(grid: &[Vec<String>]) -> Option<(&Vec<String>, &Vec<String>)> {
    if grid.len() < 4 {
        return None;
    }
    let rrt_row = grid.iter().find(|row| {
        row.first()
            .map_or(false, |label| label.trim().eq_ignore_ascii_case("rrt"))
    })?;
    let content_row = grid
        .iter()
        .find(|row| row.first().map_or(false, |label| label.contains("Content")))?;
    Some((rrt_row, content_row))
}
