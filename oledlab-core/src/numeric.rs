//! Display formatters for the summary tables.

/// Rounds to one decimal place, matching what the entry forms show.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Thousands-separated rendering with a fixed number of decimals,
/// e.g. `1234567.891` with 2 decimals -> `"1,234,567.89"`.
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rendered.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

/// Abbreviated rendering for wide tables: `1234.0` -> `"1.2k"`, `3_400_000.0` ->
/// `"3.4M"`. Values under a thousand render plain with one decimal of precision.
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}k", value / 1e3)
    } else {
        format!("{}", round1(value))
    }
}
