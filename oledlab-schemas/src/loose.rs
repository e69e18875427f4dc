use serde::{Deserialize, Deserializer};

/// Strips thousands separators and whitespace, then parses.
///
/// Returns `None` for anything that is not a finite number, so callers can
/// distinguish "missing/garbage" from a genuine zero.
pub fn clean_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Like [`clean_number`], but malformed input coerces to `0.0` instead of `None`.
pub fn coerce_number(raw: &str) -> f64 {
    clean_number(raw).unwrap_or(0.0)
}

/// Serde helper for numeric fields that may arrive as a number, a numeric string
/// (possibly with commas), `null`, or not at all. Anything unparseable becomes
/// `0.0` -- a malformed cell must never fail document deserialization.
pub fn de_loose_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(v)) if v.is_finite() => v,
        Some(Raw::Text(s)) => coerce_number(&s),
        _ => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_number_strips_separators() {
        assert_eq!(clean_number("1,234.5"), Some(1234.5));
        assert_eq!(clean_number(" 98.7 "), Some(98.7));
        assert_eq!(clean_number("-0.3"), Some(-0.3));
    }

    #[test]
    fn clean_number_rejects_garbage() {
        assert_eq!(clean_number(""), None);
        assert_eq!(clean_number("n/a"), None);
        assert_eq!(clean_number("12..3"), None);
        assert_eq!(clean_number("NaN"), None);
    }

    #[test]
    fn coerce_number_defaults_to_zero() {
        assert_eq!(coerce_number("pending"), 0.0);
        assert_eq!(coerce_number("2,000"), 2000.0);
    }
}
