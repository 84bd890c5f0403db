use crate::models::ResultValue;

/// Round to `precision` decimal digits. Negative precision rounds to
/// tens/hundreds. Non-finite values pass through unchanged.
pub fn round_to_precision(value: f64, precision: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(precision);
    (value * factor).round() / factor
}

/// Number of values in the arithmetic progression from `min` to `max`
/// (swapped if inverted) stepping by `step`. Zero when `step <= 0` or any
/// input is non-finite.
pub fn range_size(min: f64, max: f64, step: f64) -> u64 {
    if !min.is_finite() || !max.is_finite() || !step.is_finite() || step <= 0.0 {
        return 0;
    }
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    // Small epsilon so 1..10 step 3 counts the endpoint exactly
    (((hi - lo) / step + 1e-9).floor() as u64) + 1
}

/// Truncate a string to at most `max` characters, on a char boundary.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Canonicalize a pathname into a dedup key: strip query/fragment, ensure
/// a leading slash, trim the trailing slash (except for the root).
pub fn normalize_path_key(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim();
    let mut key = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    };
    while key.len() > 1 && key.ends_with('/') {
        key.pop();
    }
    key
}

/// Join values with a separator for the `formatted` result field.
pub fn format_values(values: &[ResultValue], sep: &str) -> String {
    values
        .iter()
        .map(|v| v.as_text())
        .collect::<Vec<_>>()
        .join(sep)
}
