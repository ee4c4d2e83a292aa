//! Display formatting shared by the dashboard payloads.

/// Formats the relative change between two window counts as `{+/-}N%`.
///
/// A previous count of zero has no meaningful ratio and is reported as `+0%`.
pub fn percent_change(current: u64, previous: u64) -> String {
    if previous == 0 {
        return "+0%".to_string();
    }
    let change = (current as f64 - previous as f64) / previous as f64 * 100.0;
    format!("{:+.0}%", change)
}

/// Confidence as a whole percentage, truncated (0.876 -> "87%").
pub fn confidence_percentage(confidence: f64) -> String {
    format!("{}%", (confidence * 100.0) as i64)
}

/// Rounds to two decimal places, ties to even on the exact binary value
/// (0.125 -> 0.12, 0.375 -> 0.38).
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Groups digits in thousands with commas (1234567 -> "1,234,567").
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
