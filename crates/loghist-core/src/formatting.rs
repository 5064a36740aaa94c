use crate::models::HOURS_PER_DAY;

/// Header line printed above the hourly counts.
pub const HOURLY_HEADER: &str = "Hr: Count";

/// Render hourly counts as a `Hr: Count` header followed by one
/// `<hour>: <count>` line per hour, each line newline-terminated.
///
/// # Examples
///
/// ```
/// use loghist_core::formatting::format_hourly_counts;
///
/// let mut counts = [0u64; 24];
/// counts[3] = 7;
/// let text = format_hourly_counts(&counts);
/// let lines: Vec<&str> = text.lines().collect();
/// assert_eq!(lines.len(), 25);
/// assert_eq!(lines[0], "Hr: Count");
/// assert_eq!(lines[4], "3: 7");
/// ```
pub fn format_hourly_counts(counts: &[u64; HOURS_PER_DAY]) -> String {
    let mut out = String::with_capacity(HOURLY_HEADER.len() + 1 + HOURS_PER_DAY * 8);
    out.push_str(HOURLY_HEADER);
    out.push('\n');
    for (hour, count) in counts.iter().enumerate() {
        out.push_str(&format!("{}: {}\n", hour, count));
    }
    out
}

/// Format an integer with thousands separators.
///
/// # Examples
///
/// ```
/// use loghist_core::formatting::format_number;
///
/// assert_eq!(format_number(0), "0");
/// assert_eq!(format_number(999), "999");
/// assert_eq!(format_number(1234567), "1,234,567");
/// ```
pub fn format_number(value: u64) -> String {
    let mut groups = Vec::new();
    let mut rest = value;
    while rest >= 1000 {
        groups.push(rest % 1000);
        rest /= 1000;
    }
    let mut out = rest.to_string();
    for group in groups.iter().rev() {
        out.push_str(&format!(",{:03}", group));
    }
    out
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
///
/// # Examples
///
/// ```
/// use loghist_core::formatting::percentage;
///
/// assert!((percentage(50, 200, 1) - 25.0).abs() < 1e-9);
/// assert_eq!(percentage(0, 0, 2), 0.0);
/// ```
pub fn percentage(part: u64, whole: u64, decimal_places: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = (part as f64 / whole as f64) * 100.0;
    let factor = 10_f64.powi(decimal_places as i32);
    (raw * factor).round() / factor
}
