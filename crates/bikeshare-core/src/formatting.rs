/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let fixed = format!("{:.*}", decimals as usize, value.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    // No "-0.00".
    if value < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        out.push('-');
    }
    out.push_str(&group_digits(integer));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Format an integer count with thousands separators.
///
/// ```
/// use bikeshare_core::formatting::format_count;
///
/// assert_eq!(format_count(238_889), "238,889");
/// ```
pub fn format_count(count: usize) -> String {
    group_digits(&count.to_string())
}

/// Break a number of seconds into a compact days/hours/minutes/seconds string.
///
/// * `< 60` seconds → `"45s"`
/// * under a day → `"2h 5m 9s"` (zero components are omitted)
/// * a day or more → `"3d 4h 0m 12s"`
///
/// Fractional seconds are rounded to the nearest second.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::format_seconds;
///
/// assert_eq!(format_seconds(45.0), "45s");
/// assert_eq!(format_seconds(3600.0), "1h");
/// assert_eq!(format_seconds(7509.4), "2h 5m 9s");
/// assert_eq!(format_seconds(273_612.0), "3d 4h 0m 12s");
/// ```
pub fn format_seconds(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    if total < 60 {
        return format!("{}s", total);
    }

    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let mins = (total % 3_600) / 60;
    let secs = total % 60;

    if days > 0 {
        return format!("{}d {}h {}m {}s", days, hours, mins, secs);
    }

    let mut parts = Vec::with_capacity(3);
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if mins > 0 {
        parts.push(format!("{}m", mins));
    }
    if secs > 0 {
        parts.push(format!("{}s", secs));
    }
    parts.join(" ")
}

/// `part` as a percentage of `whole`, or `0.0` when `whole` is zero.
///
/// ```
/// use bikeshare_core::formatting::percent_of;
///
/// assert_eq!(percent_of(1, 4), 25.0);
/// assert_eq!(percent_of(3, 0), 0.0);
/// ```
pub fn percent_of(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / whole as f64
}

/// Format an hour of day (0-23) on a 12-hour clock, e.g. `17` → `"5 PM"`.
pub fn format_hour(hour: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let h = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{} {}", h, suffix)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of a digit string.
fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
