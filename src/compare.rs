/// Relative change from `previous` to `current`, in percent.
///
/// A zero baseline yields 0 rather than an infinite rate, so a metric that
/// appears for the first time reads as unchanged.
pub fn percentage_change(previous: f64, current: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    ((current - previous) / previous) * 100.0
}

/// Renders a change as a whole-number percentage with an explicit `+` for
/// growth, e.g. `+12%`, `-3%`, `0%`. A decline that rounds to zero keeps its
/// sign and reads `-0%`.
pub fn format_change(change: f64) -> String {
    let sign = if change > 0.0 {
        "+"
    } else if change < 0.0 {
        "-"
    } else {
        ""
    };
    format!("{sign}{:.0}%", change.abs().round())
}

pub fn change_between(previous: f64, current: f64) -> String {
    format_change(percentage_change(previous, current))
}

/// Rounds to a fixed number of decimals using the exact decimal expansion
/// of `value`, with exact ties going away from zero. `121.0 / 40.0` is
/// stored just below 3.025 and rounds to 3.02 at two decimals.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() || value.abs() >= 1e21 {
        return value;
    }

    // 1100 fractional digits is enough to print any f64 exactly.
    let exact = format!("{:.1100}", value.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let kept = &fraction[..decimals.min(fraction.len())];
    let round_up = fraction
        .as_bytes()
        .get(decimals)
        .is_some_and(|digit| *digit >= b'5');

    let mut digits: u128 = match format!("{whole}{kept}").parse() {
        Ok(digits) => digits,
        Err(_) => return value,
    };
    if round_up {
        digits += 1;
    }

    let mut text = format!("{digits:0>width$}", width = decimals + 1);
    if decimals > 0 {
        text.insert(text.len() - decimals, '.');
    }
    let rounded: f64 = text.parse().unwrap_or(value.abs());
    if value.is_sign_negative() {
        -rounded
    } else {
        rounded
    }
}

/// Ratio as a percentage, 0 when the denominator is empty.
pub fn share(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
