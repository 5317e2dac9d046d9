use chrono::TimeDelta;

// ---------------------------------------------------------------------------
// Scorecard formatting
// ---------------------------------------------------------------------------

/// Placeholder for undefined aggregates (all-null mean, zero-denominator
/// rate). Scorecards must show this, never a computed 0.
pub const NO_DATA: &str = "–";

/// Render a duration at seconds precision, sub-second part truncated.
///
/// `26h 3min 4.9s` → `"1d 02:03:04"`; negative spans get a leading sign.
pub fn duration(d: TimeDelta) -> String {
    let total = d.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();

    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    if days > 0 {
        format!("{sign}{days}d {hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// `duration`, with the no-data placeholder for `None`.
pub fn opt_duration(d: Option<TimeDelta>) -> String {
    d.map(duration).unwrap_or_else(|| NO_DATA.to_string())
}

/// Render a `[0, 1]` fraction as a percentage with two decimals.
pub fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// `percent`, with the no-data placeholder for `None`.
pub fn opt_percent(fraction: Option<f64>) -> String {
    fraction.map(percent).unwrap_or_else(|| NO_DATA.to_string())
}

/// Thousands-separated integer, `1234567` → `"1,234,567"`.
pub fn grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
