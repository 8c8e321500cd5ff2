//! Display formatting for counts, rates and axis labels.

/// Group the integer part with commas and keep `decimals` fractional digits.
/// Non-finite input renders as `"-"`.
///
/// ```
/// use dashboard_core::formatting::format_number;
///
/// assert_eq!(format_number(4_812_300.0, 0), "4,812,300");
/// assert_eq!(format_number(5.556, 2), "5.56");
/// assert_eq!(format_number(-1200.5, 1), "-1,200.5");
/// assert_eq!(format_number(f64::NAN, 2), "-");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let negative = value < 0.0;
    let factor = 10_f64.powi(decimals as i32);
    let abs_value = value.abs();
    // Nudge by a relative epsilon so exact midpoints like 1.005 round up.
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let grouped = group_thousands(&(rounded.trunc() as u64).to_string());
    let body = if decimals == 0 {
        grouped
    } else {
        let frac = format!("{:.prec$}", rounded.fract(), prec = decimals as usize);
        // `frac` is "0.xx"; keep the ".xx".
        format!("{}{}", grouped, &frac[1..])
    };

    if negative && rounded > 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// Format an integer count with thousands separators (`12,345`).
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Format a value that is already a percentage (`12.3456` → `"12.35%"`).
///
/// ```
/// use dashboard_core::formatting::format_percent;
///
/// assert_eq!(format_percent(12.3456, 2), "12.35%");
/// assert_eq!(format_percent(0.0, 1), "0.0%");
/// ```
pub fn format_percent(value: f64, decimals: u32) -> String {
    format!("{}%", format_number(value, decimals))
}

/// Short axis-label form: `950`, `12.5K`, `3.2M`, `1.1B`.
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e9 {
        (value / 1e9, "B")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "K")
    } else {
        return format!("{:.0}", value);
    };
    format!("{:.1}{}", scaled, suffix)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
