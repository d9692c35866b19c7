//! Rounding and display helpers for amounts and percentages

/// Round to the nearest whole currency unit (halves away from zero)
pub fn round_to_unit(value: f64) -> f64 {
    value.round()
}

/// Round to a fixed number of decimal places
pub fn round_to_places(value: f64, places: u32) -> f64 {
    let factor = 10_f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Whole rupees with Indian digit grouping: `412432.4` -> `₹4,12,432`
pub fn format_rupees(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = round_to_unit(value);
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };

    format!("{}₹{}", sign, group_indian(&digits))
}

/// Two decimals with a percent sign
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", round_to_places(value, 2))
}

// Last three digits form the first group, then pairs (lakh, crore, ...)
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
