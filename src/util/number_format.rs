
/// Rounds to a fixed number of decimal places, breaking ties to the even neighbor.
/// # Arguments
/// * `value` - the value to round
/// * `decimals` - number of digits to keep after the decimal point
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round_ties_even() / scale
}

/// Formats a float so it always reads as a float, e.g. `1.0` instead of `1`.
/// Non-finite values are written as `NaN`, `inf`, `-inf`.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    let text = value.to_string();
    if value.is_finite() && !text.contains(['.', 'e', 'E']) {
        format!("{text}.0")
    } else {
        text
    }
}

/// Formats a summed cell according to its column type
/// # Arguments
/// * `value` - the summed value
/// * `integral` - true if the column only ever held integers
pub fn format_cell(value: f64, integral: bool) -> String {
    if integral {
        format!("{}", value as i64)
    } else {
        format_float(value)
    }
}
