//! Display formatting for prices and page sizes

/// Rounds to one decimal place, halves rounding up
pub fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Formats a byte count as kilobytes, e.g. `61550` → `"61.6kb"`
///
/// One kilobyte is 1000 bytes. The value is rounded to one decimal place and
/// a trailing `.0` is dropped.
pub fn format_size(bytes: u64) -> String {
    let kilobytes = round_to_one_decimal(bytes as f64 / 1000.0);
    format!("{}kb", kilobytes)
}

/// Formats a price with exactly two decimal places, e.g. `7.1` → `"7.10"`
pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}
