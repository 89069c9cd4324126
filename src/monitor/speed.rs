//! Human-readable link speed formatting.

/// Decimal unit prefixes, smallest first. Nothing beyond peta.
const UNITS: [&str; 6] = ["", "k", "M", "G", "T", "P"];

/// Formats a bit rate with one fractional digit and a decimal unit prefix.
///
/// The value is divided by 1000 until it drops below 1000 or the largest
/// unit is reached; past peta the number simply grows.
///
/// # Example
///
/// ```
/// use speed_notifier::monitor::format_speed;
///
/// assert_eq!(format_speed(0), "0.0 bps");
/// assert_eq!(format_speed(1_500_000_000), "1.5 Gbps");
/// ```
#[must_use]
pub fn format_speed(speed_bps: u64) -> String {
    // Precision loss only affects digits well past the one we print
    #[allow(clippy::cast_precision_loss)]
    let mut value = speed_bps as f64;
    let mut unit = 0;

    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    format!("{value:.1} {}bps", UNITS[unit])
}
