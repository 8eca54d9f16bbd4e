//! Monetary amounts are integer cents everywhere inside the engine.
//! Configuration speaks USD-per-hour; conversion happens once, on load.

/// Convert a configured USD amount to cents, rounding to the nearest cent.
pub fn dollars_to_cents(dollars: f64) -> i64 {
    (dollars * 100.0).round() as i64
}

pub fn cents_to_dollars(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Render cents as a dollar string, e.g. `1000` -> `"$10.00"`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{}${}.{:02}", sign, abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_config_rates() {
        assert_eq!(dollars_to_cents(10.0), 1000);
        assert_eq!(dollars_to_cents(0.0), 0);
        assert_eq!(dollars_to_cents(19.99), 1999);
        assert_eq!(cents_to_dollars(1050), 10.5);
    }

    #[test]
    fn formats_cents() {
        assert_eq!(format_cents(1000), "$10.00");
        assert_eq!(format_cents(5), "$0.05");
        assert_eq!(format_cents(-250), "-$2.50");
    }
}
