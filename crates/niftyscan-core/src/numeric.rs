//! Tolerant numeric extraction from display price strings
//!
//! The model emits prices as display strings ("1,240.50", "₹812.40 INR",
//! "At Market"). The presentation layer and the ticker engine both need a
//! plain number back out of those; this extraction is deliberately lossy
//! and never fails.

/// Extract a plain price from a display string
///
/// Thousands separators and any non-digit/non-dot character are stripped,
/// then the leading numeral of what remains is parsed. A second decimal
/// point ends the numeral rather than invalidating it. When no numeral is
/// present at all the result is `0.0`.
///
/// # Examples
///
/// ```
/// use niftyscan_core::extract_price;
///
/// assert_eq!(extract_price("1,240.50"), 1240.5);
/// assert_eq!(extract_price("₹812.40 INR"), 812.4);
/// assert_eq!(extract_price("At Market"), 0.0);
/// ```
pub fn extract_price(display: &str) -> f64 {
    let mut numeral = String::new();
    let mut seen_dot = false;

    for c in display.chars() {
        match c {
            '0'..='9' => numeral.push(c),
            '.' => {
                if seen_dot {
                    break;
                }
                seen_dot = true;
                numeral.push(c);
            }
            // Separators and currency decoration are skipped, not terminal
            _ => {}
        }
    }

    numeral.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(extract_price("1240.50"), 1240.5);
        assert_eq!(extract_price("830"), 830.0);
    }

    #[test]
    fn test_thousands_separators() {
        assert_eq!(extract_price("1,24,050.75"), 124050.75);
        assert_eq!(extract_price("2,500"), 2500.0);
    }

    #[test]
    fn test_currency_decoration() {
        assert_eq!(extract_price("₹812.40"), 812.4);
        assert_eq!(extract_price("INR 99.95 approx"), 99.95);
    }

    #[test]
    fn test_no_numeral_yields_zero() {
        assert_eq!(extract_price("At Market"), 0.0);
        assert_eq!(extract_price("TBD"), 0.0);
        assert_eq!(extract_price(""), 0.0);
    }

    #[test]
    fn test_second_dot_ends_numeral() {
        assert_eq!(extract_price("12.3.4"), 12.3);
    }
}
