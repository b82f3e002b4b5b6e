//! # Shared Utility Functions
//!
//! Formatting helpers used by the client CLI when printing tables.
//!
//! ```rust
//! use shared::utils::{format_price, truncate_id};
//!
//! assert_eq!(format_price(12500.0, "RUB"), "12 500 RUB");
//! assert_eq!(truncate_id("3f2504e0-4f89-11d3-9a0c-0305e82c3301", 4, 4), "3f25...3301");
//! ```

/// Show the first `prefix_len` and last `suffix_len` characters of an id.
///
/// Ids shorter than `prefix_len + suffix_len` are returned as-is.
pub fn truncate_id(id: &str, prefix_len: usize, suffix_len: usize) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() <= prefix_len + suffix_len {
        return id.to_string();
    }

    let prefix: String = chars[..prefix_len].iter().collect();
    let suffix: String = chars[chars.len() - suffix_len..].iter().collect();
    format!("{}...{}", prefix, suffix)
}

/// Whole-unit price with space-grouped thousands, e.g. `12 500 RUB`.
pub fn format_price(amount: f64, currency: &str) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0 { "-" } else { "" };
    if currency.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{} {}", sign, grouped, currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_id() {
        let id = "3f2504e0-4f89-11d3-9a0c-0305e82c3301";
        assert_eq!(truncate_id(id, 4, 4), "3f25...3301");
        assert_eq!(truncate_id(id, 8, 0), "3f2504e0...");
        assert_eq!(truncate_id("short", 4, 4), "short");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0.0, "RUB"), "0 RUB");
        assert_eq!(format_price(999.4, "RUB"), "999 RUB");
        assert_eq!(format_price(1_234_567.0, ""), "1 234 567");
        assert_eq!(format_price(-4500.0, "EUR"), "-4 500 EUR");
    }
}
