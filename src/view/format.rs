//! Display formatting for tile values, tooltips and labels
//!
//! - currency: `R$ 1,234.50`
//! - percent: `12.34%`
//! - rating: `4.5`
//! - units: `12,345`

/// Currency with symbol prefix, two decimals and thousands grouping
pub fn currency(symbol: &str, value: f64) -> String {
    let sign = if value < 0.0 && format!("{:.2}", value.abs()) != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{}{} {}", sign, symbol, grouped_decimal(value.abs(), 2))
}

/// Percentage with two decimals and a trailing percent sign
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Rating with one decimal
pub fn rating(value: f64) -> String {
    format!("{:.1}", value)
}

/// Integer count with thousands grouping
pub fn units(value: i64) -> String {
    let digits = group_thousands(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// Non-negative value with `decimals` places and grouped integer part
fn grouped_decimal(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value);
    match fixed.split_once('.') {
        Some((int_part, frac_part)) => format!("{}.{}", group_thousands(int_part), frac_part),
        None => group_thousands(&fixed),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(currency("R$", 0.0), "R$ 0.00");
        assert_eq!(currency("R$", 12.5), "R$ 12.50");
        assert_eq!(currency("R$", 1234.5), "R$ 1,234.50");
        assert_eq!(currency("R$", 1234567.891), "R$ 1,234,567.89");
        assert_eq!(currency("US$", 999.999), "US$ 1,000.00");
        assert_eq!(currency("R$", -1.0), "-R$ 1.00");
        assert_eq!(currency("R$", -0.001), "R$ 0.00");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.0), "0.00%");
        assert_eq!(percent(46.0), "46.00%");
        assert_eq!(percent(12.345678), "12.35%");
        assert_eq!(percent(-5.5), "-5.50%");
    }

    #[test]
    fn test_rating() {
        assert_eq!(rating(4.0), "4.0");
        assert_eq!(rating(4.46), "4.5");
    }

    #[test]
    fn test_units() {
        assert_eq!(units(0), "0");
        assert_eq!(units(999), "999");
        assert_eq!(units(1000), "1,000");
        assert_eq!(units(12345), "12,345");
        assert_eq!(units(1234567), "1,234,567");
        assert_eq!(units(-4200), "-4,200");
    }
}
