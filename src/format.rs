//! Display formatting for currency amounts and rates

/// Format an amount as whole dollars with thousands separators (`$10,407`)
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(rounded.abs() as u64))
}

/// Format growth with an explicit sign (`+$407`, `-$12`)
pub fn format_growth(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "+" };
    format!("{}${}", sign, group_thousands(rounded.abs() as u64))
}

/// Format a decimal rate as a percentage with two decimals (`4.50%`)
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(10_407.415), "$10,407");
        assert_eq!(format_currency(1_234_567.5), "$1,234,568");
        assert_eq!(format_currency(-2_500.0), "-$2,500");
    }

    #[test]
    fn test_growth() {
        assert_eq!(format_growth(407.4), "+$407");
        assert_eq!(format_growth(0.0), "+$0");
        assert_eq!(format_growth(-1_050.0), "-$1,050");
    }

    #[test]
    fn test_rate() {
        assert_eq!(format_rate(0.045), "4.50%");
        assert_eq!(format_rate(0.04), "4.00%");
        assert_eq!(format_rate(0.0525), "5.25%");
    }
}
