/// Dollar amount with thousands separators: `$1,234.56`. The sign follows
/// the rounded value, so `-0.001` prints as `$0.00`.
pub fn money(val: f64) -> String {
    let cents = (val * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let digits = (cents / 100).to_string();

    let mut dollars = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            dollars.push(',');
        }
        dollars.push(c);
    }
    format!("{sign}${dollars}.{:02}", cents % 100)
}

/// Blank cell for absent amounts.
pub fn opt_money(val: Option<f64>) -> String {
    val.map(money).unwrap_or_default()
}

/// Wrap `text` as a `- ` bullet with a hanging indent.
pub fn bullet(text: &str, width: usize) -> String {
    let options = textwrap::Options::new(width)
        .initial_indent("- ")
        .subsequent_indent("  ");
    textwrap::fill(text, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234.56), "$1,234.56");
        assert_eq!(money(-500.00), "-$500.00");
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(1000000.99), "$1,000,000.99");
        assert_eq!(money(42.10), "$42.10");
    }

    #[test]
    fn test_money_sign_follows_rounding() {
        assert_eq!(money(-0.001), "$0.00");
        assert_eq!(money(-0.0), "$0.00");
        assert_eq!(money(-0.005), "-$0.01");
        assert_eq!(money(-1234567.891), "-$1,234,567.89");
    }

    #[test]
    fn test_opt_money() {
        assert_eq!(opt_money(Some(12.5)), "$12.50");
        assert_eq!(opt_money(None), "");
    }

    #[test]
    fn test_bullet_wraps_with_hanging_indent() {
        let out = bullet("Review account type mapping for: Suspense, Clearing", 24);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines.len() > 1);
        assert!(lines[0].starts_with("- "));
        assert!(lines[1..].iter().all(|l| l.starts_with("  ")));
    }
}
