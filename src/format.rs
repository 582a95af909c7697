/// Insert `,` between groups of three digits of the integer part.
pub fn thousands(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && text.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Funding amounts are recorded in millions of dollars: `$1,234.50M`.
pub fn funding(value: f64) -> String {
    format!("${}M", thousands(value, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_integer_digits() {
        assert_eq!(thousands(1234567.0, 0), "1,234,567");
        assert_eq!(thousands(999.0, 0), "999");
        assert_eq!(thousands(1000.5, 2), "1,000.50");
        assert_eq!(thousands(-12345.0, 1), "-12,345.0");
        assert_eq!(thousands(-0.001, 2), "0.00");
    }

    #[test]
    fn funding_uses_millions_suffix() {
        assert_eq!(funding(2.0), "$2.00M");
        assert_eq!(funding(1234.5), "$1,234.50M");
    }
}
