/// Formats a count with thousands separators
pub fn format_count(n: u64) -> String {
    group_digits(&n.to_string())
}

fn group_digits(digits: &str) -> String {
    let mut result = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Monetary total scaled to millions, e.g. "$1.23M"
pub fn format_millions(amount: f64) -> String {
    format!("${:.2}M", amount / 1_000_000.0)
}

/// Chart text label scaled to thousands, e.g. "12.34K"
pub fn format_kilo(amount: f64) -> String {
    format!("{:.2}K", amount / 1_000.0)
}

/// Mean with two decimals and thousands separators, e.g. "1,234.50";
/// an undefined mean renders blank
pub fn format_mean(value: Option<f64>) -> String {
    let Some(v) = value else {
        return String::new();
    };
    let s = format!("{:.2}", v);
    match s.split_once('.') {
        Some((int_part, frac)) => format!("{}.{}", group_digits(int_part), frac),
        None => s,
    }
}
