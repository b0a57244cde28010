//! Human-readable rendering of prices and areas for terminal output.

/// Inserts thousands separators: `12345` → `12,345`
pub fn with_commas(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Renders a price given in 만원.
///
/// `125000` → `12억 5,000`, `120000` → `12억`, `8500` → `8,500만`.
/// The remainder below 1억 is rounded to the nearest 1,000만.
pub fn format_price(man_won: i64) -> String {
    if man_won < 10_000 {
        return format!("{}만", with_commas(man_won));
    }

    let mut eok = man_won / 10_000;
    let mut man = ((man_won % 10_000) as f64 / 1_000.0).round() as i64 * 1_000;
    if man == 10_000 {
        eok += 1;
        man = 0;
    }

    if man > 0 {
        format!("{}억 {}", eok, with_commas(man))
    } else {
        format!("{}억", eok)
    }
}

/// Floored area label, a range when the floors of `min` and `max` differ
pub fn format_area_range(min: Option<f64>, max: Option<f64>, value: f64) -> String {
    match (min, max) {
        (Some(min), Some(max)) if min.floor() != max.floor() => {
            format!("{}~{}㎡", min.floor() as i64, max.floor() as i64)
        }
        _ => format!("{}㎡", value.floor() as i64),
    }
}
