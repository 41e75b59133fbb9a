//! Display formatting for amounts and dates.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use session::types::PaymentMethod;

/// Rupee amount with two decimals and thousands separators.
pub fn format_amount(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}₹{grouped}.{frac}")
}

/// `yyyy-MM-dd` as `dd Mon yyyy`; anything else is shown unchanged.
pub fn format_date(iso: &str) -> String {
    const MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];
    let mut parts = iso.splitn(3, '-');
    let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) else {
        return iso.to_owned();
    };
    match month.parse::<usize>() {
        Ok(m @ 1..=12) if year.len() == 4 && day.len() == 2 => format!("{day} {} {year}", MONTHS[m - 1]),
        _ => iso.to_owned(),
    }
}

pub fn payment_label(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "Cash",
        PaymentMethod::Upi => "UPI",
    }
}

/// `<input type="number">` value to `f64`, `None` for blank or invalid.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Trimmed text, `None` when blank.
pub fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
