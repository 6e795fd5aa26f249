//! Display helpers for prices.

/// Format a price as Brazilian reais, e.g. `1234.5` -> `R$ 1.234,50`.
///
/// The separator after `R$` is a no-break space, matching what browsers
/// produce for `toLocaleString("pt-BR", { style: "currency", currency: "BRL" })`.
#[must_use]
pub fn format_brl(value: f64) -> String {
    #[allow(clippy::cast_possible_truncation, reason = "prices are far below i64 range")]
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = group_thousands(cents / 100);
    format!("{sign}R$\u{a0}{whole},{:02}", cents % 100)
}

fn group_thousands(mut value: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if value < 1000 {
            groups.push(value.to_string());
            break;
        }
        groups.push(format!("{:03}", value % 1000));
        value /= 1000;
    }
    groups.reverse();
    groups.join(".")
}

/// Parse a user-typed price. Accepts `59.99`, `59,99` and surrounding spaces.
#[must_use]
pub fn parse_price(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
}

/// Render a price for an `<input>` value, without currency symbol.
#[must_use]
pub fn price_input_value(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;
