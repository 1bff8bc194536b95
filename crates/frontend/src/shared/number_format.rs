//! Formatação de valores monetários em Real (pt-BR)

/// Shown in the three-mode breakdown when no price is available
pub const PRICE_PLACEHOLDER: &str = "—";

/// Groups the integer part with `thousands` and joins the fraction with `decimal`
///
/// # Examples
///
/// ```
/// use frontend::shared::number_format::format_number_with_separators;
/// assert_eq!(format_number_with_separators(1234.567, 2, '.', ','), "1.234,57");
/// ```
pub fn format_number_with_separators(value: f64, decimals: usize, thousands: char, decimal: char) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer_part, fraction) = match formatted.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (formatted.clone(), None),
    };

    let mut grouped = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(thousands);
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    // "-0,00" is not a thing
    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };

    match fraction {
        Some(f) => format!("{}{}{}{}", sign, grouped, decimal, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Formata um valor como Real com duas casas
///
/// # Examples
///
/// ```
/// use frontend::shared::number_format::format_brl;
/// assert_eq!(format_brl(1234567.891), "R$ 1.234.567,89");
/// ```
pub fn format_brl(value: f64) -> String {
    if !value.is_finite() {
        return format_brl(0.0);
    }
    let body = format_number_with_separators(value, 2, '.', ',');
    match body.strip_prefix('-') {
        Some(abs) => format!("-R$ {}", abs),
        None => format!("R$ {}", body),
    }
}

/// Headline total of a plan card: a missing amount reads as "R$ 0,00"
pub fn format_primary_total(value: Option<f64>) -> String {
    format_brl(value.unwrap_or(0.0))
}

/// One cell of the COM / PARC / SEM breakdown: a missing amount shows the
/// placeholder so "no price" never looks like "free"
pub fn format_mode_total(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format_brl(v),
        _ => PRICE_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(400.0), "R$ 400,00");
        assert_eq!(format_brl(1234.5), "R$ 1.234,50");
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(-1234.56), "-R$ 1.234,56");
        assert_eq!(format_brl(-0.001), "R$ 0,00");
        assert_eq!(format_brl(f64::NAN), "R$ 0,00");
    }

    #[test]
    fn test_primary_total_never_uses_placeholder() {
        assert_eq!(format_primary_total(None), "R$ 0,00");
        assert_eq!(format_primary_total(Some(99.9)), "R$ 99,90");
    }

    #[test]
    fn test_mode_total_placeholder() {
        assert_eq!(format_mode_total(None), PRICE_PLACEHOLDER);
        assert_eq!(format_mode_total(Some(0.0)), "R$ 0,00");
        assert_eq!(format_mode_total(Some(391.5)), "R$ 391,50");
    }

    #[test]
    fn test_format_number_with_separators() {
        assert_eq!(format_number_with_separators(1234567.0, 0, '.', ','), "1.234.567");
        assert_eq!(format_number_with_separators(999.999, 2, '.', ','), "1.000,00");
        assert_eq!(format_number_with_separators(12.0, 2, ' ', '.'), "12.00");
    }
}
