/// Render a float the way the engine documents and CSV tables expect it:
/// whole numbers keep one decimal place (`25.0`), everything else uses the
/// shortest round-trip form (`13.89`).
pub fn decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Like [`decimal`], but `None` becomes an empty cell.
pub fn optional_decimal(value: Option<f64>) -> String {
    value.map(decimal).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_keep_one_decimal() {
        assert_eq!(decimal(25.0), "25.0");
        assert_eq!(decimal(-3.0), "-3.0");
        assert_eq!(decimal(0.0), "0.0");
    }

    #[test]
    fn fractions_use_shortest_form() {
        assert_eq!(decimal(129.5), "129.5");
        assert_eq!(decimal(13.89), "13.89");
    }

    #[test]
    fn missing_values_are_empty() {
        assert_eq!(optional_decimal(None), "");
        assert_eq!(optional_decimal(Some(2.0)), "2.0");
    }
}
