//! Разбор значений полей ввода

/// Пустая строка (после trim) → `None`
pub fn opt_string(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Число с точкой или запятой; пробелы-разделители тысяч допускаются
pub fn parse_number(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Значение числового поля; целые без ".0"
pub fn number_input_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_none() {
        assert_eq!(opt_string("  ".into()), None);
        assert_eq!(opt_string("a".into()), Some("a".to_string()));
    }

    #[test]
    fn parses_comma_and_spaces() {
        assert_eq!(parse_number("1 234,5"), Some(1234.5));
        assert_eq!(parse_number("-2"), Some(-2.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn input_value_drops_trailing_zero() {
        assert_eq!(number_input_value(12.0), "12");
        assert_eq!(number_input_value(12.5), "12.5");
    }
}
