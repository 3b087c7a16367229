//! Форматирование чисел для таблиц и карточек

/// Разделитель тысяч (пробел) и заданное количество знаков после точки
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Деньги: 2 знака, разделитель тысяч
pub fn format_money(value: f64) -> String {
    format_number_with_decimals(value, 2)
}

/// Количество на складе: без хвостовых нулей, с единицей измерения
pub fn format_quantity(value: f64, unit: &str) -> String {
    let mut s = format!("{:.3}", value);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s = "0".into();
    }
    if unit.is_empty() {
        s
    } else {
        format!("{} {}", s, unit)
    }
}

/// Часы с одним знаком: "7.5 ч"
pub fn format_hours(value: f64) -> String {
    format!("{:.1} ч", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "1 234.56");
        assert_eq!(format_money(1234567.89), "1 234 567.89");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(-1234.56), "-1 234.56");
        assert_eq!(format_money(-123.0), "-123.00");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1 235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1 234.6");
        assert_eq!(format_number_with_decimals(100000.0, 0), "100 000");
    }

    #[test]
    fn test_format_quantity_trims_zeros() {
        assert_eq!(format_quantity(4.0, "л"), "4 л");
        assert_eq!(format_quantity(2.5, "кг"), "2.5 кг");
        assert_eq!(format_quantity(0.125, ""), "0.125");
        assert_eq!(format_quantity(-0.0001, "шт"), "0 шт");
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(7.5), "7.5 ч");
        assert_eq!(format_hours(40.0), "40.0 ч");
    }
}
