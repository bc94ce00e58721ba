//! pt-BR display formatting

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use rust_decimal::{Decimal, RoundingStrategy};

/// `R$ 1.234,50`
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{}R$ {},{}", if negative { "-" } else { "" }, grouped, frac_part)
}

/// `DD/MM/YYYY`
pub fn format_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
}

/// `HH:MM`
pub fn format_time(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// `(XX) XXXXX-XXXX` for mobiles, `(XX) XXXX-XXXX` for landlines, anything else unchanged
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        11 => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
        10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => phone.to_string(),
    }
}

/// `3h 30min`, `45min`, `2h`
pub fn format_duration(minutes: u32) -> String {
    let (h, m) = (minutes / 60, minutes % 60);
    match (h, m) {
        (0, m) => format!("{}min", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}min", h, m),
    }
}

/// Weekday name in Portuguese
pub fn weekday_label(weekday: chrono::Weekday) -> &'static str {
    use chrono::Weekday::*;
    match weekday {
        Mon => "Segunda-feira",
        Tue => "Terça-feira",
        Wed => "Quarta-feira",
        Thu => "Quinta-feira",
        Fri => "Sexta-feira",
        Sat => "Sábado",
        Sun => "Domingo",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(Decimal::from(380)), "R$ 380,00");
        assert_eq!(format_currency(Decimal::from_str("1234.5").unwrap()), "R$ 1.234,50");
        assert_eq!(format_currency(Decimal::from_str("1234567.899").unwrap()), "R$ 1.234.567,90");
        assert_eq!(format_currency(Decimal::ZERO), "R$ 0,00");
        assert_eq!(format_currency(Decimal::from(-50)), "-R$ 50,00");
    }

    #[test]
    fn test_date_and_time() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(format_date(date), "07/03/2026");
        let time = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        assert_eq!(format_time(time), "09:05");
    }

    #[test]
    fn test_phone() {
        assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
        assert_eq!(format_phone("1132654321"), "(11) 3265-4321");
        assert_eq!(format_phone("+55 11 98765-4321"), "+55 11 98765-4321");
        assert_eq!(format_phone("123"), "123");
    }

    #[test]
    fn test_duration() {
        assert_eq!(format_duration(210), "3h 30min");
        assert_eq!(format_duration(45), "45min");
        assert_eq!(format_duration(120), "2h");
    }
}
