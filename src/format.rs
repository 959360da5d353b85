//! Number and date formatting plus the small bits of sales arithmetic shared
//! by the table cells and the date widgets.

use num_format::Locale;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// The most fraction digits [format_number] will show.
const MAX_FRACTION_DIGITS: usize = 3;

const DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month repr:numerical padding:zero]-[day padding:zero]");

/// Format `number` with Korean digit grouping, e.g. `1234567.5` becomes
/// `"1,234,567.5"`.
///
/// Missing values and NaN are shown as `"0"`. At most three fraction digits
/// are kept, halves round away from zero and trailing zeros are dropped.
pub fn format_number(number: Option<f64>) -> String {
    let Some(number) = number.filter(|number| !number.is_nan()) else {
        return "0".to_owned();
    };

    if number.is_infinite() {
        return if number < 0.0 { "-∞" } else { "∞" }.to_owned();
    }

    let fixed = round_half_away_from_zero(number.abs());
    let (integer_digits, fraction_digits) = fixed.split_once('.').unwrap_or((&fixed, ""));
    let fraction_digits = fraction_digits.trim_end_matches('0');
    let grouped = group_thousands(integer_digits);

    let is_zero = grouped == "0" && fraction_digits.is_empty();
    let sign = if number < 0.0 && !is_zero { "-" } else { "" };

    if fraction_digits.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction_digits}")
    }
}

/// `abs` with exactly [MAX_FRACTION_DIGITS] fraction digits.
///
/// `format!` rounds exact ties to even, so ties are rounded up here instead.
fn round_half_away_from_zero(abs: f64) -> String {
    // Only odd multiples of 1/16 lie exactly halfway between two thousandths.
    if (abs * 16.0) % 2.0 != 1.0 {
        return format!("{:.*}", MAX_FRACTION_DIGITS, abs);
    }

    let mut digits = format!("{:.*}", MAX_FRACTION_DIGITS + 1, abs);
    digits.pop();

    // The digit before a tie's final 5 is always 2 or 7, so nothing carries.
    if let Some(last) = digits.pop().and_then(|digit| digit.to_digit(10)) {
        digits.extend(char::from_digit(last + 1, 10));
    }

    digits
}

/// Insert the Korean group separator every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let separator = Locale::ko.separator();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }

    grouped
}

/// Format `date` as `YYYY-MM-DD`, or an empty string if there is no date.
pub fn format_date(date: Option<Date>) -> String {
    match date {
        Some(date) => date
            .format(DATE_FORMAT)
            .unwrap_or_else(|_| date.to_string()),
        None => String::new(),
    }
}

/// Today's date as `YYYY-MM-DD`.
#[inline]
pub fn today_string(today: Date) -> String {
    format_date(Some(today))
}

/// The percentage of `target` reached by `actual`, rounded to two decimal
/// places. A zero target gives a rate of zero.
pub fn calculate_achievement_rate(actual: f64, target: f64) -> f64 {
    if target == 0.0 || target.is_nan() {
        return 0.0;
    }

    (actual / target * 100.0 * 100.0).round() / 100.0
}

/// The sale amount for `quantity` units at `price`. Zero when either is zero.
pub fn calculate_amount(quantity: f64, price: f64) -> f64 {
    if quantity == 0.0 || quantity.is_nan() || price == 0.0 || price.is_nan() {
        return 0.0;
    }

    quantity * price
}

/// Parse a `YYYY-MM-DD` date typed by the user.
///
/// # Errors
/// Returns [Error::InvalidDate] unless `text` is a zero padded year, month and
/// day separated by dashes that together name a real date.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text, DATE_FORMAT).map_err(|_| Error::InvalidDate(text.to_owned()))
}

/// Replace a negative number typed into a quantity field with zero.
///
/// Text that is empty or not a number is returned unchanged.
pub fn clamp_non_negative(value: &str) -> String {
    match value.trim().parse::<f64>() {
        Ok(number) if number < 0.0 => "0".to_owned(),
        _ => value.to_owned(),
    }
}
