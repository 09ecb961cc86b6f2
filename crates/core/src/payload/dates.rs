//! Date normalisation for date-typed attributes

use attrsync_domain::constants::{DATE_INPUT_FORMATS, DATE_OUTPUT_FORMAT};
use attrsync_domain::CellValue;
use chrono::{Datelike, NaiveDate};

/// Normalise a date cell to `YYYY-MM-DDT00:00:00.000Z`.
///
/// Native date-time cells keep their calendar date. Anything else is read as
/// text and parsed with the accepted formats in order; the first format that
/// parses wins. Returns `None` for blank or unparseable values.
pub fn normalize_date(value: &CellValue) -> Option<String> {
    let date = match value {
        CellValue::DateTime(datetime) => datetime.date(),
        other => parse_date(&other.as_text()?)?,
    };
    Some(date.format(DATE_OUTPUT_FORMAT).to_string())
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_INPUT_FORMATS.iter().find_map(|format| parse_with(text, format))
}

/// Parse `text` with one input format.
///
/// chrono reads `%Y` as one or more digits, so the year field is checked
/// separately: `%Y` takes exactly four digits and `%y` exactly two.
fn parse_with(text: &str, format: &str) -> Option<NaiveDate> {
    let year = YearField::locate(text, format)?;
    if year.digits.len() != year.width || !year.digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let date = NaiveDate::parse_from_str(text, format).ok()?;
    if year.width == 2 {
        pivot_two_digit_year(date, year.digits)
    } else {
        Some(date)
    }
}

/// The year token of a separator-delimited date and its required width.
struct YearField<'t> {
    digits: &'t str,
    width: usize,
}

impl<'t> YearField<'t> {
    fn locate(text: &'t str, format: &str) -> Option<Self> {
        let separator = format.chars().find(|c| *c != '%' && !c.is_ascii_alphanumeric())?;
        let (index, width) = format.split(separator).enumerate().find_map(|(index, part)| {
            match part {
                "%Y" => Some((index, 4)),
                "%y" => Some((index, 2)),
                _ => None,
            }
        })?;
        let digits = text.split(separator).nth(index)?;
        Some(Self { digits, width })
    }
}

// Two-digit years 00-68 are 20xx and 69-99 are 19xx; chrono puts 69 in 2069.
fn pivot_two_digit_year(date: NaiveDate, digits: &str) -> Option<NaiveDate> {
    let short: i32 = digits.parse().ok()?;
    if short >= 69 && date.year() >= 2000 {
        date.with_year(date.year() - 100)
    } else {
        Some(date)
    }
}
