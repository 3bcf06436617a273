use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

static MONTH_DAY_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+) (\d{1,2}), (\d{4})$").expect("valid regex"));
static MONTH_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+) (\d{4})$").expect("valid regex"));
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})$").expect("valid regex"));
// dateparser fills in today's date for time-only input, so free-form text
// must at least carry a year.
static HAS_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").expect("valid regex"));

fn month_number(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|month| *month == name)
        .map(|index| index as u32 + 1)
}

/// Turn an Open Library `publish_date` into a calendar date.
///
/// `"May 1, 1988"`, `"May 1988"` and `"1988"` are matched exactly (missing
/// day or month become the first), anything else that mentions a year goes
/// through [`dateparser`] in UTC.
/// Returns `None` for input that can't be read as a valid date.
pub fn parse_publication_date(text: &str) -> Option<NaiveDate> {
    if let Some(caps) = MONTH_DAY_YEAR_RE.captures(text) {
        if let Some(month) = month_number(&caps[1]) {
            let day = caps[2].parse().ok()?;
            let year = caps[3].parse().ok()?;
            return NaiveDate::from_ymd_opt(year, month, day);
        }
    }
    if let Some(caps) = MONTH_YEAR_RE.captures(text) {
        if let Some(month) = month_number(&caps[1]) {
            let year = caps[2].parse().ok()?;
            return NaiveDate::from_ymd_opt(year, month, 1);
        }
    }
    if let Some(caps) = YEAR_RE.captures(text) {
        let year = caps[1].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    if !HAS_YEAR_RE.is_match(text) {
        return None;
    }
    dateparser::parse_with_timezone(text, &Utc)
        .ok()
        .map(|ts| ts.date_naive())
}
