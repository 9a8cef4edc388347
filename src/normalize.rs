//! Text clean-up for the loosely formatted fields of a title card.
//!
//! Every function here takes the raw text node as it appears in the page and
//! is total: bad input degrades to an empty value, never an error.

use std::sync::LazyLock;

use regex::Regex;

const CATEGORY_PREFIX: &str = "Showing titles in ";
const LENGTH_LABEL: &str = "Length: ";
const RELEASE_DATE_LABEL: &str = "Release date:";
const LANGUAGE_LABEL: &str = "Language:";
const STAR_SUFFIX: &str = " out of 5 stars";

static HOURS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9]+) h").expect("hours regex"));
static MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+) min").expect("minutes regex"));

#[must_use]
pub fn category_heading(raw: &str) -> String {
    raw.replace('\n', "")
        .replace(CATEGORY_PREFIX, "")
        .trim()
        .to_owned()
}

/// Converts a runtime label such as "Length: 4 hrs and 20 mins" to minutes.
///
/// "Less than 1 minute" counts as one minute. A missing hour or minute part
/// counts as zero, but text with neither part yields `None`.
#[must_use]
pub fn length_minutes(raw: &str) -> Option<u32> {
    let text = raw.replace(LENGTH_LABEL, "");
    if text.contains("Less than") {
        return Some(1);
    }

    let hours = capture_number(&HOURS, &text);
    let minutes = capture_number(&MINUTES, &text);
    if hours.is_none() && minutes.is_none() {
        return None;
    }

    hours
        .unwrap_or(Some(0))?
        .checked_mul(60)?
        .checked_add(minutes.unwrap_or(Some(0))?)
}

/// Outer `None`: no match. Inner `None`: matched but does not fit in `u32`.
fn capture_number(pattern: &Regex, text: &str) -> Option<Option<u32>> {
    let captures = pattern.captures(text)?;
    Some(captures.get(1).and_then(|m| m.as_str().parse().ok()))
}

#[must_use]
pub fn release_date(raw: &str) -> String {
    raw.replace(RELEASE_DATE_LABEL, "")
        .replace(['\n', ','], "")
        .trim()
        .to_owned()
}

#[must_use]
pub fn language(raw: &str) -> String {
    raw.replace(LANGUAGE_LABEL, "")
        .replace('\n', "")
        .trim()
        .to_owned()
}

#[must_use]
pub fn star_rating(raw: &str) -> String {
    raw.replace(STAR_SUFFIX, "").trim().to_owned()
}

#[must_use]
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

#[must_use]
pub fn price(raw: &str) -> String {
    raw.replace('$', "").trim().to_owned()
}
