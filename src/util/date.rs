//! Date normalization between RSS (RFC 822) and Atom (RFC 3339) encodings.
//!
//! Parsing accepts both encodings regardless of the feed format, because
//! real-world feeds mix them freely. Formatting always emits the canonical
//! form of the target format:
//!
//! - RSS: `Thu, 06 Jul 2017 20:25:00 GMT` (always converted to UTC)
//! - Atom: `2017-07-06T20:25:00Z` for a zero offset, `2017-07-06T22:25:00+02:00` otherwise

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

use crate::error::{FeedError, FeedResult};

const RFC3339_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";
const RFC3339_UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const RFC822_FORMAT: &str = "%d %b %Y %H:%M:%S %:z";
const RFC822_NO_SECONDS_FORMAT: &str = "%d %b %Y %H:%M %:z";

/// Offset used when a time zone token cannot be interpreted.
const UTC_OFFSET: &str = "+00:00";

/// Parses a feed date written in either RFC 3339 or RFC 822 form.
///
/// RFC 3339 is attempted first; fractional seconds are discarded. The RFC 822
/// fallback tolerates a missing weekday, repeated whitespace, single-digit
/// days, missing seconds and `+hmm` offsets.
///
/// # Errors
///
/// Returns [`FeedError::Format`] when neither encoding matches.
///
/// # Examples
///
/// ```
/// use syndication::util::parse_date;
///
/// let atom = parse_date("2017-07-06T20:25:00+00:00").unwrap();
/// let rss = parse_date("Thu, 06 Jul 2017 20:25:00 GMT").unwrap();
/// assert_eq!(atom, rss);
/// ```
pub fn parse_date(value: &str) -> FeedResult<DateTime<FixedOffset>> {
    try_parse_date(value).ok_or_else(|| FeedError::format(format!("Invalid date '{}'", value)))
}

/// Like [`parse_date`] but returns `None` instead of an error.
pub fn try_parse_date(value: &str) -> Option<DateTime<FixedOffset>> {
    parse_rfc3339(value).or_else(|| parse_rfc822(value))
}

/// Formats a timestamp the way RSS expects it (RFC 1123 profile of RFC 822, UTC).
pub fn format_rfc822(dt: &DateTime<FixedOffset>) -> String {
    dt.with_timezone(&Utc)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

/// Formats a timestamp the way Atom expects it (RFC 3339, whole seconds).
pub fn format_rfc3339(dt: &DateTime<FixedOffset>) -> String {
    if dt.offset().local_minus_utc() == 0 {
        dt.format(RFC3339_UTC_FORMAT).to_string()
    } else {
        dt.format(RFC3339_OFFSET_FORMAT).to_string()
    }
}

fn parse_rfc3339(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();

    let without_fraction;
    let value = if value.len() > 19 && value.as_bytes()[19] == b'.' {
        let digits = value[20..]
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        without_fraction = format!("{}{}", &value[..19], &value[20 + digits..]);
        without_fraction.as_str()
    } else {
        value
    };

    if let Ok(dt) = DateTime::parse_from_str(value, RFC3339_OFFSET_FORMAT) {
        return Some(dt);
    }

    NaiveDateTime::parse_from_str(value, RFC3339_UTC_FORMAT)
        .ok()
        .map(|naive| naive.and_utc().fixed_offset())
}

fn parse_rfc822(value: &str) -> Option<DateTime<FixedOffset>> {
    let mut chars: Vec<char> = value.trim().chars().collect();
    if chars.len() < 18 {
        return None;
    }

    // Leading "Tue, " (the space is sometimes missing)
    if chars[3] == ',' {
        chars.drain(..4);
        let leading = chars.iter().take_while(|c| c.is_whitespace()).count();
        chars.drain(..leading);
    }

    let mut chars = collapse_whitespace(&chars);
    if chars.len() < 2 {
        return None;
    }

    if !chars[1].is_ascii_digit() {
        chars.insert(0, '0');
    }

    if chars.len() < 19 {
        return None;
    }

    // "dd MMM yyyy HH:mm:ss zone" vs "dd MMM yyyy HH:mm zone"
    let has_seconds = chars[17] == ':';
    let zone_start = if has_seconds { 21 } else { 18 };
    if zone_start > chars.len() {
        return None;
    }

    let zone: String = chars[zone_start..].iter().collect();
    let mut text: String = chars[..zone_start].iter().collect();
    text.push_str(&normalize_time_zone(&zone));

    let format = if has_seconds {
        RFC822_FORMAT
    } else {
        RFC822_NO_SECONDS_FORMAT
    };
    DateTime::parse_from_str(&text, format).ok()
}

fn collapse_whitespace(chars: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len());
    let mut in_whitespace = false;
    for &c in chars {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }
    out
}

/// Translates an RFC 822 zone token into a `±hh:mm` offset.
///
/// Unrecognized tokens degrade to UTC instead of failing the whole date.
fn normalize_time_zone(zone: &str) -> String {
    if zone.starts_with('+') || zone.starts_with('-') {
        let mut offset: Vec<char> = zone.chars().collect();
        // +hmm -> +hhmm
        if offset.len() == 4 {
            offset.insert(1, '0');
        }
        if offset.len() >= 3 {
            offset.insert(3, ':');
        }
        return offset.into_iter().collect();
    }

    let offset = match zone {
        "UT" | "Z" | "GMT" => UTC_OFFSET,
        "A" => "-01:00",
        "B" => "-02:00",
        "C" => "-03:00",
        "D" | "EDT" => "-04:00",
        "E" | "EST" | "CDT" => "-05:00",
        "F" | "CST" | "MDT" => "-06:00",
        "G" | "MST" | "PDT" => "-07:00",
        "H" | "PST" => "-08:00",
        "I" => "-09:00",
        "K" => "-10:00",
        "L" => "-11:00",
        "M" => "-12:00",
        "N" => "+01:00",
        "O" => "+02:00",
        "P" => "+03:00",
        "Q" => "+04:00",
        "R" => "+05:00",
        "S" => "+06:00",
        "T" => "+07:00",
        "U" => "+08:00",
        "V" => "+09:00",
        "W" => "+10:00",
        "X" => "+11:00",
        "Y" => "+12:00",
        _ => {
            tracing::debug!(zone = %zone, "Unrecognized RFC 822 time zone, assuming UTC");
            UTC_OFFSET
        }
    };
    offset.to_string()
}
