//! Scalar conversions between element text and typed values.

use chrono::{DateTime, FixedOffset, Utc, Weekday};

use crate::util::{format_rfc3339, format_rfc822, try_parse_date};

/// Which canonical date encoding a formatter emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `Thu, 06 Jul 2017 20:25:00 GMT` (RSS)
    Rfc822,
    /// `2017-07-06T20:25:00Z` (Atom)
    Rfc3339,
}

impl DateStyle {
    pub fn format(self, dt: &DateTime<FixedOffset>) -> String {
        match self {
            DateStyle::Rfc822 => format_rfc822(dt),
            DateStyle::Rfc3339 => format_rfc3339(dt),
        }
    }
}

/// A value that can be read from, and written to, element text.
///
/// Used by `read_value` on the readers and `write_value` on the writers.
pub trait FeedValue: Sized {
    /// Short type name used in conversion errors.
    const NAME: &'static str;

    /// Converts element text into the value, `None` if it does not fit.
    fn parse_feed_value(value: &str) -> Option<Self>;

    /// Value of an element without text, `None` if the type has none.
    fn parse_missing() -> Option<Self> {
        None
    }

    /// Renders the value as element text. Dates use `style`.
    fn to_feed_value(&self, style: DateStyle) -> String;
}

impl FeedValue for String {
    const NAME: &'static str = "string";

    fn parse_feed_value(value: &str) -> Option<Self> {
        Some(value.to_owned())
    }

    fn parse_missing() -> Option<Self> {
        Some(String::new())
    }

    fn to_feed_value(&self, _style: DateStyle) -> String {
        self.clone()
    }
}

impl FeedValue for bool {
    const NAME: &'static str = "bool";

    fn parse_feed_value(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("true") {
            Some(true)
        } else if value.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }

    fn to_feed_value(&self, _style: DateStyle) -> String {
        self.to_string()
    }
}

macro_rules! impl_feed_value_for_int {
    ($($ty:ty),*) => {
        $(
            impl FeedValue for $ty {
                const NAME: &'static str = stringify!($ty);

                fn parse_feed_value(value: &str) -> Option<Self> {
                    value.trim().parse().ok()
                }

                fn to_feed_value(&self, _style: DateStyle) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_feed_value_for_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl FeedValue for DateTime<FixedOffset> {
    const NAME: &'static str = "date";

    fn parse_feed_value(value: &str) -> Option<Self> {
        try_parse_date(value)
    }

    fn to_feed_value(&self, style: DateStyle) -> String {
        style.format(self)
    }
}

impl FeedValue for DateTime<Utc> {
    const NAME: &'static str = "date";

    fn parse_feed_value(value: &str) -> Option<Self> {
        try_parse_date(value).map(|dt| dt.with_timezone(&Utc))
    }

    fn to_feed_value(&self, style: DateStyle) -> String {
        style.format(&self.fixed_offset())
    }
}

impl FeedValue for Weekday {
    const NAME: &'static str = "weekday";

    fn parse_feed_value(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }

    fn to_feed_value(&self, _style: DateStyle) -> String {
        let name = match self {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        };
        name.to_string()
    }
}
