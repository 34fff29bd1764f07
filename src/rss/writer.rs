//! Channel-level elements for the RSS writer.

use std::io::Write;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Weekday};

use super::names::{self, attr};
use super::Rss;
use crate::error::{FeedError, FeedResult};
use crate::feed::{FeedFormatter, XmlFeedWriter};
use crate::model::{SyndicationAttribute, SyndicationContent};
use crate::util::require_absolute;

impl<W: Write, F: FeedFormatter> XmlFeedWriter<W, Rss, F> {
    pub fn write_title(&mut self, value: &str) -> FeedResult<()> {
        self.write_text_element(names::TITLE, value)
    }

    pub fn write_description(&mut self, value: &str) -> FeedResult<()> {
        self.write_text_element(names::DESCRIPTION, value)
    }

    pub fn write_copyright(&mut self, value: &str) -> FeedResult<()> {
        self.write_text_element(names::COPYRIGHT, value)
    }

    pub fn write_generator(&mut self, value: &str) -> FeedResult<()> {
        self.write_text_element(names::GENERATOR, value)
    }

    /// Writes a language tag such as `en-us`.
    pub fn write_language(&mut self, tag: &str) -> FeedResult<()> {
        if tag.is_empty() {
            return Err(FeedError::argument("Language tag is required"));
        }
        self.write_text_element(names::LANGUAGE, tag)
    }

    /// Writes the `docs` link to the RSS 2.0 specification.
    pub fn write_docs(&mut self) -> FeedResult<()> {
        self.write_text_element(names::DOCS, names::SPECIFICATION_LINK)
    }

    pub fn write_last_build_date(&mut self, date: &DateTime<FixedOffset>) -> FeedResult<()> {
        self.write_value(names::LAST_BUILD_DATE, date)
    }

    pub fn write_pub_date(&mut self, date: &DateTime<FixedOffset>) -> FeedResult<()> {
        self.write_value(names::PUB_DATE, date)
    }

    /// Writes a `cloud` element for the notification endpoint at `uri`.
    ///
    /// `protocol` defaults to `xml-rpc`.
    ///
    /// # Errors
    ///
    /// [`FeedError::Argument`] if `uri` is not absolute or
    /// `register_procedure` is empty.
    pub fn write_cloud(
        &mut self,
        uri: &str,
        register_procedure: &str,
        protocol: Option<&str>,
    ) -> FeedResult<()> {
        let url = require_absolute(uri)?;
        if register_procedure.is_empty() {
            return Err(FeedError::argument("Register procedure is required"));
        }

        let mut path = url.path().to_owned();
        if let Some(query) = url.query() {
            path.push('?');
            path.push_str(query);
        }
        let port = url
            .port_or_known_default()
            .map(|p| p.to_string())
            .unwrap_or_default();

        let mut cloud = SyndicationContent::new(names::CLOUD);
        cloud.add_attribute(SyndicationAttribute::new(
            attr::DOMAIN,
            url.host_str().unwrap_or_default(),
        ));
        cloud.add_attribute(SyndicationAttribute::new(attr::PORT, port));
        cloud.add_attribute(SyndicationAttribute::new(attr::PATH, path));
        cloud.add_attribute(SyndicationAttribute::new(
            attr::REGISTER_PROCEDURE,
            register_procedure,
        ));
        cloud.add_attribute(SyndicationAttribute::new(
            attr::PROTOCOL,
            protocol.unwrap_or(names::DEFAULT_CLOUD_PROTOCOL),
        ));

        self.write_content(&cloud)
    }

    pub fn write_skip_days(&mut self, days: &[Weekday]) -> FeedResult<()> {
        let mut skip_days = SyndicationContent::new(names::SKIP_DAYS);
        for day in days {
            let value = self.formatter().format_value(day);
            skip_days.add_field(SyndicationContent::with_value(names::DAY, value));
        }
        self.write_content(&skip_days)
    }

    /// # Errors
    ///
    /// [`FeedError::Argument`] if an hour is outside `0..=23`.
    pub fn write_skip_hours(&mut self, hours: &[u8]) -> FeedResult<()> {
        let mut skip_hours = SyndicationContent::new(names::SKIP_HOURS);
        for hour in hours {
            if *hour > 23 {
                return Err(FeedError::argument(format!(
                    "Hour value must be between 0 and 23, got {hour}"
                )));
            }
            let value = self.formatter().format_value(hour);
            skip_hours.add_field(SyndicationContent::with_value(names::HOUR, value));
        }
        self.write_content(&skip_hours)
    }

    /// Writes `ttl` in whole minutes, rounded up, at least one.
    pub fn write_time_to_live(&mut self, ttl: Duration) -> FeedResult<()> {
        if ttl.is_zero() {
            return Err(FeedError::argument("Time to live must not be zero"));
        }
        let minutes = ttl.as_nanos().div_ceil(60_000_000_000).max(1);
        let minutes = u64::try_from(minutes).unwrap_or(u64::MAX);
        self.write_value(names::TIME_TO_LIVE, &minutes)
    }
}
