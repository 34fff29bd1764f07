//! Feed-level elements for the Atom writer.

use std::io::Write;

use chrono::{DateTime, FixedOffset};

use super::names::{self, attr};
use super::Atom;
use crate::error::{FeedError, FeedResult};
use crate::feed::{FeedFormatter, XmlFeedWriter};
use crate::model::{SyndicationAttribute, SyndicationContent};

impl<W: Write, F: FeedFormatter> XmlFeedWriter<W, Atom, F> {
    pub fn write_id(&mut self, value: &str) -> FeedResult<()> {
        self.write_text_element(names::ID, value)
    }

    pub fn write_title(&mut self, value: &str) -> FeedResult<()> {
        self.write_text(names::TITLE, value, None)
    }

    pub fn write_subtitle(&mut self, value: &str) -> FeedResult<()> {
        self.write_text(names::SUBTITLE, value, None)
    }

    pub fn write_rights(&mut self, value: &str) -> FeedResult<()> {
        self.write_text(names::RIGHTS, value, None)
    }

    pub fn write_updated(&mut self, date: &DateTime<FixedOffset>) -> FeedResult<()> {
        self.write_value(names::UPDATED, date)
    }

    /// Writes an Atom text construct, `type="html"` and friends included.
    ///
    /// An `xhtml` value is wrapped in an XHTML `div`.
    ///
    /// # Errors
    ///
    /// [`FeedError::Argument`] if `name` is empty.
    pub fn write_text(
        &mut self,
        name: &str,
        value: &str,
        content_type: Option<&str>,
    ) -> FeedResult<()> {
        if name.is_empty() {
            return Err(FeedError::argument("Element name is required"));
        }
        let mut content = SyndicationContent::with_value(name, value);
        if let Some(content_type) = content_type.filter(|t| !t.is_empty()) {
            content.add_attribute(SyndicationAttribute::new(attr::TYPE, content_type));
        }
        self.write_content(&content)
    }

    pub fn write_generator(
        &mut self,
        value: &str,
        uri: Option<&str>,
        version: Option<&str>,
    ) -> FeedResult<()> {
        let mut generator = SyndicationContent::with_value(names::GENERATOR, value);
        if let Some(uri) = uri.filter(|u| !u.is_empty()) {
            generator.add_attribute(SyndicationAttribute::new(attr::URI, uri));
        }
        if let Some(version) = version.filter(|v| !v.is_empty()) {
            generator.add_attribute(SyndicationAttribute::new(attr::VERSION, version));
        }
        self.write_content(&generator)
    }
}
