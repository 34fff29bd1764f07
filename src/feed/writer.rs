//! Streaming feed writer.
//!
//! Each write is formatted and flushed to the output immediately. The
//! wrapper element(s) are opened lazily on the first write; closing them is
//! left to the caller via [`XmlFeedWriter::finish`] or a raw write.

use std::io::Write;
use std::marker::PhantomData;

use quick_xml::events::{BytesDecl, BytesEnd, Event};
use quick_xml::Writer;

use super::element::FeedSyntax;
use super::formatter::FeedFormatter;
use crate::config::WriterConfig;
use crate::error::{FeedError, FeedResult};
use crate::model::{
    FeedValue, SyndicationAttribute, SyndicationCategory, SyndicationContent, SyndicationImage,
    SyndicationLink, SyndicationPerson,
};

/// Writer generic over the output, the feed syntax and the formatter.
///
/// Use the [`RssFeedWriter`](crate::rss::RssFeedWriter) and
/// [`AtomFeedWriter`](crate::atom::AtomFeedWriter) aliases.
pub struct XmlFeedWriter<W: Write, S, F> {
    writer: Writer<W>,
    formatter: F,
    attributes: Vec<SyndicationAttribute>,
    config: WriterConfig,
    started: bool,
    _syntax: PhantomData<S>,
}

impl<W: Write, S: FeedSyntax, F: FeedFormatter> XmlFeedWriter<W, S, F> {
    /// Creates a writer with a custom formatter.
    ///
    /// `attributes` are written on the outermost wrapper element; namespace
    /// declarations among them should also have been given to `formatter`.
    pub fn with_formatter(
        output: W,
        attributes: Vec<SyndicationAttribute>,
        formatter: F,
        config: WriterConfig,
    ) -> Self {
        Self {
            writer: Writer::new(output),
            formatter,
            attributes: S::root_attributes(attributes),
            config,
            started: false,
            _syntax: PhantomData,
        }
    }

    pub fn formatter(&self) -> &F {
        &self.formatter
    }

    /// Attributes of the outermost wrapper element.
    pub fn attributes(&self) -> &[SyndicationAttribute] {
        &self.attributes
    }

    /// Writes `text` verbatim after opening the root if needed.
    pub fn write_raw(&mut self, text: &str) -> FeedResult<()> {
        self.start_feed()?;
        self.writer.get_mut().write_all(text.as_bytes())?;
        Ok(())
    }

    pub fn write_content(&mut self, content: &SyndicationContent) -> FeedResult<()> {
        let text = self.formatter.format(content)?;
        self.write_raw(&text)
    }

    pub fn write_item(&mut self, item: &F::Item) -> FeedResult<()> {
        let text = self.formatter.format_item(item)?;
        self.write_raw(&text)
    }

    pub fn write_link(&mut self, link: &SyndicationLink) -> FeedResult<()> {
        let text = self.formatter.format_link(link)?;
        self.write_raw(&text)
    }

    pub fn write_person(&mut self, person: &SyndicationPerson) -> FeedResult<()> {
        let text = self.formatter.format_person(person)?;
        self.write_raw(&text)
    }

    pub fn write_category(&mut self, category: &SyndicationCategory) -> FeedResult<()> {
        let text = self.formatter.format_category(category)?;
        self.write_raw(&text)
    }

    pub fn write_image(&mut self, image: &SyndicationImage) -> FeedResult<()> {
        let text = self.formatter.format_image(image)?;
        self.write_raw(&text)
    }

    /// Writes `<name>value</name>` with the value in the format's encoding.
    ///
    /// # Errors
    ///
    /// [`FeedError::Argument`] if `name` is empty.
    pub fn write_value<T: FeedValue>(&mut self, name: &str, value: &T) -> FeedResult<()> {
        let value = self.formatter.format_value(value);
        self.write_text_element(name, &value)
    }

    /// Writes `<name>value</name>` with `value` taken as is.
    pub(crate) fn write_text_element(&mut self, name: &str, value: &str) -> FeedResult<()> {
        if name.is_empty() {
            return Err(FeedError::argument("Value name is required"));
        }
        self.write_content(&SyndicationContent::with_value(name, value))
    }

    pub fn flush(&mut self) -> FeedResult<()> {
        self.writer.get_mut().flush()?;
        Ok(())
    }

    /// Closes the wrapper elements and returns the output.
    ///
    /// A writer that never wrote anything produces an empty feed.
    pub fn finish(mut self) -> FeedResult<W> {
        self.start_feed()?;
        for root in S::ROOT.iter().rev() {
            self.writer
                .write_event(Event::End(BytesEnd::new(root.name)))
                .map_err(FeedError::xml)?;
        }
        self.flush()?;
        Ok(self.writer.into_inner())
    }

    /// Returns the output as is, without closing anything.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn start_feed(&mut self) -> FeedResult<()> {
        if self.started {
            return Ok(());
        }

        if self.config.xml_declaration {
            self.writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
                .map_err(FeedError::xml)?;
        }
        for start in S::root_start_tags(&self.attributes) {
            self.writer
                .write_event(Event::Start(start))
                .map_err(FeedError::xml)?;
        }

        self.started = true;
        tracing::debug!(
            format = S::NAME,
            attributes = self.attributes.len(),
            "Opened feed root"
        );
        Ok(())
    }
}
