//! RSS 2.0.
//!
//! RSS elements carry no namespace. Extension elements in other namespaces
//! are read as plain content and ignored inside items.

pub mod formatter;
pub mod names;
pub mod parser;
pub mod writer;

use std::io::{BufRead, Write};

use quick_xml::events::BytesStart;

pub use formatter::RssFormatter;
pub use parser::RssParser;

use crate::config::{ReaderConfig, WriterConfig};
use crate::feed::element::start_tag;
use crate::feed::{ElementKind, FeedSyntax, RootElement, XmlFeedReader, XmlFeedWriter};
use crate::model::SyndicationAttribute;
use crate::xml::{plain_text, PayloadRule};

/// Marker type describing RSS 2.0 documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rss;

pub type RssFeedReader<R, P = RssParser> = XmlFeedReader<R, Rss, P>;
pub type RssFeedWriter<W, F = RssFormatter> = XmlFeedWriter<W, Rss, F>;

impl FeedSyntax for Rss {
    const NAME: &'static str = "Rss";

    const ROOT: &'static [RootElement] = &[
        RootElement {
            name: names::RSS,
            namespace: None,
            required_attribute: Some((names::attr::VERSION, names::VERSION)),
        },
        RootElement {
            name: names::CHANNEL,
            namespace: None,
            required_attribute: None,
        },
    ];

    const NAMESPACE: Option<&'static str> = None;

    fn classify(name: &str, namespace: Option<&str>) -> ElementKind {
        if namespace.is_some_and(|ns| !ns.is_empty()) {
            return ElementKind::Content;
        }
        match name {
            names::ITEM => ElementKind::Item,
            names::LINK => ElementKind::Link,
            names::CATEGORY => ElementKind::Category,
            names::AUTHOR | names::MANAGING_EDITOR => ElementKind::Person,
            names::IMAGE => ElementKind::Image,
            _ => ElementKind::Content,
        }
    }

    fn payload_rule() -> PayloadRule {
        plain_text
    }

    fn root_attributes(attributes: Vec<SyndicationAttribute>) -> Vec<SyndicationAttribute> {
        // version is always written by the root itself
        attributes
            .into_iter()
            .filter(|a| !(a.name == names::attr::VERSION && a.namespace.is_none()))
            .collect()
    }

    fn root_start_tags(attributes: &[SyndicationAttribute]) -> Vec<BytesStart<'static>> {
        let mut rss = start_tag(names::RSS, attributes);
        rss.push_attribute((names::attr::VERSION, names::VERSION));
        vec![rss, BytesStart::new(names::CHANNEL)]
    }
}

impl<R: BufRead> XmlFeedReader<R, Rss, RssParser> {
    /// Creates an RSS reader with the default parser.
    pub fn new(input: R) -> Self {
        Self::with_config(input, ReaderConfig::default())
    }

    pub fn with_config(input: R, config: ReaderConfig) -> Self {
        Self::with_parser(input, RssParser::with_config(config), config)
    }
}

impl<W: Write> XmlFeedWriter<W, Rss, RssFormatter> {
    /// Creates an RSS writer. `attributes` go on the `rss` element.
    pub fn new(output: W, attributes: Vec<SyndicationAttribute>) -> Self {
        Self::with_config(output, attributes, WriterConfig::default())
    }

    pub fn with_config(
        output: W,
        attributes: Vec<SyndicationAttribute>,
        config: WriterConfig,
    ) -> Self {
        let formatter = RssFormatter::with_config(&attributes, config);
        Self::with_formatter(output, attributes, formatter, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Rss::classify("item", None), ElementKind::Item);
        assert_eq!(Rss::classify("managingEditor", None), ElementKind::Person);
        assert_eq!(Rss::classify("author", None), ElementKind::Person);
        assert_eq!(Rss::classify("image", None), ElementKind::Image);
        assert_eq!(Rss::classify("title", None), ElementKind::Content);
        assert_eq!(
            Rss::classify("link", Some("http://www.w3.org/2005/Atom")),
            ElementKind::Content
        );
    }

    #[test]
    fn test_root_start_tags() {
        let attrs = Rss::root_attributes(vec![
            SyndicationAttribute::new("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            SyndicationAttribute::new("version", "0.91"),
        ]);
        let tags = Rss::root_start_tags(&attrs);
        assert_eq!(tags.len(), 2);

        let rss: Vec<_> = tags[0]
            .attributes()
            .flatten()
            .map(|a| String::from_utf8_lossy(a.key.as_ref()).into_owned())
            .collect();
        assert_eq!(rss, vec!["xmlns:dc", "version"]);
        assert_eq!(tags[1].name().as_ref(), b"channel");
    }
}
