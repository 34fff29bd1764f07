//! Atom 1.0.
//!
//! Atom elements live in the `http://www.w3.org/2005/Atom` namespace.
//! Content trees built by the formatter leave it implicit: an element
//! without a namespace is written, and read back, as an Atom element.

pub mod formatter;
pub mod names;
pub mod parser;
pub mod writer;

use std::io::{BufRead, Write};

use quick_xml::events::BytesStart;

pub use formatter::AtomFormatter;
pub use parser::AtomParser;

use crate::config::{ReaderConfig, WriterConfig};
use crate::error::FeedResult;
use crate::feed::element::start_tag;
use crate::feed::{ElementKind, FeedParser, FeedSyntax, RootElement, XmlFeedReader, XmlFeedWriter};
use crate::model::{AtomEntry, SyndicationAttribute, SyndicationContent};
use crate::xml::{
    is_xhtml_media_type, is_xml_media_type, split_name, Payload, PayloadRule, XMLNS_NS,
};

/// Marker type describing Atom 1.0 documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Atom;

pub type AtomFeedReader<R, P = AtomParser> = XmlFeedReader<R, Atom, P>;
pub type AtomFeedWriter<W, F = AtomFormatter> = XmlFeedWriter<W, Atom, F>;

/// True for elements without a namespace or in the Atom namespace.
pub(crate) fn is_atom(content: &SyndicationContent) -> bool {
    content
        .namespace
        .as_deref()
        .map_or(true, |ns| ns.is_empty() || ns == names::NAMESPACE)
}

/// Attribute without a namespace or in the Atom namespace, last occurrence wins.
pub(crate) fn atom_attribute<'a>(content: &'a SyndicationContent, name: &str) -> Option<&'a str> {
    content
        .attributes
        .iter()
        .rev()
        .find(|a| {
            a.name == name
                && a
                    .namespace
                    .as_deref()
                    .map_or(true, |ns| ns.is_empty() || ns == names::NAMESPACE)
        })
        .and_then(|a| a.value.as_deref())
}

/// Text constructs carry markup according to their `type` attribute.
fn atom_payload(content: &SyndicationContent) -> Payload {
    let media_type = atom_attribute(content, names::attr::TYPE);
    if !is_atom(content) {
        Payload::Text
    } else if is_xml_media_type(media_type) && content.name == names::CONTENT {
        Payload::InnerXml
    } else if is_xhtml_media_type(media_type) {
        Payload::Xhtml
    } else {
        Payload::Text
    }
}

/// Puts `xmlns="http://www.w3.org/2005/Atom"` first unless the attributes
/// already make Atom the default namespace.
///
/// A prefixed binding alone is not enough: the `feed` element itself is
/// written unprefixed.
pub(crate) fn ensure_atom_namespace(
    mut attributes: Vec<SyndicationAttribute>,
) -> Vec<SyndicationAttribute> {
    let declared = attributes.iter().any(|a| {
        let default_binding = a.name == "xmlns"
            || (a.namespace.as_deref() == Some(XMLNS_NS) && split_name(&a.name).1 == "xmlns");
        default_binding && a.value.as_deref() == Some(names::NAMESPACE)
    });
    if !declared {
        attributes.insert(0, SyndicationAttribute::new("xmlns", names::NAMESPACE));
    }
    attributes
}

impl FeedSyntax for Atom {
    const NAME: &'static str = "Atom";

    const ROOT: &'static [RootElement] = &[RootElement {
        name: names::FEED,
        namespace: Some(names::NAMESPACE),
        required_attribute: None,
    }];

    const NAMESPACE: Option<&'static str> = Some(names::NAMESPACE);

    fn classify(name: &str, namespace: Option<&str>) -> ElementKind {
        if namespace != Some(names::NAMESPACE) {
            return ElementKind::Content;
        }
        match name {
            names::ENTRY => ElementKind::Item,
            names::LINK => ElementKind::Link,
            names::CATEGORY => ElementKind::Category,
            names::LOGO | names::ICON => ElementKind::Image,
            names::AUTHOR | names::CONTRIBUTOR => ElementKind::Person,
            _ => ElementKind::Content,
        }
    }

    fn payload_rule() -> PayloadRule {
        atom_payload
    }

    fn root_attributes(attributes: Vec<SyndicationAttribute>) -> Vec<SyndicationAttribute> {
        ensure_atom_namespace(attributes)
    }

    fn root_start_tags(attributes: &[SyndicationAttribute]) -> Vec<BytesStart<'static>> {
        vec![start_tag(names::FEED, attributes)]
    }
}

impl<R: BufRead> XmlFeedReader<R, Atom, AtomParser> {
    /// Creates an Atom reader with the default parser.
    pub fn new(input: R) -> Self {
        Self::with_config(input, ReaderConfig::default())
    }

    pub fn with_config(input: R, config: ReaderConfig) -> Self {
        Self::with_parser(input, AtomParser::with_config(config), config)
    }
}

impl<R: BufRead, P: FeedParser<Item = AtomEntry>> XmlFeedReader<R, Atom, P> {
    /// Reads the current `entry`.
    pub fn read_entry(&mut self) -> FeedResult<AtomEntry> {
        self.read_item()
    }
}

impl<W: Write> XmlFeedWriter<W, Atom, AtomFormatter> {
    /// Creates an Atom writer. `attributes` go on the `feed` element, after
    /// the Atom namespace declaration when that is missing.
    pub fn new(output: W, attributes: Vec<SyndicationAttribute>) -> Self {
        Self::with_config(output, attributes, WriterConfig::default())
    }

    pub fn with_config(
        output: W,
        attributes: Vec<SyndicationAttribute>,
        config: WriterConfig,
    ) -> Self {
        let attributes = ensure_atom_namespace(attributes);
        let formatter = AtomFormatter::with_config(&attributes, config);
        Self::with_formatter(output, attributes, formatter, config)
    }
}
