//! Element classification and per-format root descriptions.

use std::fmt;

use quick_xml::events::BytesStart;

use crate::model::SyndicationAttribute;
use crate::xml::{PayloadRule, XMLNS_NS};

/// Semantic kind of an element, as seen by a feed reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementKind {
    /// No current element.
    #[default]
    None,
    Item,
    Link,
    Person,
    /// Any element without a more specific kind.
    Content,
    Category,
    Image,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::None => "None",
            ElementKind::Item => "Item",
            ElementKind::Link => "Link",
            ElementKind::Person => "Person",
            ElementKind::Content => "Content",
            ElementKind::Category => "Category",
            ElementKind::Image => "Image",
        };
        f.write_str(name)
    }
}

/// One wrapper element a document must open with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootElement {
    pub name: &'static str,
    pub namespace: Option<&'static str>,
    /// Attribute that must be present with exactly this value.
    pub required_attribute: Option<(&'static str, &'static str)>,
}

/// Static description of a feed format.
///
/// Implemented by the [`Rss`](crate::rss::Rss) and [`Atom`](crate::atom::Atom)
/// marker types; readers and writers are generic over it.
pub trait FeedSyntax {
    /// Format name used in messages and logs.
    const NAME: &'static str;

    /// Wrapper elements, outermost first.
    const ROOT: &'static [RootElement];

    /// Namespace of the format's own elements. `None` for RSS.
    const NAMESPACE: Option<&'static str>;

    /// Maps an element to its semantic kind.
    fn classify(name: &str, namespace: Option<&str>) -> ElementKind;

    /// Decides how element bodies are captured and rendered.
    fn payload_rule() -> PayloadRule;

    /// Normalizes the caller-supplied root attributes before use.
    fn root_attributes(attributes: Vec<SyndicationAttribute>) -> Vec<SyndicationAttribute> {
        attributes
    }

    /// Start tags of the wrapper elements, outermost first.
    fn root_start_tags(attributes: &[SyndicationAttribute]) -> Vec<BytesStart<'static>>;
}

/// Qualified name under which a root attribute is written.
pub(crate) fn root_attribute_name(attribute: &SyndicationAttribute) -> String {
    match attribute.namespace.as_deref() {
        Some(XMLNS_NS) if attribute.name != "xmlns" && !attribute.name.starts_with("xmlns:") => {
            format!("xmlns:{}", attribute.name)
        }
        _ => attribute.name.clone(),
    }
}

/// Start tag carrying `attributes` in order.
pub(crate) fn start_tag(
    name: &'static str,
    attributes: &[SyndicationAttribute],
) -> BytesStart<'static> {
    let mut start = BytesStart::new(name);
    for attribute in attributes {
        let key = root_attribute_name(attribute);
        start.push_attribute((key.as_str(), attribute.value_or_empty()));
    }
    start
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(ElementKind::Category.to_string(), "Category");
        assert_eq!(ElementKind::default(), ElementKind::None);
    }

    #[test]
    fn test_root_attribute_names() {
        let dc = SyndicationAttribute::with_namespace(
            "dc",
            XMLNS_NS,
            "http://purl.org/dc/elements/1.1/",
        );
        assert_eq!(root_attribute_name(&dc), "xmlns:dc");

        let plain = SyndicationAttribute::new("xmlns:media", "http://search.yahoo.com/mrss/");
        assert_eq!(root_attribute_name(&plain), "xmlns:media");

        let tag = start_tag("rss", &[dc]);
        let attrs: Vec<_> = tag.attributes().flatten().collect();
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].key.as_ref(), b"xmlns:dc");
    }
}
