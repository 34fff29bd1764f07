//! XML plumbing shared by both formats.
//!
//! - [`tree`]: builds a [`SyndicationContent`] from element text
//! - [`render`]: renders a [`SyndicationContent`] back to element text
//! - [`scope`]: namespace-prefix bookkeeping for the renderer

pub(crate) mod render;
pub(crate) mod scope;
pub(crate) mod tree;

use quick_xml::name::{LocalName, ResolveResult};

use crate::error::{FeedError, FeedResult};
use crate::model::SyndicationContent;

pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";
pub const XMLNS_NS: &str = "http://www.w3.org/2000/xmlns/";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// How the text inside an element is captured and re-emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Payload {
    /// Scalar text or child elements.
    Text,
    /// Raw inner markup, stored and written without escaping.
    InnerXml,
    /// Inner markup of a wrapping XHTML `div`.
    Xhtml,
}

/// Chooses the [`Payload`] for a node from its name, namespace and attributes.
pub(crate) type PayloadRule = fn(&SyndicationContent) -> Payload;

/// Payload rule for formats without embedded markup.
pub(crate) fn plain_text(_: &SyndicationContent) -> Payload {
    Payload::Text
}

/// `xml`, `*/xml` and `*+xml` media types.
pub fn is_xml_media_type(value: Option<&str>) -> bool {
    matches!(value, Some(v) if v == "xml" || v.ends_with("/xml") || v.ends_with("+xml"))
}

pub fn is_xhtml_media_type(value: Option<&str>) -> bool {
    value == Some("xhtml")
}

/// Namespace declarations are not surfaced as attributes.
pub fn is_xmlns(name: &str, namespace: Option<&str>) -> bool {
    name == "xmlns" || namespace == Some(XMLNS_NS)
}

/// `xsi:type` is not surfaced as an attribute either.
pub fn is_xml_schema_type(name: &str, namespace: Option<&str>) -> bool {
    name == "type" && namespace == Some(XSI_NS)
}

/// True if `value` contains markup characters or characters outside the BMP.
pub fn needs_xml_escape(value: &str) -> bool {
    value
        .chars()
        .any(|c| matches!(c, '<' | '>' | '&') || c as u32 > 0xFFFF)
}

/// Splits `prefix:local` into its parts.
pub fn split_name(name: &str) -> (Option<&str>, &str) {
    match name.find(':') {
        Some(i) if i > 0 => (Some(&name[..i]), &name[i + 1..]),
        _ => (None, name),
    }
}

/// Converts a tokenizer namespace resolution into an owned namespace.
///
/// Both "unbound" and the empty namespace become `None`.
pub(crate) fn resolved_namespace(result: ResolveResult<'_>) -> FeedResult<Option<String>> {
    match result {
        ResolveResult::Bound(ns) => {
            let ns = std::str::from_utf8(ns.as_ref()).map_err(FeedError::xml)?;
            Ok((!ns.is_empty()).then(|| ns.to_owned()))
        }
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(FeedError::format(format!(
            "Unknown namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

pub(crate) fn local_name(name: LocalName<'_>) -> FeedResult<String> {
    std::str::from_utf8(name.into_inner())
        .map(str::to_owned)
        .map_err(FeedError::xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_types() {
        assert!(is_xml_media_type(Some("xml")));
        assert!(is_xml_media_type(Some("application/xml")));
        assert!(is_xml_media_type(Some("application/atom+xml")));
        assert!(!is_xml_media_type(Some("xhtml")));
        assert!(!is_xml_media_type(Some("html")));
        assert!(!is_xml_media_type(None));

        assert!(is_xhtml_media_type(Some("xhtml")));
        assert!(!is_xhtml_media_type(Some("application/xhtml+xml")));
    }

    #[test]
    fn test_namespace_attribute_filters() {
        assert!(is_xmlns("xmlns", None));
        assert!(is_xmlns("dc", Some(XMLNS_NS)));
        assert!(!is_xmlns("href", None));
        assert!(is_xml_schema_type("type", Some(XSI_NS)));
        assert!(!is_xml_schema_type("type", None));
    }

    #[test]
    fn test_needs_escape() {
        assert!(needs_xml_escape("a < b"));
        assert!(needs_xml_escape("Q&A"));
        assert!(needs_xml_escape("smile \u{1F600}"));
        assert!(!needs_xml_escape("plain text, \"quoted\""));
        assert!(!needs_xml_escape(""));
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("dc:creator"), (Some("dc"), "creator"));
        assert_eq!(split_name("title"), (None, "title"));
        assert_eq!(split_name(":odd"), (None, ":odd"));
    }
}
