//! Builds a [`SyndicationContent`] tree from the text of one element.

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::NsReader;

use super::{
    is_xml_schema_type, is_xmlns, local_name, resolved_namespace, Payload, PayloadRule, XHTML_NS,
};
use crate::error::{FeedError, FeedResult};
use crate::model::{SyndicationAttribute, SyndicationContent};

/// Parses `text`, which must hold a single element, into a content tree.
///
/// Comments, processing instructions and whitespace around the element are
/// ignored. `rule` decides per element whether its body is captured as
/// text/children or as raw markup.
///
/// # Errors
///
/// - [`FeedError::Argument`] if `text` is empty
/// - [`FeedError::Format`] if there is no element, the element mixes text
///   and child elements, or nesting exceeds `max_depth`
/// - [`FeedError::Xml`] if the text is not well-formed
pub(crate) fn parse_content(
    text: &str,
    rule: PayloadRule,
    max_depth: usize,
) -> FeedResult<SyndicationContent> {
    if text.trim().is_empty() {
        return Err(FeedError::argument("Content text is empty"));
    }

    let mut builder = TreeBuilder {
        reader: NsReader::from_str(text),
        source: text,
        rule,
        max_depth,
    };
    builder.read_root()
}

fn is_blank(text: &BytesText<'_>) -> bool {
    text.iter().all(u8::is_ascii_whitespace)
}

struct TreeBuilder<'a> {
    reader: NsReader<&'a [u8]>,
    source: &'a str,
    rule: PayloadRule,
    max_depth: usize,
}

impl<'a> TreeBuilder<'a> {
    fn read_root(&mut self) -> FeedResult<SyndicationContent> {
        loop {
            match self.reader.read_event().map_err(FeedError::xml)? {
                Event::Start(start) => return self.read_element(&start, false, 1),
                Event::Empty(start) => return self.read_element(&start, true, 1),
                Event::Text(text) if is_blank(&text) => {}
                Event::Text(_) | Event::CData(_) => {
                    return Err(FeedError::format("Expected an element, found text"));
                }
                Event::Eof => return Err(FeedError::format("No element found")),
                _ => {}
            }
        }
    }

    fn read_element(
        &mut self,
        start: &BytesStart<'a>,
        empty: bool,
        depth: usize,
    ) -> FeedResult<SyndicationContent> {
        if depth > self.max_depth {
            return Err(FeedError::format(format!(
                "Element nesting exceeds {} levels",
                self.max_depth
            )));
        }

        let (ns, local) = self.reader.resolve_element(start.name());
        let namespace = resolved_namespace(ns)?;
        let mut content = SyndicationContent::new(local_name(local)?);
        content.namespace = namespace;

        self.read_attributes(start, &mut content)?;

        if empty {
            return Ok(content);
        }

        match (self.rule)(&content) {
            Payload::InnerXml => {
                let span = self
                    .reader
                    .read_to_end(start.name())
                    .map_err(FeedError::xml)?;
                content.value = Some(span_text(self.source, span.start, span.end)?.to_owned());
            }
            Payload::Xhtml => self.read_xhtml(&mut content)?,
            Payload::Text => self.read_body(&mut content, depth)?,
        }

        Ok(content)
    }

    fn read_attributes(
        &self,
        start: &BytesStart<'a>,
        content: &mut SyndicationContent,
    ) -> FeedResult<()> {
        for attr in start.attributes() {
            let attr = attr.map_err(FeedError::xml)?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }

            let (ns, name) = self.reader.resolve_attribute(attr.key);
            let namespace = resolved_namespace(ns)?;
            let name = local_name(name)?;
            if is_xmlns(&name, namespace.as_deref())
                || is_xml_schema_type(&name, namespace.as_deref())
            {
                continue;
            }

            let value = attr
                .decode_and_unescape_value(self.reader.decoder())
                .map_err(FeedError::xml)?;
            content.add_attribute(SyndicationAttribute {
                name,
                namespace,
                value: Some(value.into_owned()),
            });
        }
        Ok(())
    }

    /// Reads either a scalar value or a list of child elements.
    fn read_body(&mut self, content: &mut SyndicationContent, depth: usize) -> FeedResult<()> {
        let mut text = String::new();
        let mut has_text = false;

        loop {
            match self.reader.read_event().map_err(FeedError::xml)? {
                Event::Text(t) => {
                    let unescaped = t.unescape().map_err(FeedError::xml)?;
                    let blank = unescaped.trim().is_empty();
                    if !content.fields.is_empty() {
                        if !blank {
                            return Err(mixed_content(&content.name));
                        }
                        continue;
                    }
                    has_text |= !blank;
                    text.push_str(&unescaped);
                }
                Event::CData(c) => {
                    if !content.fields.is_empty() {
                        return Err(mixed_content(&content.name));
                    }
                    has_text = true;
                    text.push_str(std::str::from_utf8(&c).map_err(FeedError::xml)?);
                }
                Event::Start(child) => {
                    if has_text {
                        return Err(mixed_content(&content.name));
                    }
                    let field = self.read_element(&child, false, depth + 1)?;
                    content.add_field(field);
                }
                Event::Empty(child) => {
                    if has_text {
                        return Err(mixed_content(&content.name));
                    }
                    let field = self.read_element(&child, true, depth + 1)?;
                    content.add_field(field);
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(FeedError::format(format!(
                        "Unexpected end of input inside '{}'",
                        content.name
                    )));
                }
                _ => {}
            }
        }

        if has_text {
            content.value = Some(text);
        }
        Ok(())
    }

    /// Captures the inner markup of the XHTML `div` wrapper.
    fn read_xhtml(&mut self, content: &mut SyndicationContent) -> FeedResult<()> {
        loop {
            let (ns, event) = self.reader.read_resolved_event().map_err(FeedError::xml)?;
            let ns = resolved_namespace(ns)?;
            match event {
                Event::Text(t) if is_blank(&t) => {}
                Event::Comment(_) => {}
                Event::Start(div) if ns.as_deref() == Some(XHTML_NS) => {
                    let span = self
                        .reader
                        .read_to_end(div.name())
                        .map_err(FeedError::xml)?;
                    content.value = Some(span_text(self.source, span.start, span.end)?.to_owned());
                    break;
                }
                Event::Empty(_) if ns.as_deref() == Some(XHTML_NS) => {
                    content.value = Some(String::new());
                    break;
                }
                _ => return Err(FeedError::format("Invalid Xhtml namespace")),
            }
        }

        loop {
            match self.reader.read_event().map_err(FeedError::xml)? {
                Event::End(_) => return Ok(()),
                Event::Text(t) if is_blank(&t) => {}
                Event::Comment(_) => {}
                _ => {
                    return Err(FeedError::format(format!(
                        "Unexpected content after Xhtml div in '{}'",
                        content.name
                    )));
                }
            }
        }
    }
}

/// Text of `source` between two tokenizer offsets.
fn span_text(source: &str, start: u64, end: u64) -> FeedResult<&str> {
    usize::try_from(start)
        .ok()
        .zip(usize::try_from(end).ok())
        .and_then(|(start, end)| source.get(start..end))
        .ok_or_else(|| {
            FeedError::format(format!(
                "Inner markup span {start}..{end} is outside the element text"
            ))
        })
}

fn mixed_content(name: &str) -> FeedError {
    FeedError::format(format!("Element '{}' mixes text and child elements", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{is_xhtml_media_type, is_xml_media_type, plain_text};
    use pretty_assertions::assert_eq;

    fn markup_rule(content: &SyndicationContent) -> Payload {
        let ty = content.attribute("type");
        if is_xml_media_type(ty) && content.name == "content" {
            Payload::InnerXml
        } else if is_xhtml_media_type(ty) {
            Payload::Xhtml
        } else {
            Payload::Text
        }
    }

    #[test]
    fn test_parse_item_with_fields() {
        let xml = r#"<item xmlns:dc="http://purl.org/dc/elements/1.1/">
            <title>Lorem &amp; ipsum</title>
            <guid isPermaLink="true">http://example.com/1</guid>
            <dc:creator>John</dc:creator>
        </item>"#;
        let content = parse_content(xml, plain_text, 64).expect("parse item");

        assert_eq!(content.name, "item");
        assert_eq!(content.namespace, None);
        assert!(content.attributes.is_empty(), "xmlns:dc must be dropped");
        assert_eq!(content.value, None);
        assert_eq!(content.fields.len(), 3);
        assert_eq!(content.fields[0].value.as_deref(), Some("Lorem & ipsum"));
        assert_eq!(content.fields[1].attribute("isPermaLink"), Some("true"));
        assert_eq!(content.fields[2].name, "creator");
        assert_eq!(
            content.fields[2].namespace.as_deref(),
            Some("http://purl.org/dc/elements/1.1/")
        );
    }

    #[test]
    fn test_xsi_type_attribute_dropped() {
        let xml = r#"<value xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:type="string" kind="a">x</value>"#;
        let content = parse_content(xml, plain_text, 64).unwrap();
        assert_eq!(content.attributes.len(), 1);
        assert_eq!(content.attributes[0].name, "kind");
    }

    #[test]
    fn test_cdata_and_whitespace_only() {
        let content = parse_content("<d><![CDATA[<b>bold</b>]]></d>", plain_text, 64).unwrap();
        assert_eq!(content.value.as_deref(), Some("<b>bold</b>"));

        let content = parse_content("<d>   </d>", plain_text, 64).unwrap();
        assert_eq!(content.value, None);

        let content = parse_content("<d/>", plain_text, 64).unwrap();
        assert_eq!(content.value, None);
        assert!(content.fields.is_empty());
    }

    #[test]
    fn test_inner_xml_kept_raw() {
        let xml = r#"<content type="application/xml"><note a="1">x &amp; y</note></content>"#;
        let content = parse_content(xml, markup_rule, 64).unwrap();
        assert_eq!(content.value.as_deref(), Some(r#"<note a="1">x &amp; y</note>"#));
        assert!(content.fields.is_empty());
    }

    #[test]
    fn test_span_text_bounds() {
        let source = "<a>héllo</a>";
        assert_eq!(span_text(source, 3, 9).unwrap(), "héllo");
        assert!(matches!(span_text(source, 3, 64), Err(FeedError::Format(_))));
        assert!(matches!(span_text(source, 9, 3), Err(FeedError::Format(_))));
        // 5 falls inside the two-byte 'é'
        assert!(matches!(span_text(source, 5, 9), Err(FeedError::Format(_))));
    }

    #[test]
    fn test_xhtml_div_unwrapped() {
        let xml = r#"<summary type="xhtml"><div xmlns="http://www.w3.org/1999/xhtml">Hello <b>world</b></div></summary>"#;
        let content = parse_content(xml, markup_rule, 64).unwrap();
        assert_eq!(content.value.as_deref(), Some("Hello <b>world</b>"));
    }

    #[test]
    fn test_xhtml_requires_namespace() {
        let xml = r#"<summary type="xhtml"><div>Hello</div></summary>"#;
        assert!(matches!(
            parse_content(xml, markup_rule, 64),
            Err(FeedError::Format(_))
        ));
    }

    #[test]
    fn test_depth_limit() {
        let xml = "<a><b><c><d>deep</d></c></b></a>";
        assert!(parse_content(xml, plain_text, 4).is_ok());
        assert!(matches!(
            parse_content(xml, plain_text, 3),
            Err(FeedError::Format(_))
        ));
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            parse_content("", plain_text, 64),
            Err(FeedError::Argument(_))
        ));
        assert!(matches!(
            parse_content("just text", plain_text, 64),
            Err(FeedError::Format(_))
        ));
        assert!(matches!(
            parse_content("<a>text<b/></a>", plain_text, 64),
            Err(FeedError::Format(_))
        ));
        assert!(parse_content("<a><b></a>", plain_text, 64).is_err());
    }

    #[test]
    fn test_unknown_prefix_is_format_error() {
        assert!(matches!(
            parse_content("<x:item>1</x:item>", plain_text, 64),
            Err(FeedError::Format(_))
        ));
    }
}
