//! Renders a [`SyndicationContent`] tree to XML text.

use quick_xml::escape::partial_escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::{NsReader, Writer};

use super::scope::NamespaceScope;
use super::{
    local_name, needs_xml_escape, resolved_namespace, split_name, Payload, PayloadRule, XHTML_NS,
    XMLNS_NS,
};
use crate::error::{FeedError, FeedResult};
use crate::model::{SyndicationAttribute, SyndicationContent};

/// Turns content trees into element text for one feed format.
///
/// The renderer starts out "inside" the feed's root element: namespace
/// declarations among the known root attributes are treated as already in
/// scope, so elements in those namespaces reuse the declared prefixes
/// instead of redeclaring them.
#[derive(Debug, Clone)]
pub(crate) struct ContentRenderer {
    scope: NamespaceScope,
    default_namespace: Option<String>,
    rule: PayloadRule,
    use_cdata: bool,
    indent: usize,
}

impl ContentRenderer {
    pub fn new(
        known_attributes: &[SyndicationAttribute],
        default_namespace: Option<&str>,
        rule: PayloadRule,
    ) -> Self {
        let mut scope = NamespaceScope::new();
        for attr in known_attributes {
            let value = attr.value_or_empty();
            if attr.namespace.as_deref() == Some(XMLNS_NS) {
                let (_, local) = split_name(&attr.name);
                if local == "xmlns" {
                    scope.declare(None, value);
                } else {
                    scope.declare(Some(local), value);
                }
            } else {
                scope.declare_attribute(&attr.name, value);
            }
        }

        Self {
            scope,
            default_namespace: default_namespace.map(str::to_owned),
            rule,
            use_cdata: false,
            indent: 0,
        }
    }

    pub fn set_use_cdata(&mut self, use_cdata: bool) {
        self.use_cdata = use_cdata;
    }

    pub fn use_cdata(&self) -> bool {
        self.use_cdata
    }

    pub fn set_indent(&mut self, indent: usize) {
        self.indent = indent;
    }

    /// Renders `content` as a standalone element.
    ///
    /// # Errors
    ///
    /// [`FeedError::Argument`] for an empty element name, [`FeedError::Format`]
    /// or [`FeedError::Xml`] when an embedded XML/XHTML value is not
    /// well-formed.
    pub fn render(&self, content: &SyndicationContent) -> FeedResult<String> {
        let mut writer = if self.indent > 0 {
            Writer::new_with_indent(Vec::new(), b' ', self.indent)
        } else {
            Writer::new(Vec::new())
        };
        let mut scope = self.scope.clone();

        self.write_content(&mut writer, &mut scope, content)?;

        String::from_utf8(writer.into_inner()).map_err(FeedError::xml)
    }

    fn write_content(
        &self,
        writer: &mut Writer<Vec<u8>>,
        scope: &mut NamespaceScope,
        content: &SyndicationContent,
    ) -> FeedResult<()> {
        if content.name.is_empty() {
            return Err(FeedError::argument("Content name is required"));
        }

        scope.push();
        let namespace = content
            .namespace
            .as_deref()
            .filter(|ns| !ns.is_empty())
            .or(self.default_namespace.as_deref());

        let mut declarations = Vec::new();
        let qname = match namespace {
            Some(ns) => element_name(scope, &content.name, ns, &mut declarations),
            None => content.name.clone(),
        };

        let mut start = BytesStart::new(qname.clone());
        for (key, value) in &declarations {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        for attr in &content.attributes {
            let key = attribute_name(scope, attr, &mut start);
            start.push_attribute((key.as_str(), attr.value_or_empty()));
        }

        match &content.value {
            Some(value) => {
                write_event(writer, Event::Start(start))?;
                match (self.rule)(content) {
                    Payload::Xhtml => {
                        scope.push();
                        let mut div_decls = Vec::new();
                        let div_name = element_name(scope, "div", XHTML_NS, &mut div_decls);
                        let mut div = BytesStart::new(div_name.clone());
                        for (key, value) in &div_decls {
                            div.push_attribute((key.as_str(), value.as_str()));
                        }
                        write_event(writer, Event::Start(div))?;
                        copy_fragment(writer, scope, value, XHTML_NS)?;
                        write_event(writer, Event::End(BytesEnd::new(div_name)))?;
                        scope.pop();
                    }
                    Payload::InnerXml => copy_fragment(writer, scope, value, "")?,
                    Payload::Text => self.write_text(writer, value)?,
                }
                write_event(writer, Event::End(BytesEnd::new(qname)))?;
            }
            None if content.fields.is_empty() => {
                write_event(writer, Event::Empty(start))?;
            }
            None => {
                write_event(writer, Event::Start(start))?;
                for field in &content.fields {
                    self.write_content(writer, scope, field)?;
                }
                write_event(writer, Event::End(BytesEnd::new(qname)))?;
            }
        }

        scope.pop();
        Ok(())
    }

    fn write_text(&self, writer: &mut Writer<Vec<u8>>, value: &str) -> FeedResult<()> {
        if value.is_empty() {
            return Ok(());
        }
        if self.use_cdata && needs_xml_escape(value) && !value.contains("]]>") {
            write_event(writer, Event::CData(BytesCData::new(value)))
        } else {
            write_event(
                writer,
                Event::Text(BytesText::from_escaped(partial_escape(value))),
            )
        }
    }
}

fn write_event<'a>(writer: &mut Writer<Vec<u8>>, event: Event<'a>) -> FeedResult<()> {
    writer.write_event(event).map_err(FeedError::xml)
}

/// Resolves the qualified element name, declaring the namespace if needed.
fn element_name(
    scope: &mut NamespaceScope,
    name: &str,
    namespace: &str,
    declarations: &mut Vec<(String, String)>,
) -> String {
    let (prefix, local) = split_name(name);
    match scope.prefix_of(namespace) {
        Some(Some(p)) => format!("{}:{}", p, local),
        Some(None) => local.to_owned(),
        None => match prefix {
            Some(p) => {
                scope.declare(Some(p), namespace);
                declarations.push((format!("xmlns:{}", p), namespace.to_owned()));
                format!("{}:{}", p, local)
            }
            None => {
                scope.declare(None, namespace);
                declarations.push(("xmlns".to_owned(), namespace.to_owned()));
                local.to_owned()
            }
        },
    }
}

/// Resolves the qualified attribute name, declaring a prefix if needed.
fn attribute_name(
    scope: &mut NamespaceScope,
    attr: &SyndicationAttribute,
    start: &mut BytesStart<'_>,
) -> String {
    let value = attr.value_or_empty();
    match attr.namespace.as_deref().filter(|ns| !ns.is_empty()) {
        None => {
            scope.declare_attribute(&attr.name, value);
            attr.name.clone()
        }
        Some(XMLNS_NS) => {
            let (_, local) = split_name(&attr.name);
            if local == "xmlns" {
                scope.declare(None, value);
                "xmlns".to_owned()
            } else {
                scope.declare(Some(local), value);
                format!("xmlns:{}", local)
            }
        }
        Some(ns) => {
            let (prefix, local) = split_name(&attr.name);
            if let Some(Some(p)) = scope.prefix_of(ns) {
                return format!("{}:{}", p, local);
            }
            // Unprefixed attributes never pick up the default namespace
            let p = match prefix {
                Some(p) if scope.namespace_of(Some(p)).is_none() => p.to_owned(),
                _ => scope.generate_prefix(),
            };
            scope.declare(Some(&p), ns);
            start.push_attribute((format!("xmlns:{}", p).as_str(), ns));
            format!("{}:{}", p, local)
        }
    }
}

/// Copies a markup fragment into the writer.
///
/// Unqualified elements of the fragment land in `default_ns`; existing
/// prefixes are reused and text is copied without re-escaping.
fn copy_fragment(
    writer: &mut Writer<Vec<u8>>,
    scope: &mut NamespaceScope,
    fragment: &str,
    default_ns: &str,
) -> FeedResult<()> {
    let mut reader = NsReader::from_str(fragment);
    let mut open: Vec<String> = Vec::new();

    loop {
        let (ns, event) = reader.read_resolved_event().map_err(FeedError::xml)?;
        let ns = resolved_namespace(ns)?;
        match event {
            Event::Start(e) => {
                let (name, start) = fragment_start(scope, &reader, &e, ns, default_ns)?;
                write_event(writer, Event::Start(start))?;
                open.push(name);
            }
            Event::Empty(e) => {
                let (_, start) = fragment_start(scope, &reader, &e, ns, default_ns)?;
                write_event(writer, Event::Empty(start))?;
                scope.pop();
            }
            Event::End(_) => {
                let name = open
                    .pop()
                    .ok_or_else(|| FeedError::format("Unbalanced markup fragment"))?;
                write_event(writer, Event::End(BytesEnd::new(name)))?;
                scope.pop();
            }
            Event::Text(t) => write_event(writer, Event::Text(t))?,
            Event::CData(c) => write_event(writer, Event::CData(c))?,
            Event::Comment(c) => write_event(writer, Event::Comment(c))?,
            Event::PI(p) => write_event(writer, Event::PI(p))?,
            Event::Decl(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if !open.is_empty() {
        return Err(FeedError::format("Unbalanced markup fragment"));
    }
    Ok(())
}

fn fragment_start(
    scope: &mut NamespaceScope,
    reader: &NsReader<&[u8]>,
    e: &BytesStart<'_>,
    ns: Option<String>,
    default_ns: &str,
) -> FeedResult<(String, BytesStart<'static>)> {
    scope.push();
    let local = local_name(e.local_name())?;
    let namespace = ns.as_deref().unwrap_or(default_ns);

    let mut declarations = Vec::new();
    let qname = if namespace.is_empty() {
        if !scope.default_namespace().is_empty() {
            scope.declare(None, "");
            declarations.push(("xmlns".to_owned(), String::new()));
        }
        local
    } else {
        let original = std::str::from_utf8(e.name().into_inner()).map_err(FeedError::xml)?;
        let (prefix, _) = split_name(original);
        let name = match prefix {
            Some(p) => format!("{}:{}", p, local),
            None => local,
        };
        element_name(scope, &name, namespace, &mut declarations)
    };

    let mut start = BytesStart::new(qname.clone());
    for (key, value) in &declarations {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    for attr in e.attributes() {
        let attr = attr.map_err(FeedError::xml)?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = match attr.key.prefix().map(|p| p.into_inner()) {
            Some(prefix) if prefix != b"xml" => {
                let (attr_ns, attr_local) = reader.resolve_attribute(attr.key);
                let attr_ns = resolved_namespace(attr_ns)?;
                let attr_local = local_name(attr_local)?;
                let prefix = std::str::from_utf8(prefix).map_err(FeedError::xml)?;
                let synthetic = SyndicationAttribute {
                    name: format!("{}:{}", prefix, attr_local),
                    namespace: attr_ns,
                    value: None,
                };
                attribute_name(scope, &synthetic, &mut start)
            }
            _ => std::str::from_utf8(attr.key.into_inner())
                .map_err(FeedError::xml)?
                .to_owned(),
        };
        start.push_attribute(Attribute {
            key: QName(key.as_bytes()),
            value: attr.value,
        });
    }

    Ok((qname, start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{is_xhtml_media_type, is_xml_media_type, plain_text};
    use pretty_assertions::assert_eq;

    const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

    fn markup_rule(content: &SyndicationContent) -> Payload {
        let ty = content.attribute("type");
        if is_xhtml_media_type(ty) {
            Payload::Xhtml
        } else if is_xml_media_type(ty) && content.name == "content" {
            Payload::InnerXml
        } else {
            Payload::Text
        }
    }

    fn item() -> SyndicationContent {
        let mut item = SyndicationContent::new("item");
        item.add_field(SyndicationContent::with_value("title", "Fish & Chips"));
        let mut guid = SyndicationContent::with_value("guid", "1234");
        guid.add_attribute(SyndicationAttribute::new("isPermaLink", "false"));
        item.add_field(guid);
        item
    }

    #[test]
    fn test_render_plain_tree() {
        let renderer = ContentRenderer::new(&[], None, plain_text);
        let xml = renderer.render(&item()).unwrap();
        assert_eq!(
            xml,
            r#"<item><title>Fish &amp; Chips</title><guid isPermaLink="false">1234</guid></item>"#
        );
    }

    #[test]
    fn test_empty_element_and_empty_name() {
        let renderer = ContentRenderer::new(&[], None, plain_text);
        assert_eq!(
            renderer.render(&SyndicationContent::new("docs")).unwrap(),
            "<docs/>"
        );
        assert!(matches!(
            renderer.render(&SyndicationContent::new("")),
            Err(FeedError::Argument(_))
        ));
    }

    #[test]
    fn test_known_prefix_is_reused() {
        let known = [SyndicationAttribute::new("xmlns:example", "urn:example")];
        let renderer = ContentRenderer::new(&known, None, plain_text);

        let content = SyndicationContent::in_namespace(
            "customElement",
            "urn:example",
            Some("Custom Value".to_string()),
        );
        assert_eq!(
            renderer.render(&content).unwrap(),
            "<example:customElement>Custom Value</example:customElement>"
        );
    }

    #[test]
    fn test_unknown_namespace_is_declared() {
        let renderer = ContentRenderer::new(&[], None, plain_text);
        let content = SyndicationContent::in_namespace(
            "dc:creator",
            "http://purl.org/dc/elements/1.1/",
            Some("John".to_string()),
        );
        assert_eq!(
            renderer.render(&content).unwrap(),
            r#"<dc:creator xmlns:dc="http://purl.org/dc/elements/1.1/">John</dc:creator>"#
        );

        let content =
            SyndicationContent::in_namespace("note", "urn:notes", Some("x".to_string()));
        assert_eq!(
            renderer.render(&content).unwrap(),
            r#"<note xmlns="urn:notes">x</note>"#
        );
    }

    #[test]
    fn test_default_namespace_inherited() {
        let known = [SyndicationAttribute::new("xmlns", ATOM_NS)];
        let renderer = ContentRenderer::new(&known, Some(ATOM_NS), markup_rule);
        let mut entry = SyndicationContent::new("entry");
        entry.add_field(SyndicationContent::with_value("id", "urn:1"));
        assert_eq!(
            renderer.render(&entry).unwrap(),
            "<entry><id>urn:1</id></entry>"
        );
    }

    #[test]
    fn test_cdata_only_when_enabled_and_needed() {
        let mut renderer = ContentRenderer::new(&[], None, plain_text);
        renderer.set_use_cdata(true);

        let html = SyndicationContent::with_value("description", "<p>Hi</p>");
        assert_eq!(
            renderer.render(&html).unwrap(),
            "<description><![CDATA[<p>Hi</p>]]></description>"
        );

        let plain = SyndicationContent::with_value("description", "Hi");
        assert_eq!(
            renderer.render(&plain).unwrap(),
            "<description>Hi</description>"
        );

        let tricky = SyndicationContent::with_value("description", "a]]>b<");
        assert_eq!(
            renderer.render(&tricky).unwrap(),
            "<description>a]]&gt;b&lt;</description>"
        );
    }

    #[test]
    fn test_xhtml_value_wrapped_in_div() {
        let known = [SyndicationAttribute::new("xmlns", ATOM_NS)];
        let renderer = ContentRenderer::new(&known, Some(ATOM_NS), markup_rule);
        let mut summary = SyndicationContent::with_value("summary", "Hello <b>world</b>");
        summary.add_attribute(SyndicationAttribute::new("type", "xhtml"));

        assert_eq!(
            renderer.render(&summary).unwrap(),
            r#"<summary type="xhtml"><div xmlns="http://www.w3.org/1999/xhtml">Hello <b>world</b></div></summary>"#
        );
    }

    #[test]
    fn test_xml_content_copied_unescaped() {
        let known = [SyndicationAttribute::new("xmlns", ATOM_NS)];
        let renderer = ContentRenderer::new(&known, Some(ATOM_NS), markup_rule);
        let mut content =
            SyndicationContent::with_value("content", r#"<note a="1">x &amp; y</note>"#);
        content.add_attribute(SyndicationAttribute::new("type", "application/xml"));

        assert_eq!(
            renderer.render(&content).unwrap(),
            r#"<content type="application/xml"><note xmlns="" a="1">x &amp; y</note></content>"#
        );
    }

    #[test]
    fn test_malformed_fragment_rejected() {
        let renderer = ContentRenderer::new(&[], None, markup_rule);
        let mut content = SyndicationContent::with_value("content", "<a><b></a>");
        content.add_attribute(SyndicationAttribute::new("type", "xml"));
        assert!(renderer.render(&content).is_err());
    }

    #[test]
    fn test_namespaced_attribute_gets_prefix() {
        let renderer = ContentRenderer::new(&[], None, plain_text);
        let mut content = SyndicationContent::with_value("title", "Hallo");
        content.add_attribute(SyndicationAttribute::with_namespace(
            "lang",
            crate::xml::XML_NS,
            "de",
        ));
        content.add_attribute(SyndicationAttribute::with_namespace("flag", "urn:x", "1"));
        assert_eq!(
            renderer.render(&content).unwrap(),
            r#"<title xml:lang="de" xmlns:ns1="urn:x" ns1:flag="1">Hallo</title>"#
        );
    }
}
