//! Atom 1.0 parser.

use super::names::{self, attr, rel};
use super::{atom_attribute, is_atom, Atom};
use crate::config::ReaderConfig;
use crate::error::{FeedError, FeedResult};
use crate::feed::{FeedParser, FeedSyntax};
use crate::model::{
    AtomEntry, SyndicationCategory, SyndicationContent, SyndicationImage, SyndicationLink,
    SyndicationPerson,
};
use crate::util::{parse_uri, try_parse_date};
use crate::xml::tree;

#[derive(Debug, Clone, Default)]
pub struct AtomParser {
    config: ReaderConfig,
}

impl AtomParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    fn parse_expected(
        &self,
        text: &str,
        expected: &[&str],
        what: &str,
    ) -> FeedResult<SyndicationContent> {
        let content = self.parse_content(text)?;
        if !expected.contains(&content.name.as_str()) || !is_atom(&content) {
            return Err(FeedError::format(format!("Invalid Atom {what}")));
        }
        Ok(content)
    }

    /// A `source` element: the feed an entry was copied from.
    ///
    /// The URL comes from `id` when that is a URI, otherwise from the first
    /// `link`.
    fn create_source(&self, content: &SyndicationContent) -> FeedResult<SyndicationLink> {
        let mut url: Option<String> = None;
        let mut title = None;
        let mut last_updated = None;

        for field in content.fields.iter().filter(|f| is_atom(f)) {
            match field.name.as_str() {
                names::ID => {
                    if url.is_none() {
                        url = field.value.as_deref().and_then(parse_uri).map(str::to_owned);
                    }
                }
                names::TITLE => title = field.value.clone(),
                names::UPDATED => last_updated = field.value.as_deref().and_then(try_parse_date),
                names::LINK => {
                    if url.is_none() {
                        url = Some(self.create_link(field)?.uri);
                    }
                }
                _ => {}
            }
        }

        let url = url.ok_or_else(|| FeedError::format("Invalid source link"))?;
        let mut link = SyndicationLink::with_relationship(url, rel::SOURCE);
        link.title = title;
        link.last_updated = last_updated;
        Ok(link)
    }
}

impl FeedParser for AtomParser {
    type Item = AtomEntry;

    fn parse_content(&self, text: &str) -> FeedResult<SyndicationContent> {
        tree::parse_content(text, Atom::payload_rule(), self.config.max_depth)
    }

    fn create_item(&self, content: &SyndicationContent) -> FeedResult<AtomEntry> {
        let mut entry = AtomEntry::new();

        for field in content.fields.iter().filter(|f| is_atom(f)) {
            match field.name.as_str() {
                names::CATEGORY => entry.add_category(self.create_category(field)?),
                names::CONTENT => {
                    entry.content_type = Some(
                        atom_attribute(field, attr::TYPE)
                            .unwrap_or(names::PLAIN_TEXT_CONTENT_TYPE)
                            .to_owned(),
                    );
                    if atom_attribute(field, attr::SRC).is_some() {
                        entry.add_link(self.create_link(field)?);
                    } else {
                        entry.description = field.value.clone();
                    }
                }
                names::AUTHOR | names::CONTRIBUTOR => {
                    entry.add_contributor(self.create_person(field)?);
                }
                names::ID => entry.id = field.value.clone(),
                names::LINK => entry.add_link(self.create_link(field)?),
                names::PUBLISHED => match field.value.as_deref().and_then(try_parse_date) {
                    Some(published) => entry.published = Some(published),
                    None => tracing::debug!(value = ?field.value, "Dropping unparseable published"),
                },
                names::RIGHTS => entry.rights = field.value.clone(),
                names::SOURCE => entry.add_link(self.create_source(field)?),
                names::SUMMARY => entry.summary = field.value.clone(),
                names::TITLE => entry.title = field.value.clone(),
                names::UPDATED => match field.value.as_deref().and_then(try_parse_date) {
                    Some(updated) => entry.last_updated = Some(updated),
                    None => tracing::debug!(value = ?field.value, "Dropping unparseable updated"),
                },
                _ => {}
            }
        }

        Ok(entry)
    }

    /// `rel` defaults to `alternate` for `link` and to the element name
    /// otherwise. The target is `href`, or `src` for `content`.
    fn create_link(&self, content: &SyndicationContent) -> FeedResult<SyndicationLink> {
        let uri = atom_attribute(content, attr::HREF)
            .and_then(parse_uri)
            .or_else(|| atom_attribute(content, attr::SRC).and_then(parse_uri))
            .ok_or_else(|| FeedError::format("Invalid uri"))?;

        let relationship = match atom_attribute(content, attr::REL) {
            Some(rel) => rel,
            None if content.name == names::LINK => rel::ALTERNATE,
            None => content.name.as_str(),
        };

        let mut link = SyndicationLink::with_relationship(uri, relationship);
        link.title = atom_attribute(content, attr::TITLE).map(str::to_owned);
        link.media_type = atom_attribute(content, attr::TYPE).map(str::to_owned);
        link.length = self
            .parse_value::<u64>(atom_attribute(content, attr::LENGTH))
            .unwrap_or(0);
        Ok(link)
    }

    fn create_person(&self, content: &SyndicationContent) -> FeedResult<SyndicationPerson> {
        let mut person = SyndicationPerson {
            relationship_type: Some(content.name.clone()),
            ..SyndicationPerson::default()
        };

        for field in content.fields.iter().filter(|f| is_atom(f)) {
            match field.name.as_str() {
                names::NAME => person.name = field.value.clone(),
                names::EMAIL => person.email = field.value.clone(),
                names::URI => person.uri = field.value.clone(),
                _ => {}
            }
        }

        Ok(person)
    }

    fn create_category(&self, content: &SyndicationContent) -> FeedResult<SyndicationCategory> {
        let term = atom_attribute(content, attr::TERM)
            .ok_or_else(|| FeedError::format("Invalid Atom category, requires Term attribute"))?;

        let mut category = SyndicationCategory::new(term);
        category.scheme = atom_attribute(content, attr::SCHEME).map(str::to_owned);
        category.label = atom_attribute(content, attr::LABEL).map(str::to_owned);
        Ok(category)
    }

    fn create_image(&self, content: &SyndicationContent) -> FeedResult<SyndicationImage> {
        let url = content
            .value
            .as_deref()
            .and_then(parse_uri)
            .ok_or_else(|| FeedError::format("Invalid Atom image url"))?;

        let mut image = SyndicationImage::new(url);
        image.relationship_type = Some(content.name.clone());
        Ok(image)
    }

    fn parse_item(&self, text: &str) -> FeedResult<AtomEntry> {
        let content = self.parse_expected(text, &[names::ENTRY], "feed")?;
        self.create_item(&content)
    }

    fn parse_link(&self, text: &str) -> FeedResult<SyndicationLink> {
        let content = self.parse_expected(text, &[names::LINK], "link")?;
        self.create_link(&content)
    }

    fn parse_person(&self, text: &str) -> FeedResult<SyndicationPerson> {
        let content = self.parse_expected(text, &[names::AUTHOR, names::CONTRIBUTOR], "person")?;
        self.create_person(&content)
    }

    fn parse_category(&self, text: &str) -> FeedResult<SyndicationCategory> {
        let content = self.parse_expected(text, &[names::CATEGORY], "category")?;
        self.create_category(&content)
    }

    fn parse_image(&self, text: &str) -> FeedResult<SyndicationImage> {
        let content = self.parse_expected(text, &[names::LOGO, names::ICON], "image")?;
        self.create_image(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parser() -> AtomParser {
        AtomParser::new()
    }

    #[test]
    fn test_parse_entry() {
        let xml = r#"<entry xmlns="http://www.w3.org/2005/Atom">
            <id>https://contoso.com/28af09b3</id>
            <title>Atom-Powered Robots Run Amok</title>
            <updated>2017-06-21T11:52:00-07:00</updated>
            <published>2017-06-20T09:00:00Z</published>
            <link href="http://contoso.com/2003/12/13/atom03"/>
            <link rel="edit" href="http://contoso.com/edit/1" title="Edit" type="text/html" length="42"/>
            <author><name>John Doe</name><email>johndoe@contoso.com</email></author>
            <contributor><name>Jane</name><uri>http://jane.example.com/</uri></contributor>
            <category term="robots" scheme="http://example.com/tags" label="Robots"/>
            <summary>Some text.</summary>
            <rights>Copyright 2017</rights>
            <content type="html">&lt;p&gt;Hello&lt;/p&gt;</content>
        </entry>"#;

        let entry = parser().parse_item(xml).unwrap();
        assert_eq!(entry.id.as_deref(), Some("https://contoso.com/28af09b3"));
        assert_eq!(entry.title.as_deref(), Some("Atom-Powered Robots Run Amok"));
        assert_eq!(
            entry.last_updated.map(|d| d.to_rfc3339()),
            Some("2017-06-21T11:52:00-07:00".to_owned())
        );
        assert_eq!(
            entry.published.map(|d| d.to_rfc3339()),
            Some("2017-06-20T09:00:00+00:00".to_owned())
        );
        assert_eq!(entry.description.as_deref(), Some("<p>Hello</p>"));
        assert_eq!(entry.content_type.as_deref(), Some("html"));
        assert_eq!(entry.summary.as_deref(), Some("Some text."));
        assert_eq!(entry.rights.as_deref(), Some("Copyright 2017"));

        assert_eq!(entry.links.len(), 2);
        assert!(entry.links[0].is("alternate"));
        let edit = &entry.links[1];
        assert!(edit.is("edit"));
        assert_eq!(edit.title.as_deref(), Some("Edit"));
        assert_eq!(edit.media_type.as_deref(), Some("text/html"));
        assert_eq!(edit.length, 42);

        assert_eq!(entry.contributors.len(), 2);
        assert_eq!(entry.contributors[0].name.as_deref(), Some("John Doe"));
        assert_eq!(entry.contributors[0].email.as_deref(), Some("johndoe@contoso.com"));
        assert_eq!(entry.contributors[0].relationship_type.as_deref(), Some("author"));
        assert_eq!(entry.contributors[1].uri.as_deref(), Some("http://jane.example.com/"));
        assert_eq!(entry.contributors[1].relationship_type.as_deref(), Some("contributor"));

        let category = &entry.categories[0];
        assert_eq!(category.name, "robots");
        assert_eq!(category.scheme.as_deref(), Some("http://example.com/tags"));
        assert_eq!(category.label.as_deref(), Some("Robots"));
    }

    #[test]
    fn test_content_src_becomes_link() {
        let xml = r#"<entry><id>1</id><content src="http://example.com/body.html" type="text/html"/></entry>"#;
        let entry = parser().parse_item(xml).unwrap();
        assert_eq!(entry.description, None);
        assert_eq!(entry.content_type.as_deref(), Some("text/html"));
        assert_eq!(entry.links.len(), 1);
        assert!(entry.links[0].is("content"));
        assert_eq!(entry.links[0].uri, "http://example.com/body.html");
    }

    #[test]
    fn test_xhtml_and_xml_content() {
        let xml = r#"<entry xmlns="http://www.w3.org/2005/Atom">
            <content type="xhtml"><div xmlns="http://www.w3.org/1999/xhtml"><p>Hi</p></div></content>
        </entry>"#;
        let entry = parser().parse_item(xml).unwrap();
        assert_eq!(entry.content_type.as_deref(), Some("xhtml"));
        assert_eq!(entry.description.as_deref(), Some("<p>Hi</p>"));

        let xml = r#"<entry><content type="application/xml"><data a="1">x</data></content></entry>"#;
        let entry = parser().parse_item(xml).unwrap();
        assert_eq!(entry.description.as_deref(), Some(r#"<data a="1">x</data>"#));
    }

    #[test]
    fn test_plain_content_type_default() {
        let entry = parser().parse_item("<entry><content>Hello</content></entry>").unwrap();
        assert_eq!(entry.content_type.as_deref(), Some("text"));
        assert_eq!(entry.description.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_foreign_fields_are_ignored() {
        let xml = r#"<entry xmlns="http://www.w3.org/2005/Atom" xmlns:x="urn:x">
            <title>Atom</title><x:title>Other</x:title>
        </entry>"#;
        let entry = parser().parse_item(xml).unwrap();
        assert_eq!(entry.title.as_deref(), Some("Atom"));
    }

    #[test]
    fn test_unparseable_dates_are_dropped() {
        let xml = "<entry><updated>yesterday</updated><published>never</published></entry>";
        let entry = parser().parse_item(xml).unwrap();
        assert_eq!(entry.last_updated, None);
        assert_eq!(entry.published, None);
    }

    #[test]
    fn test_source() {
        let xml = r#"<entry><source>
            <id>http://example.org/feed</id>
            <title>Example, Inc.</title>
            <updated>2003-12-13T18:30:02Z</updated>
            <link href="http://example.org/other"/>
        </source></entry>"#;
        let entry = parser().parse_item(xml).unwrap();
        let source = &entry.links[0];
        assert!(source.is("source"));
        assert_eq!(source.uri, "http://example.org/feed");
        assert_eq!(source.title.as_deref(), Some("Example, Inc."));
        assert!(source.last_updated.is_some());

        let xml = r#"<entry><source><id>tag:example.org,2003</id><link href="http://example.org/"/></source></entry>"#;
        let entry = parser().parse_item(xml).unwrap();
        assert_eq!(entry.links[0].uri, "tag:example.org,2003");

        let xml = "<entry><source><title>No link</title></source></entry>";
        assert!(matches!(parser().parse_item(xml), Err(FeedError::Format(_))));
    }

    #[test]
    fn test_link_requires_uri() {
        assert!(matches!(
            parser().parse_link(r#"<link rel="self"/>"#),
            Err(FeedError::Format(_))
        ));
        let link = parser()
            .parse_link(r#"<link rel="self" href="http://example.com/feed.xml"/>"#)
            .unwrap();
        assert!(link.is("self"));
        assert_eq!(link.length, 0);
    }

    #[test]
    fn test_category_requires_term() {
        let err = parser().parse_category(r#"<category label="x"/>"#).unwrap_err();
        assert!(err.to_string().contains("requires Term attribute"));
    }

    #[test]
    fn test_person_tolerates_missing_fields() {
        let person = parser().parse_person("<author><uri>http://example.com/</uri></author>").unwrap();
        assert_eq!(person.name, None);
        assert_eq!(person.uri.as_deref(), Some("http://example.com/"));
        assert_eq!(person.relationship_type.as_deref(), Some("author"));
    }

    #[test]
    fn test_image() {
        let image = parser().parse_image("<logo>http://example.com/logo.png</logo>").unwrap();
        assert_eq!(image.url, "http://example.com/logo.png");
        assert_eq!(image.relationship_type.as_deref(), Some("logo"));

        let image = parser().parse_image("<icon>http://example.com/favicon.ico</icon>").unwrap();
        assert_eq!(image.relationship_type.as_deref(), Some("icon"));

        assert!(matches!(
            parser().parse_image("<icon>not a url</icon>"),
            Err(FeedError::Format(_))
        ));
    }

    #[test]
    fn test_parse_checks_element_name() {
        assert!(matches!(
            parser().parse_item("<item><title>t</title></item>"),
            Err(FeedError::Format(_))
        ));
        assert!(matches!(
            parser().parse_image("<image>http://example.com/a.png</image>"),
            Err(FeedError::Format(_))
        ));
    }

    #[test]
    fn test_parse_checks_element_namespace() {
        let foreign = r#"<entry xmlns="urn:other"><id>urn:1</id><title>t</title></entry>"#;
        assert!(matches!(
            parser().parse_item(foreign),
            Err(FeedError::Format(_))
        ));
        assert!(matches!(
            parser().parse_link(r#"<media:link xmlns:media="urn:media" href="http://example.com/"/>"#),
            Err(FeedError::Format(_))
        ));

        let unqualified = parser().parse_link(r#"<link href="http://example.com/"/>"#).unwrap();
        assert_eq!(unqualified.uri, "http://example.com/");
        let qualified = parser()
            .parse_item(r#"<a:entry xmlns:a="http://www.w3.org/2005/Atom"><a:id>urn:1</a:id></a:entry>"#)
            .unwrap();
        assert_eq!(qualified.id.as_deref(), Some("urn:1"));
    }
}
