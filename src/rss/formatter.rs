//! RSS 2.0 formatter.

use super::names::{self, attr, rel};
use super::Rss;
use crate::config::WriterConfig;
use crate::error::{FeedError, FeedResult};
use crate::feed::{FeedFormatter, FeedSyntax};
use crate::model::{
    DateStyle, SyndicationAttribute, SyndicationCategory, SyndicationContent, SyndicationImage,
    SyndicationItem, SyndicationLink, SyndicationPerson,
};
use crate::xml::render::ContentRenderer;

/// Builds and renders RSS 2.0 elements.
///
/// Namespace declarations among `known_attributes` are taken as already
/// declared on the `rss` element, so extension elements in those
/// namespaces reuse the declared prefix.
#[derive(Debug, Clone)]
pub struct RssFormatter {
    renderer: ContentRenderer,
}

impl Default for RssFormatter {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl RssFormatter {
    pub fn new(known_attributes: &[SyndicationAttribute]) -> Self {
        Self::with_config(known_attributes, WriterConfig::default())
    }

    pub fn with_config(known_attributes: &[SyndicationAttribute], config: WriterConfig) -> Self {
        let mut renderer = ContentRenderer::new(known_attributes, None, Rss::payload_rule());
        renderer.set_use_cdata(config.use_cdata);
        renderer.set_indent(config.indent);
        Self { renderer }
    }

    pub fn use_cdata(&self) -> bool {
        self.renderer.use_cdata()
    }

    pub fn set_use_cdata(&mut self, use_cdata: bool) {
        self.renderer.set_use_cdata(use_cdata);
    }

    fn enclosure_content(&self, link: &SyndicationLink) -> FeedResult<SyndicationContent> {
        if link.length == 0 {
            return Err(FeedError::argument("Enclosure requires length attribute"));
        }
        let media_type = link
            .media_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| FeedError::argument("Enclosure requires a MediaType"))?;

        let mut content = SyndicationContent::new(names::ENCLOSURE);
        content.add_attribute(SyndicationAttribute::new(attr::URL, link.uri.as_str()));
        content.add_attribute(SyndicationAttribute::new(
            attr::LENGTH,
            self.format_value(&link.length),
        ));
        content.add_attribute(SyndicationAttribute::new(attr::TYPE, media_type));
        Ok(content)
    }

    fn source_content(&self, link: &SyndicationLink) -> SyndicationContent {
        let mut content = SyndicationContent::new(names::SOURCE);
        if link.title.as_deref() != Some(link.uri.as_str()) {
            content.add_attribute(SyndicationAttribute::new(attr::URL, link.uri.as_str()));
        }
        content.value = link.title.clone().filter(|t| !t.is_empty());
        content
    }

    /// `link`, or an element named by the relationship type.
    fn plain_link_content(&self, link: &SyndicationLink) -> SyndicationContent {
        let name = match link.relationship_type.as_deref() {
            None | Some("") | Some(rel::ALTERNATE) => names::LINK,
            Some(other) => other,
        };
        let mut content = SyndicationContent::new(name);

        match link.title.as_deref().filter(|t| !t.is_empty()) {
            Some(title) => {
                content.value = Some(title.to_owned());
                content.add_attribute(SyndicationAttribute::new(attr::URL, link.uri.as_str()));
            }
            None => content.value = Some(link.uri.clone()),
        }

        if let Some(media_type) = link.media_type.as_deref().filter(|t| !t.is_empty()) {
            content.add_attribute(SyndicationAttribute::new(attr::TYPE, media_type));
        }
        if link.length != 0 {
            content.add_attribute(SyndicationAttribute::new(
                attr::LENGTH,
                self.format_value(&link.length),
            ));
        }
        content
    }
}

impl FeedFormatter for RssFormatter {
    type Item = SyndicationItem;

    fn create_item_content(&self, item: &SyndicationItem) -> FeedResult<SyndicationContent> {
        let title = item.title.as_deref().filter(|t| !t.is_empty());
        let description = item.description.as_deref().filter(|d| !d.is_empty());
        if title.is_none() && description.is_none() {
            return Err(FeedError::argument(
                "RSS Item requires a title or a description",
            ));
        }

        let mut content = SyndicationContent::new(names::ITEM);

        if let Some(title) = title {
            content.add_field(SyndicationContent::with_value(names::TITLE, title));
        }

        let mut has_guid_link = false;
        for link in &item.links {
            has_guid_link |= link.is(rel::GUID);
            content.add_field(self.create_link_content(link)?);
        }

        if let Some(description) = description {
            content.add_field(SyndicationContent::with_value(
                names::DESCRIPTION,
                description,
            ));
        }

        for person in &item.contributors {
            content.add_field(self.create_person_content(person)?);
        }

        for category in &item.categories {
            content.add_field(self.create_category_content(category)?);
        }

        if let Some(id) = item.id.as_deref().filter(|id| !id.is_empty()) {
            if !has_guid_link {
                let mut guid = SyndicationContent::with_value(names::GUID, id);
                guid.add_attribute(SyndicationAttribute::new(attr::IS_PERMA_LINK, "false"));
                content.add_field(guid);
            }
        }

        if let Some(published) = &item.published {
            content.add_field(SyndicationContent::with_value(
                names::PUB_DATE,
                self.format_value(published),
            ));
        }

        Ok(content)
    }

    fn create_link_content(&self, link: &SyndicationLink) -> FeedResult<SyndicationContent> {
        if link.uri.is_empty() {
            return Err(FeedError::argument("Link requires an uri"));
        }

        match link.relationship_type.as_deref() {
            Some(rel::ENCLOSURE) => self.enclosure_content(link),
            Some(rel::COMMENTS) => Ok(SyndicationContent::with_value(
                names::COMMENTS,
                link.uri.as_str(),
            )),
            Some(rel::SOURCE) => Ok(self.source_content(link)),
            _ => Ok(self.plain_link_content(link)),
        }
    }

    /// Renders `email` or `email (name)`; RSS has no anonymous authors.
    fn create_person_content(&self, person: &SyndicationPerson) -> FeedResult<SyndicationContent> {
        let email = person
            .email
            .as_deref()
            .filter(|e| !e.is_empty())
            .ok_or_else(|| FeedError::argument("Invalid person Email"))?;

        let value = match person.name.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => format!("{email} ({name})"),
            None => email.to_owned(),
        };
        let name = person
            .relationship_type
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or(names::AUTHOR);

        Ok(SyndicationContent::with_value(name, value))
    }

    fn create_category_content(
        &self,
        category: &SyndicationCategory,
    ) -> FeedResult<SyndicationContent> {
        if category.name.is_empty() {
            return Err(FeedError::argument("Invalid category name"));
        }

        let mut content = SyndicationContent::with_value(names::CATEGORY, category.name.as_str());
        if let Some(scheme) = &category.scheme {
            content.add_attribute(SyndicationAttribute::new(attr::DOMAIN, scheme.as_str()));
        }
        Ok(content)
    }

    fn create_image_content(&self, image: &SyndicationImage) -> FeedResult<SyndicationContent> {
        let title = image
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| FeedError::argument("Image requires a title"))?;
        let link = image
            .link
            .as_ref()
            .ok_or_else(|| FeedError::argument("Image requires a link"))?;
        if image.url.is_empty() {
            return Err(FeedError::argument("Image requires an url"));
        }

        let mut content = SyndicationContent::new(names::IMAGE);
        content.add_field(SyndicationContent::with_value(names::URL, image.url.as_str()));
        content.add_field(SyndicationContent::with_value(names::TITLE, title));
        content.add_field(self.create_link_content(link)?);
        if let Some(description) = image.description.as_deref().filter(|d| !d.is_empty()) {
            content.add_field(SyndicationContent::with_value(
                names::DESCRIPTION,
                description,
            ));
        }
        Ok(content)
    }

    fn format(&self, content: &SyndicationContent) -> FeedResult<String> {
        self.renderer.render(content)
    }

    fn date_style(&self) -> DateStyle {
        DateStyle::Rfc822
    }
}
