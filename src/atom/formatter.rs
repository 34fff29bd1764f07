//! Atom 1.0 formatter.

use super::names::{self, attr, rel};
use super::{ensure_atom_namespace, Atom};
use crate::config::WriterConfig;
use crate::error::{FeedError, FeedResult};
use crate::feed::{FeedFormatter, FeedSyntax};
use crate::model::{
    AtomEntry, DateStyle, SyndicationAttribute, SyndicationCategory, SyndicationContent,
    SyndicationImage, SyndicationLink, SyndicationPerson,
};
use crate::xml::render::ContentRenderer;

/// Builds and renders Atom 1.0 elements.
///
/// Elements without a namespace are written in the Atom namespace. The
/// known attributes always declare it, so rendered fragments only carry
/// an `xmlns` when a caller binds Atom to a prefix instead.
#[derive(Debug, Clone)]
pub struct AtomFormatter {
    renderer: ContentRenderer,
}

impl Default for AtomFormatter {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl AtomFormatter {
    pub fn new(known_attributes: &[SyndicationAttribute]) -> Self {
        Self::with_config(known_attributes, WriterConfig::default())
    }

    pub fn with_config(known_attributes: &[SyndicationAttribute], config: WriterConfig) -> Self {
        let known = ensure_atom_namespace(known_attributes.to_vec());
        let mut renderer =
            ContentRenderer::new(&known, Some(names::NAMESPACE), Atom::payload_rule());
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

    fn content_link_content(&self, link: &SyndicationLink) -> SyndicationContent {
        let mut content = SyndicationContent::new(names::CONTENT);
        content.add_attribute(SyndicationAttribute::new(attr::SRC, link.uri.as_str()));
        if let Some(media_type) = link.media_type.as_deref().filter(|t| !t.is_empty()) {
            content.add_attribute(SyndicationAttribute::new(attr::TYPE, media_type));
        }
        content
    }

    /// `source` holds the origin feed's title, a link to it and its update time.
    fn source_content(&self, link: &SyndicationLink) -> FeedResult<SyndicationContent> {
        let mut content = SyndicationContent::new(names::SOURCE);

        if let Some(title) = link.title.as_deref().filter(|t| !t.is_empty()) {
            content.add_field(SyndicationContent::with_value(names::TITLE, title));
        }

        let mut target = SyndicationLink::new(link.uri.as_str());
        target.media_type = link.media_type.clone();
        target.length = link.length;
        content.add_field(self.plain_link_content(&target));

        if let Some(updated) = &link.last_updated {
            content.add_field(SyndicationContent::with_value(
                names::UPDATED,
                self.format_value(updated),
            ));
        }
        Ok(content)
    }

    fn plain_link_content(&self, link: &SyndicationLink) -> SyndicationContent {
        let mut content = SyndicationContent::new(names::LINK);
        if let Some(title) = link.title.as_deref().filter(|t| !t.is_empty()) {
            content.add_attribute(SyndicationAttribute::new(attr::TITLE, title));
        }
        content.add_attribute(SyndicationAttribute::new(attr::HREF, link.uri.as_str()));
        if let Some(rel) = link.relationship_type.as_deref().filter(|r| !r.is_empty()) {
            content.add_attribute(SyndicationAttribute::new(attr::REL, rel));
        }
        if let Some(media_type) = link.media_type.as_deref().filter(|t| !t.is_empty()) {
            content.add_attribute(SyndicationAttribute::new(attr::TYPE, media_type));
        }
        if link.length > 0 {
            content.add_attribute(SyndicationAttribute::new(
                attr::LENGTH,
                self.format_value(&link.length),
            ));
        }
        content
    }
}

impl FeedFormatter for AtomFormatter {
    type Item = AtomEntry;

    /// Emits `id`, `title`, `updated`, `published`, links, people,
    /// categories, `content`, `summary` and `rights` in that order.
    ///
    /// # Errors
    ///
    /// [`FeedError::Argument`] when `id`, `title` or `last_updated` is
    /// missing, when no author is present, when the entry has both a
    /// description and a `content` link, or when it has neither a
    /// description nor a content or alternate link.
    fn create_item_content(&self, entry: &AtomEntry) -> FeedResult<SyndicationContent> {
        let id = entry
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| FeedError::argument("Entry id is required"))?;
        let title = entry
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| FeedError::argument("Entry title is required"))?;
        let updated = entry
            .last_updated
            .as_ref()
            .ok_or_else(|| FeedError::argument("Entry last updated date is required"))?;

        let mut content = SyndicationContent::new(names::ENTRY);
        content.add_field(SyndicationContent::with_value(names::ID, id));
        content.add_field(SyndicationContent::with_value(names::TITLE, title));
        content.add_field(SyndicationContent::with_value(
            names::UPDATED,
            self.format_value(updated),
        ));
        if let Some(published) = &entry.published {
            content.add_field(SyndicationContent::with_value(
                names::PUBLISHED,
                self.format_value(published),
            ));
        }

        let mut has_content_link = false;
        let mut has_alternate_link = false;
        for link in &entry.links {
            if link.is(rel::CONTENT) {
                if has_content_link {
                    return Err(FeedError::argument("Multiple content links are not allowed"));
                }
                has_content_link = true;
            } else if link.relationship_type.is_none() || link.is(rel::ALTERNATE) {
                has_alternate_link = true;
            }
            content.add_field(self.create_link_content(link)?);
        }

        let mut has_author = false;
        for person in &entry.contributors {
            has_author |= person
                .relationship_type
                .as_deref()
                .map_or(true, |r| r == names::AUTHOR);
            content.add_field(self.create_person_content(person)?);
        }
        if !has_author {
            return Err(FeedError::argument("Author is required"));
        }

        for category in &entry.categories {
            content.add_field(self.create_category_content(category)?);
        }

        match entry.description.as_deref().filter(|d| !d.is_empty()) {
            Some(_) if has_content_link => {
                return Err(FeedError::argument(
                    "Description and content link are not allowed simultaneously",
                ));
            }
            Some(description) => {
                let mut body = SyndicationContent::with_value(names::CONTENT, description);
                if let Some(content_type) = entry.content_type.as_deref().filter(|t| {
                    !t.is_empty() && !t.eq_ignore_ascii_case(names::PLAIN_TEXT_CONTENT_TYPE)
                }) {
                    body.add_attribute(SyndicationAttribute::new(attr::TYPE, content_type));
                }
                content.add_field(body);
            }
            None if !has_content_link && !has_alternate_link => {
                return Err(FeedError::argument(
                    "Description or alternate link is required",
                ));
            }
            None => {}
        }

        if let Some(summary) = entry.summary.as_deref().filter(|s| !s.is_empty()) {
            content.add_field(SyndicationContent::with_value(names::SUMMARY, summary));
        }
        if let Some(rights) = entry.rights.as_deref().filter(|r| !r.is_empty()) {
            content.add_field(SyndicationContent::with_value(names::RIGHTS, rights));
        }

        Ok(content)
    }

    fn create_link_content(&self, link: &SyndicationLink) -> FeedResult<SyndicationContent> {
        if link.uri.is_empty() {
            return Err(FeedError::argument("Link requires an uri"));
        }

        match link.relationship_type.as_deref() {
            Some(rel::CONTENT) => Ok(self.content_link_content(link)),
            Some(rel::SOURCE) => self.source_content(link),
            _ => Ok(self.plain_link_content(link)),
        }
    }

    fn create_person_content(&self, person: &SyndicationPerson) -> FeedResult<SyndicationContent> {
        let name = person
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| FeedError::argument("Atom person requires a name"))?;

        let element = person.relationship_type.as_deref().unwrap_or(names::AUTHOR);
        if element != names::AUTHOR && element != names::CONTRIBUTOR {
            return Err(FeedError::argument(format!(
                "Invalid Atom person relationship type '{element}'"
            )));
        }

        let mut content = SyndicationContent::new(element);
        content.add_field(SyndicationContent::with_value(names::NAME, name));
        if let Some(email) = person.email.as_deref().filter(|e| !e.is_empty()) {
            content.add_field(SyndicationContent::with_value(names::EMAIL, email));
        }
        if let Some(uri) = &person.uri {
            content.add_field(SyndicationContent::with_value(names::URI, uri.as_str()));
        }
        Ok(content)
    }

    fn create_category_content(
        &self,
        category: &SyndicationCategory,
    ) -> FeedResult<SyndicationContent> {
        if category.name.is_empty() {
            return Err(FeedError::argument("Invalid category name"));
        }

        let mut content = SyndicationContent::new(names::CATEGORY);
        content.add_attribute(SyndicationAttribute::new(attr::TERM, category.name.as_str()));
        if let Some(scheme) = category.scheme.as_deref().filter(|s| !s.is_empty()) {
            content.add_attribute(SyndicationAttribute::new(attr::SCHEME, scheme));
        }
        if let Some(label) = category.label.as_deref().filter(|l| !l.is_empty()) {
            content.add_attribute(SyndicationAttribute::new(attr::LABEL, label));
        }
        Ok(content)
    }

    /// `icon` unless the relationship type names another element.
    fn create_image_content(&self, image: &SyndicationImage) -> FeedResult<SyndicationContent> {
        if image.url.is_empty() {
            return Err(FeedError::argument("Image requires an url"));
        }
        let element = image
            .relationship_type
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or(names::ICON);
        Ok(SyndicationContent::with_value(element, image.url.as_str()))
    }

    fn format(&self, content: &SyndicationContent) -> FeedResult<String> {
        self.renderer.render(content)
    }

    fn date_style(&self) -> DateStyle {
        DateStyle::Rfc3339
    }
}
