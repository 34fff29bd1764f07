//! RSS 2.0 parser.

use super::names::{self, attr, rel};
use super::Rss;
use crate::config::ReaderConfig;
use crate::error::{FeedError, FeedResult};
use crate::feed::{FeedParser, FeedSyntax};
use crate::model::{
    SyndicationCategory, SyndicationContent, SyndicationImage, SyndicationItem, SyndicationLink,
    SyndicationPerson,
};
use crate::util::{parse_uri, try_parse_date};
use crate::xml::tree;

#[derive(Debug, Clone, Default)]
pub struct RssParser {
    config: ReaderConfig,
}

impl RssParser {
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
        if !expected.contains(&content.name.as_str()) || !content.is_unqualified() {
            return Err(FeedError::format(format!("Invalid Rss {what}")));
        }
        Ok(content)
    }
}

/// Attribute without a namespace, last occurrence wins.
fn rss_attribute<'a>(content: &'a SyndicationContent, name: &str) -> Option<&'a str> {
    content
        .attributes
        .iter()
        .rev()
        .find(|a| a.name == name && a.namespace.as_deref().map_or(true, str::is_empty))
        .and_then(|a| a.value.as_deref())
}

impl FeedParser for RssParser {
    type Item = SyndicationItem;

    fn parse_content(&self, text: &str) -> FeedResult<SyndicationContent> {
        tree::parse_content(text, Rss::payload_rule(), self.config.max_depth)
    }

    fn create_item(&self, content: &SyndicationContent) -> FeedResult<SyndicationItem> {
        let mut item = SyndicationItem::new();

        for field in content.fields.iter().filter(|f| f.is_unqualified()) {
            match field.name.as_str() {
                names::TITLE => item.title = field.value.clone(),
                names::DESCRIPTION => item.description = field.value.clone(),
                names::LINK | names::COMMENTS | names::ENCLOSURE | names::SOURCE => {
                    item.add_link(self.create_link(field)?);
                }
                names::AUTHOR => item.add_contributor(self.create_person(field)?),
                names::CATEGORY => item.add_category(self.create_category(field)?),
                names::GUID => {
                    item.id = field.value.clone();

                    let perma_link = rss_attribute(field, attr::IS_PERMA_LINK)
                        .map_or(true, |v| self.parse_value::<bool>(Some(v)) == Some(true));
                    if perma_link {
                        if let Some(uri) = field.value.as_deref().and_then(parse_uri) {
                            item.add_link(SyndicationLink::with_relationship(uri, rel::GUID));
                        }
                    }
                }
                names::PUB_DATE => match field.value.as_deref().and_then(try_parse_date) {
                    Some(published) => item.published = Some(published),
                    None => {
                        tracing::debug!(value = ?field.value, "Dropping unparseable pubDate");
                    }
                },
                _ => {}
            }
        }

        Ok(item)
    }

    /// The `url` attribute, when present, is the URI and the text is the
    /// title. Otherwise the text is the URI.
    fn create_link(&self, content: &SyndicationContent) -> FeedResult<SyndicationLink> {
        let (uri, title) = match rss_attribute(content, attr::URL) {
            Some(url) => {
                let uri = parse_uri(url).ok_or_else(|| FeedError::format("Invalid url attribute"))?;
                (uri, content.value.clone())
            }
            None => {
                let uri = content
                    .value
                    .as_deref()
                    .and_then(parse_uri)
                    .ok_or_else(|| FeedError::format("Invalid url"))?;
                (uri, None)
            }
        };

        let relationship = if content.name == names::LINK {
            rel::ALTERNATE
        } else {
            content.name.as_str()
        };

        let mut link = SyndicationLink::with_relationship(uri, relationship);
        link.title = title;
        link.media_type = rss_attribute(content, attr::TYPE).map(str::to_owned);
        link.length = self
            .parse_value::<u64>(rss_attribute(content, attr::LENGTH))
            .unwrap_or(0);
        Ok(link)
    }

    /// Accepts `email` or `email (name)`.
    fn create_person(&self, content: &SyndicationContent) -> FeedResult<SyndicationPerson> {
        let value = content
            .value
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| FeedError::format("Invalid Rss person"))?;

        let (email, name) = match value.find('(') {
            Some(open) => {
                let close = value[open..]
                    .find(')')
                    .map(|i| open + i)
                    .ok_or_else(|| FeedError::format("Invalid Rss person"))?;
                let name = value[open + 1..close].trim();
                if name.is_empty() {
                    return Err(FeedError::format("Invalid Rss person"));
                }
                (value[..open].trim(), Some(name))
            }
            None => (value.trim(), None),
        };

        Ok(SyndicationPerson::new(name, Some(email))?.with_relationship(content.name.clone()))
    }

    fn create_category(&self, content: &SyndicationContent) -> FeedResult<SyndicationCategory> {
        let name = content
            .value
            .as_deref()
            .ok_or_else(|| FeedError::format("Invalid Rss category name"))?;

        let mut category = SyndicationCategory::new(name);
        category.scheme = rss_attribute(content, attr::DOMAIN).map(str::to_owned);
        Ok(category)
    }

    fn create_image(&self, content: &SyndicationContent) -> FeedResult<SyndicationImage> {
        let mut url = None;
        let mut title = None;
        let mut description = None;
        let mut link = None;

        for field in content.fields.iter().filter(|f| f.is_unqualified()) {
            match field.name.as_str() {
                names::TITLE => title = field.value.clone(),
                names::URL => {
                    let value = field.value.as_deref().and_then(parse_uri).ok_or_else(|| {
                        FeedError::format(format!(
                            "Invalid image url '{}'",
                            field.value.as_deref().unwrap_or_default()
                        ))
                    })?;
                    url = Some(value);
                }
                names::LINK => link = Some(self.create_link(field)?),
                names::DESCRIPTION => description = field.value.clone(),
                _ => {}
            }
        }

        let url = url.ok_or_else(|| FeedError::format("Image url not found"))?;
        let mut image = SyndicationImage::new(url);
        image.relationship_type = Some(names::IMAGE.to_owned());
        image.title = title;
        image.description = description;
        image.link = link;
        Ok(image)
    }

    fn parse_item(&self, text: &str) -> FeedResult<SyndicationItem> {
        let content = self.parse_expected(text, &[names::ITEM], "item")?;
        self.create_item(&content)
    }

    fn parse_link(&self, text: &str) -> FeedResult<SyndicationLink> {
        let content = self.parse_expected(text, &[names::LINK], "link")?;
        self.create_link(&content)
    }

    fn parse_person(&self, text: &str) -> FeedResult<SyndicationPerson> {
        let content =
            self.parse_expected(text, &[names::AUTHOR, names::MANAGING_EDITOR], "person")?;
        self.create_person(&content)
    }

    fn parse_category(&self, text: &str) -> FeedResult<SyndicationCategory> {
        let content = self.parse_expected(text, &[names::CATEGORY], "category")?;
        self.create_category(&content)
    }

    fn parse_image(&self, text: &str) -> FeedResult<SyndicationImage> {
        let content = self.parse_expected(text, &[names::IMAGE], "image")?;
        self.create_image(&content)
    }
}
