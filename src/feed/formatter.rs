//! Conversion from domain objects to content trees and element text.

use crate::error::FeedResult;
use crate::model::{
    DateStyle, FeedValue, SyndicationCategory, SyndicationContent, SyndicationImage,
    SyndicationLink, SyndicationPerson,
};

/// Format-specific formatter used by [`XmlFeedWriter`](super::XmlFeedWriter).
///
/// `create_*_content` methods validate a domain object and build its content
/// tree; `format_*` methods render that tree to element text. Validation
/// errors from `create_*_content` surface unchanged from `format_*`.
pub trait FeedFormatter {
    /// Item type accepted by [`create_item_content`](Self::create_item_content).
    type Item;

    fn create_item_content(&self, item: &Self::Item) -> FeedResult<SyndicationContent>;
    fn create_link_content(&self, link: &SyndicationLink) -> FeedResult<SyndicationContent>;
    fn create_person_content(&self, person: &SyndicationPerson)
        -> FeedResult<SyndicationContent>;
    fn create_category_content(
        &self,
        category: &SyndicationCategory,
    ) -> FeedResult<SyndicationContent>;
    fn create_image_content(&self, image: &SyndicationImage) -> FeedResult<SyndicationContent>;

    /// Renders a content tree as element text.
    fn format(&self, content: &SyndicationContent) -> FeedResult<String>;

    /// Date encoding used for typed values.
    fn date_style(&self) -> DateStyle;

    fn format_value<T: FeedValue>(&self, value: &T) -> String {
        value.to_feed_value(self.date_style())
    }

    fn format_item(&self, item: &Self::Item) -> FeedResult<String> {
        self.format(&self.create_item_content(item)?)
    }

    fn format_link(&self, link: &SyndicationLink) -> FeedResult<String> {
        self.format(&self.create_link_content(link)?)
    }

    fn format_person(&self, person: &SyndicationPerson) -> FeedResult<String> {
        self.format(&self.create_person_content(person)?)
    }

    fn format_category(&self, category: &SyndicationCategory) -> FeedResult<String> {
        self.format(&self.create_category_content(category)?)
    }

    fn format_image(&self, image: &SyndicationImage) -> FeedResult<String> {
        self.format(&self.create_image_content(image)?)
    }
}
