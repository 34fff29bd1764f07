//! Conversion from element text and content trees to domain objects.

use crate::error::FeedResult;
use crate::model::{
    FeedValue, SyndicationCategory, SyndicationContent, SyndicationImage, SyndicationLink,
    SyndicationPerson,
};

/// Format-specific parser used by [`XmlFeedReader`](super::XmlFeedReader).
///
/// `create_*` methods interpret an already-built content tree. `parse_*`
/// methods take the outer XML of one element, check that the element has
/// the expected name and namespace, and then delegate to `create_*`.
pub trait FeedParser {
    /// Item type produced by [`create_item`](Self::create_item).
    type Item;

    /// Builds a content tree from the outer XML of one element.
    fn parse_content(&self, text: &str) -> FeedResult<SyndicationContent>;

    fn create_item(&self, content: &SyndicationContent) -> FeedResult<Self::Item>;
    fn create_link(&self, content: &SyndicationContent) -> FeedResult<SyndicationLink>;
    fn create_person(&self, content: &SyndicationContent) -> FeedResult<SyndicationPerson>;
    fn create_category(&self, content: &SyndicationContent) -> FeedResult<SyndicationCategory>;
    fn create_image(&self, content: &SyndicationContent) -> FeedResult<SyndicationImage>;

    fn parse_item(&self, text: &str) -> FeedResult<Self::Item>;
    fn parse_link(&self, text: &str) -> FeedResult<SyndicationLink>;
    fn parse_person(&self, text: &str) -> FeedResult<SyndicationPerson>;
    fn parse_category(&self, text: &str) -> FeedResult<SyndicationCategory>;
    fn parse_image(&self, text: &str) -> FeedResult<SyndicationImage>;

    /// Converts element text to a typed value.
    ///
    /// An element without text converts only for types that have an empty
    /// value, such as `String`.
    fn parse_value<T: FeedValue>(&self, value: Option<&str>) -> Option<T> {
        match value {
            Some(value) => T::parse_feed_value(value),
            None => T::parse_missing(),
        }
    }
}
