use std::ops::{Deref, DerefMut};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::{SyndicationCategory, SyndicationLink, SyndicationPerson};

/// A feed item (RSS `item`, Atom `entry`).
///
/// Collections are plain owned vectors; `Clone` produces a fully
/// independent copy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyndicationItem {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub last_updated: Option<DateTime<FixedOffset>>,
    pub published: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub categories: Vec<SyndicationCategory>,
    #[serde(default)]
    pub contributors: Vec<SyndicationPerson>,
    #[serde(default)]
    pub links: Vec<SyndicationLink>,
}

impl SyndicationItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_category(&mut self, category: SyndicationCategory) {
        self.categories.push(category);
    }

    pub fn add_contributor(&mut self, person: SyndicationPerson) {
        self.contributors.push(person);
    }

    pub fn add_link(&mut self, link: SyndicationLink) {
        self.links.push(link);
    }
}

/// An Atom entry: a [`SyndicationItem`] plus the Atom-only fields.
///
/// Dereferences to the inner item so the common fields read the same way
/// for both formats.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AtomEntry {
    pub item: SyndicationItem,
    /// `type` of the `content` element (`text`, `html`, `xhtml`, a media type).
    pub content_type: Option<String>,
    pub summary: Option<String>,
    pub rights: Option<String>,
}

impl AtomEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_item(self) -> SyndicationItem {
        self.item
    }
}

impl From<SyndicationItem> for AtomEntry {
    fn from(item: SyndicationItem) -> Self {
        Self {
            item,
            ..Self::default()
        }
    }
}

impl Deref for AtomEntry {
    type Target = SyndicationItem;

    fn deref(&self) -> &SyndicationItem {
        &self.item
    }
}

impl DerefMut for AtomEntry {
    fn deref_mut(&mut self) -> &mut SyndicationItem {
        &mut self.item
    }
}
