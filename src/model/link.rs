use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A typed link attached to an item or feed.
///
/// The relationship type distinguishes the many link-like elements of the
/// formats (`alternate`, `enclosure`, `comments`, `source`, `guid`,
/// `content`, ...). A length of zero means "unknown".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyndicationLink {
    /// Link target, kept exactly as written.
    pub uri: String,
    pub relationship_type: Option<String>,
    pub title: Option<String>,
    pub media_type: Option<String>,
    #[serde(default)]
    pub length: u64,
    pub last_updated: Option<DateTime<FixedOffset>>,
}

impl SyndicationLink {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            relationship_type: None,
            title: None,
            media_type: None,
            length: 0,
            last_updated: None,
        }
    }

    /// Creates a link with the given relationship type.
    pub fn with_relationship(uri: impl Into<String>, relationship_type: impl Into<String>) -> Self {
        Self {
            relationship_type: Some(relationship_type.into()),
            ..Self::new(uri)
        }
    }

    /// True when the link has the given relationship type.
    pub fn is(&self, relationship_type: &str) -> bool {
        self.relationship_type.as_deref() == Some(relationship_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_check() {
        let link = SyndicationLink::with_relationship("http://example.com/a.mp3", "enclosure");
        assert!(link.is("enclosure"));
        assert!(!link.is("alternate"));
        assert!(!SyndicationLink::new("http://example.com/").is("alternate"));
    }
}
