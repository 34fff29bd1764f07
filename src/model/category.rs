use serde::{Deserialize, Serialize};

use super::SyndicationLink;

/// A category (RSS `category`, Atom `category@term`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyndicationCategory {
    pub name: String,
    /// RSS `domain`, Atom `scheme`.
    pub scheme: Option<String>,
    /// Atom only.
    pub label: Option<String>,
}

impl SyndicationCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scheme: None,
            label: None,
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }
}

/// A feed image (RSS `image`, Atom `logo`/`icon`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyndicationImage {
    pub url: String,
    /// `image` for RSS; `logo` or `icon` for Atom.
    pub relationship_type: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<SyndicationLink>,
}

impl SyndicationImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            relationship_type: None,
            title: None,
            description: None,
            link: None,
        }
    }
}
