//! The generic content tree shared by every feed format.

use serde::{Deserialize, Serialize};

/// A single attribute of a [`SyndicationContent`] node.
///
/// `name` is the local name as written by the formatter (a qualified
/// `prefix:local` name is accepted and its prefix is honored on output).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyndicationAttribute {
    pub name: String,
    pub namespace: Option<String>,
    pub value: Option<String>,
}

impl SyndicationAttribute {
    /// Creates an attribute without a namespace.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            value: Some(value.into()),
        }
    }

    /// Creates an attribute bound to `namespace`.
    pub fn with_namespace(
        name: impl Into<String>,
        namespace: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
            value: Some(value.into()),
        }
    }

    /// Returns the value, or an empty string when absent.
    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }
}

/// One XML element expressed independently of any feed format.
///
/// A node carries either a scalar `value` (leaf) or child `fields`
/// (structured element). The two are not exclusive structurally, but
/// renderers emit the value and ignore the fields when both are set.
///
/// Attributes and fields keep insertion order, which is also output order.
///
/// # Examples
///
/// ```
/// use syndication::{SyndicationAttribute, SyndicationContent};
///
/// let mut enclosure = SyndicationContent::new("enclosure");
/// enclosure.add_attribute(SyndicationAttribute::new("url", "http://example.com/a.mp3"));
/// enclosure.add_attribute(SyndicationAttribute::new("length", "1024"));
///
/// assert_eq!(enclosure.attribute("length"), Some("1024"));
/// assert!(enclosure.value.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyndicationContent {
    /// Element name. Must be non-empty when rendered.
    pub name: String,
    /// Element namespace; `None` inherits the formatter's default.
    pub namespace: Option<String>,
    pub value: Option<String>,
    #[serde(default)]
    pub attributes: Vec<SyndicationAttribute>,
    #[serde(default)]
    pub fields: Vec<SyndicationContent>,
}

impl SyndicationContent {
    /// Creates an empty structured node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            value: None,
            attributes: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Creates a leaf node holding `value`.
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new(name)
        }
    }

    /// Creates a node in an explicit namespace.
    pub fn in_namespace(
        name: impl Into<String>,
        namespace: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        Self {
            namespace: Some(namespace.into()),
            value,
            ..Self::new(name)
        }
    }

    pub fn add_attribute(&mut self, attribute: SyndicationAttribute) {
        self.attributes.push(attribute);
    }

    pub fn add_field(&mut self, field: SyndicationContent) {
        self.fields.push(field);
    }

    /// Looks up an attribute value by name, ignoring namespaces.
    ///
    /// When the name occurs more than once the last occurrence wins.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .rev()
            .find(|a| a.name == name)
            .and_then(|a| a.value.as_deref())
    }

    /// Returns the first child field with the given name.
    pub fn field(&self, name: &str) -> Option<&SyndicationContent> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// True when the node has no namespace or the empty namespace.
    pub fn is_unqualified(&self) -> bool {
        self.namespace.as_deref().map_or(true, str::is_empty)
    }
}
