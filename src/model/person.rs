use serde::{Deserialize, Serialize};

use crate::error::{FeedError, FeedResult};

/// An author, contributor or managing editor.
///
/// RSS identifies people by e-mail address and Atom by name, so both are
/// optional here; [`SyndicationPerson::new`] only insists that one of them
/// is present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyndicationPerson {
    pub name: Option<String>,
    pub email: Option<String>,
    /// `author`, `contributor`, `managingEditor`, ...
    pub relationship_type: Option<String>,
    pub uri: Option<String>,
}

impl SyndicationPerson {
    /// Creates a person from a name and/or e-mail address.
    ///
    /// Empty strings are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Argument`] when both name and e-mail are missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use syndication::SyndicationPerson;
    ///
    /// let person = SyndicationPerson::new(Some("John Doe"), Some("john@example.com")).unwrap();
    /// assert_eq!(person.name.as_deref(), Some("John Doe"));
    ///
    /// assert!(SyndicationPerson::new(None, Some("")).is_err());
    /// ```
    pub fn new(name: Option<&str>, email: Option<&str>) -> FeedResult<Self> {
        let name = name.filter(|n| !n.is_empty()).map(str::to_owned);
        let email = email.filter(|e| !e.is_empty()).map(str::to_owned);
        if name.is_none() && email.is_none() {
            return Err(FeedError::argument("Valid name or email is required"));
        }
        Ok(Self {
            name,
            email,
            relationship_type: None,
            uri: None,
        })
    }

    pub fn with_relationship(mut self, relationship_type: impl Into<String>) -> Self {
        self.relationship_type = Some(relationship_type.into());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_or_email_required() {
        assert!(matches!(
            SyndicationPerson::new(None, None),
            Err(FeedError::Argument(_))
        ));
        assert!(SyndicationPerson::new(Some(""), Some("")).is_err());
        assert!(SyndicationPerson::new(Some("John"), None).is_ok());
        assert!(SyndicationPerson::new(None, Some("john@example.com")).is_ok());
    }

    #[test]
    fn test_builder_helpers() {
        let person = SyndicationPerson::new(Some("John"), None)
            .unwrap()
            .with_relationship("contributor")
            .with_uri("http://example.com/~john");
        assert_eq!(person.relationship_type.as_deref(), Some("contributor"));
        assert_eq!(person.uri.as_deref(), Some("http://example.com/~john"));
        assert_eq!(person.email, None);
    }
}
