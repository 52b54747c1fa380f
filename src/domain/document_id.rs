//! DocumentId value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

static SCHEME_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]*://").expect("Failed to compile scheme regex"));

/// Identity of a stored page document.
///
/// Derived from a bookmark as `normalize(url) + "|" + bookmark_id`, where
/// `normalize` strips a leading `scheme://`. Two bookmarks pointing at the
/// same page still get distinct documents, and moving a bookmark to a new
/// url produces a new identity.
///
/// # Example
///
/// ```
/// use bookmark_search::domain::DocumentId;
///
/// let id = DocumentId::for_bookmark("42", "https://example.com/page").unwrap();
/// assert_eq!(id.as_str(), "example.com/page|42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(String);

impl DocumentId {
    /// Derive the document id for a bookmark leaf.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyId` if the bookmark id is empty and
    /// `ValidationError::EmptyUrl` if the url is empty.
    pub fn for_bookmark(bookmark_id: &str, url: &str) -> Result<Self, ValidationError> {
        if bookmark_id.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if url.is_empty() {
            return Err(ValidationError::EmptyUrl);
        }
        Ok(Self(format!("{}|{}", normalize_url(url), bookmark_id)))
    }

    /// Wrap an id read back from the store.
    pub fn from_raw(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Strip a leading `scheme://` from a url.
pub fn normalize_url(url: &str) -> String {
    SCHEME_PREFIX.replace(url, "").into_owned()
}

impl Serialize for DocumentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DocumentId::from_raw(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
