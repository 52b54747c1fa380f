//! Bookmark tree nodes as delivered by the host browser.

use crate::domain::{DocumentId, ValidationError};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// A node of the host bookmark tree.
///
/// Leaf nodes carry a non-empty `url`; folders carry `children` and no url.
/// The host owns the tree; this crate only reads it.
#[derive(Debug, Clone, Serialize, PartialEq, Default, JsonSchema)]
pub struct BookmarkRef {
    /// Host-assigned bookmark id
    pub id: String,

    /// Page url, present only on leaves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Display title
    #[serde(default)]
    pub title: String,

    /// Child nodes, present only on folders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BookmarkRef>>,
}

/// Wire shape of a tree node.
///
/// Firefox JSON backups carry a string `guid` next to a numeric `id`, and
/// `uri` instead of `url`. The guid wins when both ids are present.
#[derive(Deserialize)]
struct RawBookmarkRef {
    #[serde(default)]
    guid: Option<String>,
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    children: Option<Vec<BookmarkRef>>,
}

impl From<RawBookmarkRef> for BookmarkRef {
    fn from(raw: RawBookmarkRef) -> Self {
        let id = match (raw.guid, raw.id) {
            (Some(guid), _) => guid,
            (None, Some(serde_json::Value::String(id))) => id,
            (None, Some(serde_json::Value::Number(id))) => id.to_string(),
            (None, _) => String::new(),
        };

        Self {
            id,
            url: raw.url.or(raw.uri),
            title: raw.title.unwrap_or_default(),
            children: raw.children,
        }
    }
}

impl<'de> Deserialize<'de> for BookmarkRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawBookmarkRef::deserialize(deserializer).map(Self::from)
    }
}

impl BookmarkRef {
    /// Create a leaf bookmark.
    pub fn leaf(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: Some(url.into()),
            title: title.into(),
            children: None,
        }
    }

    /// Create a folder with the given children.
    pub fn folder(
        id: impl Into<String>,
        title: impl Into<String>,
        children: Vec<BookmarkRef>,
    ) -> Self {
        Self {
            id: id.into(),
            url: None,
            title: title.into(),
            children: Some(children),
        }
    }

    /// Whether this node is a bookmark leaf. An empty url counts as none.
    pub fn is_leaf(&self) -> bool {
        self.url.as_deref().is_some_and(|url| !url.is_empty())
    }

    /// Owned leaf view of this node, if it is a leaf.
    pub fn as_bookmark(&self) -> Option<Bookmark> {
        self.url.as_ref().filter(|url| !url.is_empty()).map(|url| Bookmark {
            id: self.id.clone(),
            url: url.clone(),
            title: self.title.clone(),
        })
    }
}

/// An owned bookmark leaf: the unit of work for fetching and indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub id: String,
    pub url: String,
    pub title: String,
}

impl Bookmark {
    /// Create a new bookmark leaf.
    pub fn new(id: impl Into<String>, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            title: title.into(),
        }
    }

    /// The document identity derived from this bookmark.
    pub fn document_id(&self) -> Result<DocumentId, ValidationError> {
        DocumentId::for_bookmark(&self.id, &self.url)
    }
}
