use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Opaque server-issued token addressing a server-side scroll context.
///
/// The search service owns the token; clients only forward it. An unused
/// token expires server-side once its keep-alive elapses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScrollId(String);

impl ScrollId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ScrollId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScrollId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ScrollId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One raw result entry: the document id plus its JSON source body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub source: Value,
}

impl SearchHit {
    pub fn new(id: impl Into<String>, source: Value) -> Self {
        Self {
            id: id.into(),
            source,
        }
    }

    /// String-typed field lookup into the source body.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.source.get(name)?.as_str()
    }
}

/// One batch of hits plus the token to fetch the batch after it.
/// Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub scroll_id: ScrollId,
    pub hits: Vec<SearchHit>,
}

impl Page {
    pub fn new(scroll_id: impl Into<ScrollId>, hits: Vec<SearchHit>) -> Self {
        Self {
            scroll_id: scroll_id.into(),
            hits,
        }
    }

    /// A batch carrying no hits. A fetched empty page ends the scroll.
    pub fn empty(scroll_id: impl Into<ScrollId>) -> Self {
        Self::new(scroll_id, vec![])
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Caller-built search to seed a scroll: target index plus the JSON query body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub index: String,
    pub body: Value,
}

impl Query {
    pub fn new(index: impl Into<String>, body: Value) -> Self {
        Self {
            index: index.into(),
            body,
        }
    }

    /// Match every document in `index`.
    pub fn match_all(index: impl Into<String>) -> Self {
        Self::new(index, json!({ "query": { "match_all": {} } }))
    }
}
