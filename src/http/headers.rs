// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Ordered session header store
//!
//! Entries keep their insertion position across updates. A value is either a
//! literal string or a producer evaluated each time the store is materialized,
//! which is how the `Cookie` header stays in sync with the jar.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

pub const ORIGIN: &str = "Origin";
pub const REFERER: &str = "Referer";
pub const COOKIE: &str = "Cookie";
pub const SET_COOKIE: &str = "set-cookie";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Producer for a lazily evaluated header value
pub type HeaderProducer = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Value of a stored header
#[derive(Clone)]
pub enum HeaderSource {
    /// Fixed value
    Literal(String),
    /// Value computed at materialization time
    Lazy(HeaderProducer),
}

impl HeaderSource {
    /// Wrap a producer closure
    pub fn lazy<F>(producer: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        HeaderSource::Lazy(Arc::new(producer))
    }

    /// Resolve to a concrete value; empty results count as absent
    pub fn resolve(&self) -> Option<String> {
        let value = match self {
            HeaderSource::Literal(value) => Some(value.clone()),
            HeaderSource::Lazy(producer) => producer(),
        };
        value.filter(|v| !v.is_empty())
    }
}

impl fmt::Debug for HeaderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderSource::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            HeaderSource::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<String> for HeaderSource {
    fn from(value: String) -> Self {
        HeaderSource::Literal(value)
    }
}

impl From<&str> for HeaderSource {
    fn from(value: &str) -> Self {
        HeaderSource::Literal(value.to_string())
    }
}

/// Insertion-ordered header entries, unique by exact key
#[derive(Debug, Clone, Default)]
pub struct HeaderStore {
    entries: IndexMap<String, HeaderSource>,
}

impl HeaderStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a header; replacement keeps the original position
    pub fn upsert(&mut self, key: impl Into<String>, value: impl Into<HeaderSource>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Remove a header if present
    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.entries.shift_remove(key);
        self
    }

    /// Get the stored source for a key
    pub fn get(&self, key: &str) -> Option<&HeaderSource> {
        self.entries.get(key)
    }

    /// Check whether a key is stored
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Stored keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of stored entries, including ones that may materialize empty
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve every entry, skipping those that come out empty
    pub fn materialize(&self) -> IndexMap<String, String> {
        materialize(self.entries.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

/// Resolve `(key, source)` entries in order.
///
/// Entries resolving to nothing are skipped; a repeated key overwrites the
/// earlier value.
pub fn materialize<'a, I>(entries: I) -> IndexMap<String, String>
where
    I: IntoIterator<Item = (&'a str, &'a HeaderSource)>,
{
    let mut data = IndexMap::new();
    for (key, source) in entries {
        if let Some(value) = source.resolve() {
            data.insert(key.to_string(), value);
        }
    }
    data
}
