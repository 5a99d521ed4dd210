// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cookie header codec and the session cookie jar

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// A `name=value` pair taken from a `Set-Cookie` header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookiePair {
    /// Cookie name
    pub key: String,
    /// Cookie value
    pub val: String,
}

impl CookiePair {
    /// Create a new pair
    pub fn new(key: impl Into<String>, val: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            val: val.into(),
        }
    }

    /// Parse one `Set-Cookie` value.
    ///
    /// Only the segment before the first `;` is used; attributes such as
    /// `Path` or `Expires` are discarded. Input without `=` yields the whole
    /// segment as key and an empty value.
    pub fn parse(raw: &str) -> Self {
        let pair = raw.split_once(';').map_or(raw, |(pair, _)| pair);
        match pair.split_once('=') {
            Some((key, val)) => Self::new(key, val),
            None => Self::new(pair, ""),
        }
    }
}

/// Decode raw `Set-Cookie` values into pairs, in input order
pub fn decode_cookies<I, S>(raw: I) -> Vec<CookiePair>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|cookie| CookiePair::parse(cookie.as_ref()))
        .collect()
}

/// Encode pairs into a `Cookie` header value (`a=1; b=2`).
///
/// Names and values are written verbatim.
pub fn encode_cookies<I, K, V>(cookies: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    cookies
        .into_iter()
        .map(|(name, value)| format!("{}={}", name.as_ref(), value.as_ref()))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Shared, insertion-ordered cookie storage.
///
/// Clones share the same underlying map, so a jar handed to a lazy header
/// producer always observes the latest merges.
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    cookies: Arc<RwLock<IndexMap<String, String>>>,
}

impl CookieJar {
    /// Create a new empty cookie jar
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cookie, keeping its position if the name already exists
    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.write().insert(name.into(), value.into());
    }

    /// Get a cookie value by name
    pub fn get(&self, name: &str) -> Option<String> {
        self.cookies.read().get(name).cloned()
    }

    /// Remove a cookie by name
    pub fn remove(&self, name: &str) -> Option<String> {
        self.cookies.write().shift_remove(name)
    }

    /// Clear all cookies
    pub fn clear(&self) {
        self.cookies.write().clear();
    }

    /// Merge decoded pairs under one write lock; later pairs win
    pub fn merge(&self, pairs: impl IntoIterator<Item = CookiePair>) {
        let mut cookies = self.cookies.write();
        for CookiePair { key, val } in pairs {
            cookies.insert(key, val);
        }
    }

    /// Decode raw `Set-Cookie` values, merge them and return the new header value
    pub fn merge_set_cookies<I, S>(&self, raw: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.merge(decode_cookies(raw));
        self.header_value()
    }

    /// Encode the jar as a `Cookie` header value
    pub fn header_value(&self) -> String {
        encode_cookies(self.cookies.read().iter())
    }

    /// Snapshot of all cookies in insertion order
    pub fn to_map(&self) -> IndexMap<String, String> {
        self.cookies.read().clone()
    }

    /// Get total cookie count
    pub fn len(&self) -> usize {
        self.cookies.read().len()
    }

    /// Check if jar is empty
    pub fn is_empty(&self) -> bool {
        self.cookies.read().is_empty()
    }

    /// Export all cookies as a JSON object
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&*self.cookies.read())
    }

    /// Import cookies from a JSON object
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let cookies: IndexMap<String, String> = serde_json::from_str(json)?;
        Ok(Self {
            cookies: Arc::new(RwLock::new(cookies)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_discards_attributes() {
        let pairs = decode_cookies(["session=abc123; Path=/; HttpOnly", "theme=dark"]);
        assert_eq!(
            pairs,
            vec![
                CookiePair::new("session", "abc123"),
                CookiePair::new("theme", "dark"),
            ]
        );
    }

    #[test]
    fn test_decode_malformed() {
        assert_eq!(CookiePair::parse("flag"), CookiePair::new("flag", ""));
        assert_eq!(CookiePair::parse("token=a=b; Secure"), CookiePair::new("token", "a=b"));
        assert!(decode_cookies(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_encode_order() {
        let header = encode_cookies([("a", "1"), ("b", "2")]);
        assert_eq!(header, "a=1; b=2");
        assert_eq!(encode_cookies(Vec::<(&str, &str)>::new()), "");
    }

    #[test]
    fn test_decode_encode_round_trip() {
        let jar = CookieJar::new();
        jar.set("sid", "xyz");
        jar.set("lang", "en");

        let decoded = decode_cookies(jar.header_value().split("; "));
        let restored: IndexMap<String, String> =
            decoded.into_iter().map(|p| (p.key, p.val)).collect();
        assert_eq!(restored, jar.to_map());
    }

    #[test]
    fn test_cookie_jar_merge() {
        let jar = CookieJar::new();
        let header = jar.merge_set_cookies(["a=1; Path=/", "b=2", "a=3"]);

        assert_eq!(header, "a=3; b=2");
        assert_eq!(jar.len(), 2);
        assert_eq!(jar.get("a").as_deref(), Some("3"));
    }

    #[test]
    fn test_cookie_jar_shared_between_clones() {
        let jar = CookieJar::new();
        let view = jar.clone();
        jar.set("test", "value");
        assert_eq!(view.header_value(), "test=value");

        view.remove("test");
        assert!(jar.is_empty());
    }

    #[test]
    fn test_cookie_jar_json() {
        let jar = CookieJar::new();
        jar.set("b", "2");
        jar.set("a", "1");

        let json = jar.to_json().unwrap();
        let restored = CookieJar::from_json(&json).unwrap();
        assert_eq!(restored.header_value(), "b=2; a=1");
    }
}
