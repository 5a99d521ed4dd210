// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! URL helpers: absolute detection, origin-relative joins and query strings

use lazy_static::lazy_static;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use url::Url;

use crate::error::Result;

lazy_static! {
    static ref ABSOLUTE_URL: Regex = Regex::new(r"(?i)^(?:[a-z]+:)?//").unwrap();
}

/// Characters left alone by URI component encoding
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Characters left alone by whole-URI encoding (reserved delimiters survive)
const URI: &AsciiSet = &COMPONENT
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'#');

/// Check if a path is absolute (`scheme://...` or protocol-relative `//...`)
pub fn is_absolute(path: &str) -> bool {
    ABSOLUTE_URL.is_match(path)
}

/// Percent-encode a single URI component
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Percent-encode a whole URI, keeping reserved delimiters such as `&` and `=`
pub fn encode_uri(value: &str) -> String {
    utf8_percent_encode(value, URI).to_string()
}

/// Join path segments POSIX-style and normalize the result.
///
/// Empty segments are ignored, `.` and `..` are collapsed and a trailing
/// separator survives. Joining nothing yields `"."`.
pub fn join_paths<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = segments
        .into_iter()
        .filter(|s| !s.as_ref().is_empty())
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        return ".".to_string();
    }
    normalize_path(&joined)
}

fn normalize_path(path: &str) -> String {
    let absolute = path.starts_with('/');
    let trailing = path.ends_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().map_or(false, |last| *last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            segment => parts.push(segment),
        }
    }

    let mut normalized = parts.join("/");
    if normalized.is_empty() && !absolute {
        normalized.push('.');
    }
    if !normalized.is_empty() && trailing {
        normalized.push('/');
    }

    if absolute {
        format!("/{}", normalized)
    } else {
        normalized
    }
}

/// Join segments onto an origin, producing a fully qualified URL
pub fn join_url<I, S>(origin: &str, segments: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let base = Url::parse(origin)?;
    Ok(base.join(&join_paths(segments))?.to_string())
}

/// Encode parameters into a query string (`?a=1&b=2`).
///
/// `None` values are dropped; if nothing remains the result is empty. Values
/// are component-encoded, keys are written verbatim.
pub fn encode_query<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let query = params
        .into_iter()
        .filter_map(|(key, value)| {
            value.map(|v| format!("{}={}", key.as_ref(), encode_uri_component(v.as_ref())))
        })
        .collect::<Vec<_>>();

    if query.is_empty() {
        return String::new();
    }
    format!("?{}", query.join("&"))
}
