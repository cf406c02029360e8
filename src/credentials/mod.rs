//! Credential Set handling
//!
//! Parses the header blob a caller copies from a browser session and turns it
//! back into outbound request headers.

mod store;

pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT_ENCODING, CONTENT_LENGTH, HOST,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

use crate::error::{RelayError, RelayResult};

const HEADER_SEPARATOR: char = ':';

/// Header name → header value, persisted as a flat JSON object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialSet(HashMap<String, String>);

impl CredentialSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins for a repeated name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build the headers attached to every downstream request.
    ///
    /// Entries that are not legal HTTP headers are skipped. `Host` and
    /// `Content-Length` belong to the copied browser request and are
    /// recomputed by the client. `Accept-Encoding` is left to the client so
    /// that it only advertises encodings it can decode.
    pub fn to_header_map(&self) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(self.0.len());
        for (name, value) in self.iter() {
            let header_name = match HeaderName::from_bytes(name.as_bytes()) {
                Ok(n) => n,
                Err(_) => {
                    warn!("Skipping stored header with invalid name: {:?}", name);
                    continue;
                }
            };
            if header_name == HOST
                || header_name == CONTENT_LENGTH
                || header_name == ACCEPT_ENCODING
            {
                continue;
            }
            match HeaderValue::from_str(value) {
                Ok(v) => {
                    headers.insert(header_name, v);
                }
                Err(_) => warn!("Skipping stored header {} with invalid value", name),
            }
        }
        headers
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CredentialSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Parse a `Name: Value` per line blob into a Credential Set.
///
/// Blank lines and lines without a separator are dropped. Only the first
/// separator splits, so values such as `https://...` survive intact.
pub fn parse_header_blob(raw: &str) -> RelayResult<CredentialSet> {
    if raw.trim().is_empty() {
        return Err(RelayError::InvalidInput(
            "Headers string is required".to_string(),
        ));
    }

    let mut set = CredentialSet::new();
    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some((name, value)) = line.split_once(HEADER_SEPARATOR) {
            set.insert(name.trim(), value.trim());
        }
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lines_and_drops_malformed() {
        let raw = "A: 1\nB:2\n\n   \nno separator here\n";
        let set = parse_header_blob(raw).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("A"), Some("1"));
        assert_eq!(set.get("B"), Some("2"));
    }

    #[test]
    fn splits_on_first_separator_only() {
        let set = parse_header_blob("Referer: https://www.binance.com/en/futures").unwrap();
        assert_eq!(set.get("Referer"), Some("https://www.binance.com/en/futures"));
    }

    #[test]
    fn handles_crlf_and_repeated_names() {
        let set = parse_header_blob("csrftoken: old\r\ncsrftoken: new\r\n").unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("csrftoken"), Some("new"));
    }

    #[test]
    fn empty_blob_is_invalid_input() {
        for raw in ["", "  \n\t\n"] {
            match parse_header_blob(raw) {
                Err(RelayError::InvalidInput(msg)) => {
                    assert_eq!(msg, "Headers string is required")
                }
                other => panic!("expected InvalidInput, got {:?}", other),
            }
        }
    }

    #[test]
    fn blob_without_valid_lines_yields_empty_set() {
        let set = parse_header_blob("garbage\nmore garbage").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn header_map_skips_invalid_and_recomputed_headers() {
        let set: CredentialSet = [
            ("cookie", "p20t=abc"),
            ("clienttype", "web"),
            ("Host", "www.binance.com"),
            ("Content-Length", "52"),
            ("accept-encoding", "gzip, deflate, br, zstd"),
            ("bad header", "x"),
            ("x-trace", "line\nbreak"),
        ]
        .into_iter()
        .collect();

        let headers = set.to_header_map();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("cookie").unwrap(), "p20t=abc");
        assert_eq!(headers.get("clienttype").unwrap(), "web");
        assert!(headers.get(HOST).is_none());
        assert!(headers.get(ACCEPT_ENCODING).is_none());
    }

    #[test]
    fn serializes_as_flat_object() {
        let set: CredentialSet = [("csrftoken", "abc")].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"csrftoken":"abc"}"#);

        let back: CredentialSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
