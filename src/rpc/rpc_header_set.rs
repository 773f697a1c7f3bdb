use crate::constants::{CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE};
use std::collections::BTreeMap;

/// A set of HTTP headers with case-insensitive names.
///
/// Names are stored lowercased, so `X-Api-Key` and `x-api-key` address the
/// same entry and merging two sets never produces duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RpcHeaderSet {
    headers: BTreeMap<String, String>,
}

impl RpcHeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Returns a new set with `other` layered over `self`. On a name clash the
    /// value from `other` wins. Neither input is modified.
    pub fn merged(&self, other: &RpcHeaderSet) -> Self {
        let mut headers = self.headers.clone();
        headers.extend(
            other
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        Self { headers }
    }

    /// Headers for an outgoing JSON request: `defaults`, then `self` over them,
    /// then a content type that configuration cannot override.
    pub fn for_json_request(&self, defaults: &RpcHeaderSet) -> Self {
        let mut headers = defaults.merged(self);
        headers.insert(CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE);
        headers
    }
}

impl<K, V> FromIterator<(K, V)> for RpcHeaderSet
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}
