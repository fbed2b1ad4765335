use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Query parameters appended to every route request.
///
/// Defaults disable alternatives and the overview geometry so the service only
/// sends back what the matrix needs.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct RouteOptions(BTreeMap<String, String>);

impl RouteOptions {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for RouteOptions {
    fn default() -> Self {
        let mut options = Self::empty();
        options.insert("alternatives", "false");
        options.insert("overview", "false");
        options
    }
}

impl<K, V> FromIterator<(K, V)> for RouteOptions
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
