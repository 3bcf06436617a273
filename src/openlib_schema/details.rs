use serde::{Deserialize, Serialize};

use super::Description;

/// Entry of `/api/books?jscmd=details`. The edition record itself sits under
/// `details`, next to preview and thumbnail links we don't use.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailsEnvelope {
    #[serde(default, deserialize_with = "super::lenient")]
    pub info_url: Option<String>,
    #[serde(default, deserialize_with = "super::lenient")]
    pub details:  Option<Details>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Details {
    #[serde(default, deserialize_with = "super::lenient")]
    pub description: Option<Description>,
    #[serde(default, deserialize_with = "super::lenient")]
    pub languages:   Option<Vec<Key>>,
    #[serde(default, deserialize_with = "super::lenient")]
    pub series:      Option<Vec<String>>,
    #[serde(default, deserialize_with = "super::lenient")]
    pub works:       Option<Vec<Key>>,
}

/// Reference to another Open Library resource, e.g. `/languages/eng`.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    #[serde(default, deserialize_with = "super::lenient")]
    pub key: Option<String>,
}
