use serde::{Deserialize, Serialize};

/// The language the application is displayed in.
///
/// `url_key` is the Open Library language key (`eng`), `code` the key used in
/// `name_translated` maps (`en`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub name:    String,
    pub url_key: String,
    pub code:    String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            name:    "English".into(),
            url_key: "eng".into(),
            code:    "en".into(),
        }
    }
}
