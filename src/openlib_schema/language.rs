use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// `/languages/{code}.json`
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub name:            Option<String>,
    pub name_translated: Option<HashMap<String, Vec<String>>>,
}

impl Language {
    /// First translated name for the given locale code.
    pub fn translated(&self, code: &str) -> Option<&str> {
        self.name_translated
            .as_ref()?
            .get(code)?
            .first()
            .map(String::as_str)
    }
}
