use serde::{Deserialize, Serialize};

use super::Description;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    #[serde(default, deserialize_with = "super::lenient")]
    pub title:       Option<String>,
    #[serde(default, deserialize_with = "super::lenient")]
    pub description: Option<Description>,
}
