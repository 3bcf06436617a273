//! Shapes of the Open Library responses we read. Only the fields the lookup
//! uses are modelled; everything is optional because the API omits freely.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub mod data;
pub mod details;
pub mod language;
pub mod work;

pub use data::Data;
pub use details::{Details, DetailsEnvelope};
pub use language::Language;
pub use work::Work;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Simple(String),
    Complex(DescriptionComplex),
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionComplex {
    pub value: String,
}

impl Description {
    pub fn into_text(self) -> String {
        match self {
            Description::Simple(s) => s,
            Description::Complex(c) => c.value,
        }
    }
}

/// Field reader for `#[serde(default, deserialize_with = "lenient")]`.
/// A value of the wrong shape counts as absent instead of failing the whole
/// response.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`], but also takes counts written as strings (`"285"`).
pub(crate) fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// One response of any kind the lookup requests.
#[derive(Debug, Clone, PartialEq)]
pub enum RawExternalResponse {
    Data(Box<Data>),
    Details(Box<DetailsEnvelope>),
    Work(Box<Work>),
}
