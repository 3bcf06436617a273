use serde::{Deserialize, Serialize};

/// Entry of `/api/books?jscmd=data`.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Data {
    #[serde(default, deserialize_with = "super::lenient")]
    pub title:           Option<String>,
    #[serde(default, deserialize_with = "super::lenient")]
    pub subtitle:        Option<String>,
    #[serde(default, deserialize_with = "super::lenient")]
    pub authors:         Option<Vec<Author>>,
    #[serde(default, deserialize_with = "super::lenient")]
    pub identifiers:     Option<Identifiers>,
    #[serde(default, deserialize_with = "super::lenient")]
    pub publishers:      Option<Vec<Publisher>>,
    #[serde(default, deserialize_with = "super::lenient")]
    pub publish_date:    Option<String>,
    #[serde(default, deserialize_with = "super::lenient_count")]
    pub number_of_pages: Option<u32>,
    #[serde(default, deserialize_with = "super::lenient")]
    pub cover:           Option<Cover>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, deserialize_with = "super::lenient")]
    pub url:  Option<String>,
    #[serde(default, deserialize_with = "super::lenient")]
    pub name: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifiers {
    #[serde(default, deserialize_with = "super::lenient")]
    pub isbn_10:     Option<Vec<String>>,
    #[serde(default, deserialize_with = "super::lenient")]
    pub isbn_13:     Option<Vec<String>>,
    #[serde(default, deserialize_with = "super::lenient")]
    pub oclc:        Option<Vec<String>>,
    #[serde(default, deserialize_with = "super::lenient")]
    pub openlibrary: Option<Vec<String>>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publisher {
    #[serde(default, deserialize_with = "super::lenient")]
    pub name: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cover {
    #[serde(default, deserialize_with = "super::lenient")]
    pub small:  Option<String>,
    #[serde(default, deserialize_with = "super::lenient")]
    pub medium: Option<String>,
    #[serde(default, deserialize_with = "super::lenient")]
    pub large:  Option<String>,
}
