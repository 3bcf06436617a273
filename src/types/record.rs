use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Normalized metadata for one book, merged from every Open Library response
/// of a lookup. Every field is optional and independent of the others.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title:              Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn:               Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number:        Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_date:   Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher:          Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author:             Option<String>,
    #[serde(rename = "imageInternetURL", skip_serializing_if = "Option::is_none")]
    pub image_internet_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary:            Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language:           Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series:             Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work:               Option<String>,
}

impl BookRecord {
    /// Copy every field present in `other` over `self`.
    pub fn merge(&mut self, other: BookRecord) {
        fn take<T>(into: &mut Option<T>, from: Option<T>) {
            if from.is_some() {
                *into = from;
            }
        }
        take(&mut self.title, other.title);
        take(&mut self.isbn, other.isbn);
        take(&mut self.page_number, other.page_number);
        take(&mut self.publication_date, other.publication_date);
        take(&mut self.publisher, other.publisher);
        take(&mut self.author, other.author);
        take(&mut self.image_internet_url, other.image_internet_url);
        take(&mut self.summary, other.summary);
        take(&mut self.language, other.language);
        take(&mut self.series, other.series);
        take(&mut self.work, other.work);
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
