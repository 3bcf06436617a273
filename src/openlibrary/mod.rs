use std::{collections::HashMap, time::Duration};

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::{Error, Result},
    openlib_schema::{Data, DetailsEnvelope, Language, RawExternalResponse, Work},
    types::{locale::Locale, record::BookRecord},
};

pub mod normalize;

/// Looks up book metadata on an Open Library instance.
#[derive(Debug, Clone)]
pub struct Client {
    http:     reqwest::Client,
    base_url: String,
    locale:   Locale,
}

impl Client {
    pub fn new(
        base_url: &str,
        user_agent: &str,
        locale: Locale,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            locale,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.api_base_url,
            &config.user_agent(),
            config.locale.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        debug!("GET {url} {query:?}");
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status,
            });
        }
        let body = response.text().await?;
        let de = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(de).map_err(|source| Error::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// `/api/books` lookup of one ISBN. A response without an entry for the
    /// ISBN is an empty answer, not an error.
    async fn get_books<T: DeserializeOwned>(&self, isbn: &str, jscmd: &str) -> Result<Option<T>> {
        let bibkey = format!("ISBN:{isbn}");
        let mut books: HashMap<String, T> = self
            .get_json(
                &self.url("api/books"),
                &[
                    ("bibkeys", bibkey.as_str()),
                    ("format", "json"),
                    ("jscmd", jscmd),
                ],
            )
            .await?;
        Ok(books.remove(&bibkey))
    }

    async fn fetch_data(&self, isbn: &str) -> Result<BookRecord> {
        let data: Option<Data> = self.get_books(isbn, "data").await?;
        Ok(data
            .and_then(|data| RawExternalResponse::Data(Box::new(data)).normalize())
            .unwrap_or_default())
    }

    async fn fetch_details(&self, isbn: &str) -> Result<BookRecord> {
        let details: Option<DetailsEnvelope> = self.get_books(isbn, "details").await?;
        Ok(details
            .and_then(|details| RawExternalResponse::Details(Box::new(details)).normalize())
            .unwrap_or_default())
    }

    async fn fetch_work(&self, work_key: &str) -> Result<Option<BookRecord>> {
        let work: Work = self.get_json(&self.url(&format!("{work_key}.json")), &[]).await?;
        Ok(RawExternalResponse::Work(Box::new(work)).normalize())
    }

    /// Gather everything Open Library knows about `isbn` into one record.
    ///
    /// The `data` and `details` responses are requested together and merged in
    /// that order, so `details` wins on shared fields. A missing summary is
    /// filled from the edition's work, and the language code is replaced by
    /// its display name. A failing request only loses its own fields; `None`
    /// is returned when both primary requests fail or nothing was found.
    pub async fn fetch_book_metadata(&self, isbn: &str) -> Option<BookRecord> {
        let (data, details) = tokio::join!(self.fetch_data(isbn), self.fetch_details(isbn));
        let mut record = merge_primary(isbn, data, details)?;

        if record.summary.is_none() {
            if let Some(work_key) = record.work.clone() {
                match self.fetch_work(&work_key).await {
                    Ok(Some(partial)) => record.merge(partial),
                    Ok(None) => debug!("{work_key} has no description"),
                    Err(e) => warn!("Couldn't fetch {work_key}: {e}"),
                }
            }
        }

        if let Some(code) = record.language.take() {
            record.language = Some(self.resolve_language_name(&code).await);
        }

        if record.is_empty() {
            info!("Nothing found for {isbn}.");
            return None;
        }
        info!("Lookup of {isbn} complete.");
        Some(record)
    }

    /// Display name of an Open Library language code in the client's locale.
    /// Falls back to `code` itself whenever no name can be found.
    pub async fn resolve_language_name(&self, code: &str) -> String {
        if code == self.locale.url_key {
            return self.locale.name.clone();
        }
        let url = self.url(&format!("languages/{code}.json"));
        match self.get_json::<Language>(&url, &[]).await {
            Ok(language) => match language.translated(&self.locale.code).and_then(capitalize) {
                Some(name) => name,
                None => {
                    debug!("No {} name for language {code}", self.locale.code);
                    code.to_string()
                }
            },
            Err(e) => {
                warn!("Couldn't resolve language {code}: {e}");
                code.to_string()
            }
        }
    }
}

/// Merge the `details` partial over the `data` one. A failed side counts as
/// empty, `None` only when both failed.
fn merge_primary(
    isbn: &str,
    data: Result<BookRecord>,
    details: Result<BookRecord>,
) -> Option<BookRecord> {
    if let (Err(data_err), Err(details_err)) = (&data, &details) {
        warn!("Lookup of {isbn} failed: {data_err}; {details_err}");
        return None;
    }
    let mut record = BookRecord::default();
    for (kind, partial) in [("data", data), ("details", details)] {
        match partial {
            Ok(partial) => record.merge(partial),
            Err(e) => warn!("Ignoring {kind} response for {isbn}: {e}"),
        }
    }
    Some(record)
}

fn capitalize(s: &str) -> Option<String> {
    let mut chars = s.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}
