//! Mapping of each Open Library response kind onto a partial [`BookRecord`].
//! Fields missing from a response stay `None`; nothing is defaulted.

use crate::{
    date::parse_publication_date,
    openlib_schema::{Data, DetailsEnvelope, RawExternalResponse, Work},
    types::record::BookRecord,
};

impl RawExternalResponse {
    /// `None` means the response had nothing to merge. Only work responses
    /// without a description produce it.
    pub fn normalize(self) -> Option<BookRecord> {
        match self {
            RawExternalResponse::Data(data) => Some(from_data(*data)),
            RawExternalResponse::Details(details) => Some(from_details(*details)),
            RawExternalResponse::Work(work) => from_work(*work),
        }
    }
}

pub fn from_data(data: Data) -> BookRecord {
    let title = data.title.map(|title| match data.subtitle {
        Some(subtitle) => format!("{title}: {subtitle}"),
        None => title,
    });
    let isbn = data
        .identifiers
        .and_then(|ids| ids.isbn_13)
        .and_then(|isbns| isbns.into_iter().next());
    // Only the first publisher and author are kept.
    let publisher = data
        .publishers
        .and_then(|publishers| publishers.into_iter().next())
        .and_then(|publisher| publisher.name);
    let author = data
        .authors
        .and_then(|authors| authors.into_iter().next())
        .and_then(|author| author.name);
    let image_internet_url = data.cover.and_then(|cover| {
        [cover.medium, cover.small, cover.large]
            .into_iter()
            .flatten()
            .find(|url| !url.is_empty())
    });
    BookRecord {
        title,
        isbn,
        page_number: data.number_of_pages,
        publication_date: data
            .publish_date
            .as_deref()
            .and_then(parse_publication_date),
        publisher,
        author,
        image_internet_url,
        ..BookRecord::default()
    }
}

pub fn from_details(envelope: DetailsEnvelope) -> BookRecord {
    let Some(details) = envelope.details else {
        return BookRecord::default();
    };
    let language = details
        .languages
        .and_then(|languages| languages.into_iter().next())
        .and_then(|language| language.key)
        .map(|key| trailing_segment(&key).to_string());
    BookRecord {
        summary: details.description.map(|d| d.into_text()),
        language,
        series: details.series.and_then(|series| series.into_iter().next()),
        work: details
            .works
            .and_then(|works| works.into_iter().next())
            .and_then(|work| work.key),
        ..BookRecord::default()
    }
}

pub fn from_work(work: Work) -> Option<BookRecord> {
    let summary = work.description?.into_text();
    Some(BookRecord {
        summary: Some(summary),
        ..BookRecord::default()
    })
}

/// `/languages/eng` -> `eng`
fn trailing_segment(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}
