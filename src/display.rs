use std::fmt::Write;

use crate::{config::Config, store::StoredBook, types::record::BookRecord};

/// Render a record for the terminal, one styled line per field present.
pub fn record_to_string(record: &BookRecord, config: &Config) -> String {
    let mut s = String::new();
    let mut line = |output: &crate::config::OutputConfig, content: &dyn std::fmt::Display| {
        let _ = writeln!(s, "{}", output.format_str(content));
    };
    if let Some(title) = &record.title {
        line(&config.output_title, title);
    }
    if let Some(author) = &record.author {
        line(&config.output_author, author);
    }
    if let Some(publisher) = &record.publisher {
        line(&config.output_publisher, publisher);
    }
    if let Some(date) = &record.publication_date {
        line(&config.output_release_date, &date.format("%Y-%m-%d"));
    }
    if let Some(pages) = &record.page_number {
        line(&config.output_page_count, pages);
    }
    if let Some(isbn) = &record.isbn {
        line(&config.output_isbn, isbn);
    }
    if let Some(language) = &record.language {
        line(&config.output_language, language);
    }
    if let Some(series) = &record.series {
        line(&config.output_series, series);
    }
    if let Some(work) = &record.work {
        line(&config.output_work, work);
    }
    if let Some(url) = &record.image_internet_url {
        line(&config.output_cover, url);
    }
    if let Some(summary) = &record.summary {
        line(&config.output_summary, summary);
    }
    s
}

pub fn stored_to_string(book: &StoredBook, config: &Config) -> String {
    format!(
        "{}\n{}",
        config.output_id.format_str(book.id),
        record_to_string(&book.record, config)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_present_fields_are_rendered() {
        let config = Config::default();
        let record = BookRecord {
            title: Some("Mort".into()),
            author: Some("Terry Pratchett".into()),
            ..BookRecord::default()
        };
        let rendered = record_to_string(&record, &config);
        assert_eq!(rendered.lines().count(), 2);
        assert!(rendered.contains("Mort"));
        assert!(rendered.contains("Written by:"));
        assert!(!rendered.contains("Publisher:"));
    }
}
