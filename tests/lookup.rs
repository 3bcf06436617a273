use std::time::Duration;

use chrono::NaiveDate;
use mockito::{Matcher, Mock, Server, ServerGuard};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use bookmeta::{BookRecord, Client, Locale};

const ISBN: &str = "9780552124751";
const USER_AGENT: &str = "bookmeta-test/1.0 (tests@example.org)";

fn client(server: &ServerGuard) -> Client {
    Client::new(
        &server.url(),
        USER_AGENT,
        Locale::default(),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn keyed_by_isbn(entry: Value) -> Value {
    let mut books = serde_json::Map::new();
    books.insert(format!("ISBN:{ISBN}"), entry);
    Value::Object(books)
}

fn books_query(jscmd: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("bibkeys".into(), format!("ISBN:{ISBN}")),
        Matcher::UrlEncoded("format".into(), "json".into()),
        Matcher::UrlEncoded("jscmd".into(), jscmd.into()),
    ])
}

async fn mock_books(server: &mut ServerGuard, jscmd: &str, entry: Value) -> Mock {
    server
        .mock("GET", "/api/books")
        .match_query(books_query(jscmd))
        .match_header("user-agent", USER_AGENT)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(keyed_by_isbn(entry).to_string())
        .expect(1)
        .create_async()
        .await
}

async fn mock_failure(server: &mut ServerGuard, jscmd: &str, status: usize) -> Mock {
    server
        .mock("GET", "/api/books")
        .match_query(books_query(jscmd))
        .with_status(status)
        .expect(1)
        .create_async()
        .await
}

async fn mock_json(server: &mut ServerGuard, path: &str, body: Value, hits: usize) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(hits)
        .create_async()
        .await
}

fn data_entry() -> Value {
    json!({
        "url": "https://openlibrary.org/books/OL7353617M/The_Colour_of_Magic",
        "key": "/books/OL7353617M",
        "title": "The Colour of Magic",
        "identifiers": { "isbn_13": [ISBN], "openlibrary": ["OL7353617M"] },
        "number_of_pages": 285,
        "publish_date": "May 1988",
        "publishers": [{ "name": "Corgi" }],
        "authors": [{ "url": "https://openlibrary.org/authors/OL25712A", "name": "Terry Pratchett" }],
        "cover": { "medium": "https://covers.openlibrary.org/b/id/6629213-M.jpg" }
    })
}

fn details_entry(details: Value) -> Value {
    json!({
        "bib_key": format!("ISBN:{ISBN}"),
        "info_url": "https://openlibrary.org/books/OL7353617M/The_Colour_of_Magic",
        "preview": "noview",
        "details": details
    })
}

#[tokio::test]
async fn merges_data_details_work_and_language() {
    let mut server = Server::new_async().await;
    let data = mock_books(&mut server, "data", data_entry()).await;
    let details = mock_books(
        &mut server,
        "details",
        details_entry(json!({
            "title": "The Colour of Magic",
            "languages": [{ "key": "/languages/fre" }],
            "series": ["Discworld"],
            "works": [{ "key": "/works/OL453936W" }]
        })),
    )
    .await;
    let work = mock_json(
        &mut server,
        "/works/OL453936W.json",
        json!({ "description": { "type": "/type/text", "value": "Rincewind flees Ankh-Morpork." } }),
        1,
    )
    .await;
    let language = mock_json(
        &mut server,
        "/languages/fre.json",
        json!({
            "name": "French",
            "code": "fre",
            "name_translated": { "en": ["french"], "fr": ["français"] }
        }),
        1,
    )
    .await;

    let record = client(&server).fetch_book_metadata(ISBN).await.unwrap();

    assert_eq!(
        record,
        BookRecord {
            title: Some("The Colour of Magic".into()),
            isbn: Some(ISBN.into()),
            page_number: Some(285),
            publication_date: NaiveDate::from_ymd_opt(1988, 5, 1),
            publisher: Some("Corgi".into()),
            author: Some("Terry Pratchett".into()),
            image_internet_url: Some("https://covers.openlibrary.org/b/id/6629213-M.jpg".into()),
            summary: Some("Rincewind flees Ankh-Morpork.".into()),
            language: Some("French".into()),
            series: Some("Discworld".into()),
            work: Some("/works/OL453936W".into()),
        }
    );
    data.assert_async().await;
    details.assert_async().await;
    work.assert_async().await;
    language.assert_async().await;
}

#[tokio::test]
async fn no_work_request_when_summary_present() {
    let mut server = Server::new_async().await;
    let _data = mock_books(&mut server, "data", json!({ "title": "Mort" })).await;
    let _details = mock_books(
        &mut server,
        "details",
        details_entry(json!({
            "description": "Death takes an apprentice.",
            "works": [{ "key": "/works/OL453948W" }]
        })),
    )
    .await;
    let work = mock_json(
        &mut server,
        "/works/OL453948W.json",
        json!({ "description": "Should not be fetched" }),
        0,
    )
    .await;

    let record = client(&server).fetch_book_metadata(ISBN).await.unwrap();
    assert_eq!(record.summary.as_deref(), Some("Death takes an apprentice."));
    work.assert_async().await;
}

#[tokio::test]
async fn failing_work_request_only_loses_the_summary() {
    let mut server = Server::new_async().await;
    let _data = mock_books(&mut server, "data", json!({ "title": "Mort" })).await;
    let _details = mock_books(
        &mut server,
        "details",
        details_entry(json!({ "works": [{ "key": "/works/OL453948W" }] })),
    )
    .await;
    let work = server
        .mock("GET", "/works/OL453948W.json")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;

    let record = client(&server).fetch_book_metadata(ISBN).await.unwrap();
    assert_eq!(
        record,
        BookRecord {
            title: Some("Mort".into()),
            work: Some("/works/OL453948W".into()),
            ..BookRecord::default()
        }
    );
    work.assert_async().await;
}

#[tokio::test]
async fn current_language_is_resolved_without_request() {
    let mut server = Server::new_async().await;
    let _data = mock_books(&mut server, "data", json!({ "title": "Mort" })).await;
    let _details = mock_books(
        &mut server,
        "details",
        details_entry(json!({ "languages": [{ "key": "/languages/eng" }] })),
    )
    .await;
    let language = mock_json(&mut server, "/languages/eng.json", json!({}), 0).await;

    let record = client(&server).fetch_book_metadata(ISBN).await.unwrap();
    assert_eq!(record.language.as_deref(), Some("English"));
    language.assert_async().await;
}

#[tokio::test]
async fn unresolvable_language_keeps_code() {
    let mut server = Server::new_async().await;
    let missing = server
        .mock("GET", "/languages/xyz.json")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;
    let untranslated = mock_json(
        &mut server,
        "/languages/ger.json",
        json!({ "name_translated": { "de": ["deutsch"] } }),
        1,
    )
    .await;
    let malformed = server
        .mock("GET", "/languages/ita.json")
        .with_status(200)
        .with_body("<html>oops</html>")
        .expect(1)
        .create_async()
        .await;

    let client = client(&server);
    assert_eq!(client.resolve_language_name("xyz").await, "xyz");
    assert_eq!(client.resolve_language_name("ger").await, "ger");
    assert_eq!(client.resolve_language_name("ita").await, "ita");
    missing.assert_async().await;
    untranslated.assert_async().await;
    malformed.assert_async().await;
}

#[tokio::test]
async fn failed_data_request_keeps_details_fields() {
    let mut server = Server::new_async().await;
    let data = mock_failure(&mut server, "data", 500).await;
    let _details = mock_books(
        &mut server,
        "details",
        details_entry(json!({ "series": ["Discworld"], "description": "Wizards." })),
    )
    .await;

    let record = client(&server).fetch_book_metadata(ISBN).await.unwrap();
    assert_eq!(
        record,
        BookRecord {
            summary: Some("Wizards.".into()),
            series: Some("Discworld".into()),
            ..BookRecord::default()
        }
    );
    data.assert_async().await;
}

#[tokio::test]
async fn malformed_details_keep_data_fields() {
    let mut server = Server::new_async().await;
    let _data = mock_books(&mut server, "data", json!({ "title": "Mort" })).await;
    let _details = server
        .mock("GET", "/api/books")
        .match_query(books_query("details"))
        .with_status(200)
        .with_body("{ not json")
        .create_async()
        .await;

    let record = client(&server).fetch_book_metadata(ISBN).await.unwrap();
    assert_eq!(
        record,
        BookRecord {
            title: Some("Mort".into()),
            ..BookRecord::default()
        }
    );
}

#[tokio::test]
async fn both_primary_requests_failing_is_none() {
    let mut server = Server::new_async().await;
    let _data = mock_failure(&mut server, "data", 500).await;
    let _details = mock_failure(&mut server, "details", 503).await;

    assert_eq!(client(&server).fetch_book_metadata(ISBN).await, None);
}

#[tokio::test]
async fn unknown_isbn_is_none() {
    let mut server = Server::new_async().await;
    let _data = mock_json(&mut server, "/api/books", json!({}), 2).await;

    assert_eq!(client(&server).fetch_book_metadata(ISBN).await, None);
}

#[tokio::test]
async fn odd_field_shapes_only_lose_themselves() {
    let mut server = Server::new_async().await;
    let _data = mock_books(
        &mut server,
        "data",
        json!({ "title": "Mort", "number_of_pages": "316" }),
    )
    .await;
    let _details = mock_books(
        &mut server,
        "details",
        details_entry(json!({
            "description": { "type": "/type/text" },
            "series": ["Discworld"],
            "languages": [{ "key": "/languages/eng" }]
        })),
    )
    .await;

    let record = client(&server).fetch_book_metadata(ISBN).await.unwrap();
    assert_eq!(
        record,
        BookRecord {
            title: Some("Mort".into()),
            page_number: Some(316),
            language: Some("English".into()),
            series: Some("Discworld".into()),
            ..BookRecord::default()
        }
    );
}
