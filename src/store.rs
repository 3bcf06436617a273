use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    FromRow, Pool, Sqlite, SqlitePool,
};

use crate::{error::Result, types::record::BookRecord};

const TABLE_NAME: &str = "books";

/// A [BookRecord] that has been saved, with the id it was saved under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredBook {
    pub id:     i64,
    #[serde(flatten)]
    pub record: BookRecord,
}

#[derive(FromRow)]
struct BookRow {
    id:                 i64,
    title:              Option<String>,
    isbn:               Option<String>,
    page_number:        Option<i64>,
    publication_date:   Option<NaiveDate>,
    publisher:          Option<String>,
    author:             Option<String>,
    image_internet_url: Option<String>,
    summary:            Option<String>,
    language:           Option<String>,
    series:             Option<String>,
    work:               Option<String>,
}

impl From<BookRow> for StoredBook {
    fn from(row: BookRow) -> Self {
        Self {
            id:     row.id,
            record: BookRecord {
                title:              row.title,
                isbn:               row.isbn,
                page_number:        row.page_number.and_then(|n| u32::try_from(n).ok()),
                publication_date:   row.publication_date,
                publisher:          row.publisher,
                author:             row.author,
                image_internet_url: row.image_internet_url,
                summary:            row.summary,
                language:           row.language,
                series:             row.series,
                work:               row.work,
            },
        }
    }
}

/// Books the user decided to keep, in a single SQLite table.
#[derive(Debug, Clone)]
pub struct Store {
    conn: SqlitePool,
}

impl Store {
    pub async fn connect(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(sqlx::Error::Io)?;
        }
        let conn = Pool::connect_with(
            SqliteConnectOptions::new()
                .filename(path)
                .journal_mode(SqliteJournalMode::Wal)
                .create_if_missing(true),
        )
        .await?;
        Self::with_pool(conn).await
    }

    /// A private database that lives as long as the store.
    pub async fn in_memory() -> Result<Self> {
        let conn = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with("sqlite::memory:".parse::<SqliteConnectOptions>()?)
            .await?;
        Self::with_pool(conn).await
    }

    async fn with_pool(conn: Pool<Sqlite>) -> Result<Self> {
        let store = Self { conn };
        store.create_table().await?;
        Ok(store)
    }

    async fn create_table(&self) -> Result<()> {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {TABLE_NAME} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT,
                isbn TEXT,
                page_number INTEGER,
                publication_date TEXT,
                publisher TEXT,
                author TEXT,
                image_internet_url TEXT,
                summary TEXT,
                language TEXT,
                series TEXT,
                work TEXT
            );
            "#
        ))
        .execute(&self.conn)
        .await?;
        Ok(())
    }

    pub async fn insert(&self, record: &BookRecord) -> Result<i64> {
        let result = sqlx::query(&format!(
            r#"
            INSERT INTO {TABLE_NAME} (
                title, isbn, page_number, publication_date, publisher, author,
                image_internet_url, summary, language, series, work
            )
            VALUES ( ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11 )
            "#
        ))
        .bind(&record.title)
        .bind(&record.isbn)
        .bind(record.page_number.map(i64::from))
        .bind(record.publication_date)
        .bind(&record.publisher)
        .bind(&record.author)
        .bind(&record.image_internet_url)
        .bind(&record.summary)
        .bind(&record.language)
        .bind(&record.series)
        .bind(&record.work)
        .execute(&self.conn)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Replace the stored record. Returns `false` when there is no book `id`.
    pub async fn update(&self, id: i64, record: &BookRecord) -> Result<bool> {
        let result = sqlx::query(&format!(
            r#"
            UPDATE {TABLE_NAME}
            SET
                title = ?2,
                isbn = ?3,
                page_number = ?4,
                publication_date = ?5,
                publisher = ?6,
                author = ?7,
                image_internet_url = ?8,
                summary = ?9,
                language = ?10,
                series = ?11,
                work = ?12
            WHERE
                id = ?1;
            "#
        ))
        .bind(id)
        .bind(&record.title)
        .bind(&record.isbn)
        .bind(record.page_number.map(i64::from))
        .bind(record.publication_date)
        .bind(&record.publisher)
        .bind(&record.author)
        .bind(&record.image_internet_url)
        .bind(&record.summary)
        .bind(&record.language)
        .bind(&record.series)
        .bind(&record.work)
        .execute(&self.conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn get(&self, id: i64) -> Result<Option<StoredBook>> {
        let row: Option<BookRow> =
            sqlx::query_as(&format!("SELECT * FROM {TABLE_NAME} WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.conn)
                .await?;
        Ok(row.map(StoredBook::from))
    }

    pub async fn list(&self) -> Result<Vec<StoredBook>> {
        let rows: Vec<BookRow> = sqlx::query_as(&format!("SELECT * FROM {TABLE_NAME} ORDER BY id"))
            .fetch_all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(StoredBook::from).collect())
    }
}
