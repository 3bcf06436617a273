use axum::extract::{Query, State};
use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

use bookmeta::{BookRecord, Client};

pub struct TheStateOfAffairs {
    client: Client,
}

pub fn router(client: Client) -> Router {
    let state = Arc::new(TheStateOfAffairs { client });
    Router::new()
        .route("/api/isbn", get(isbn_query))
        .route("/api/isbn/:isbn", get(isbn))
        .with_state(state)
}

pub async fn start(client: Client, address: &str) -> anyhow::Result<()> {
    let addr: SocketAddr = address.parse()?;
    info!("Listening on {addr}.");
    axum::Server::bind(&addr)
        .serve(router(client).into_make_service())
        .await?;
    Ok(())
}

async fn lookup(isbn: &str, state: &TheStateOfAffairs) -> Result<Json<BookRecord>, StatusCode> {
    info!("Received {}.", isbn);
    let isbn = match crate::parse_isbn(isbn) {
        Ok(isbn) => isbn,
        Err(_) => {
            error!("{} is not an isbn.", isbn);
            return Err(StatusCode::BAD_REQUEST);
        }
    };
    match state.client.fetch_book_metadata(&isbn).await {
        Some(record) => {
            info!("Handling of {} complete.", isbn);
            Ok(Json(record))
        }
        None => {
            error!("Nothing found for {}.", isbn);
            Err(StatusCode::NOT_FOUND)
        }
    }
}

async fn isbn(
    Path(isbn): Path<String>,
    State(state): State<Arc<TheStateOfAffairs>>,
) -> Result<Json<BookRecord>, StatusCode> {
    lookup(&isbn, &state).await
}

async fn isbn_query(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<TheStateOfAffairs>>,
) -> Result<Json<BookRecord>, StatusCode> {
    match params.get("content") {
        Some(isbn) => lookup(isbn, &state).await,
        None => Err(StatusCode::BAD_REQUEST),
    }
}
