use anyhow::{Context, Result};
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use docsearch_core::{Document, IndexError, IndexStore, SearchHit, Searcher};
use serde::Deserialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub const MISSING_QUERY: &str = "a search keyword is required";

#[derive(Deserialize)]
pub struct SearchParams {
    pub word: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub searcher: Searcher,
}

/// Build the process-wide index from `corpus` and wrap it in a router.
/// The index is fully built before this returns, so no request can observe
/// a partially populated store.
pub fn build_app(corpus: &str, www: Option<PathBuf>) -> Result<Router> {
    let index = IndexStore::shared(corpus).with_context(|| format!("building index from {corpus}"))?;
    Ok(router(Searcher::with_word_tokenizer(index), www))
}

pub fn router(searcher: Searcher, www: Option<PathBuf>) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let mut app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/s", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(AppState { searcher });
    if let Some(root) = www {
        app = app.fallback_service(ServeDir::new(root));
    }
    app.layer(cors).layer(TraceLayer::new_for_http())
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchHit>>, (StatusCode, &'static str)> {
    let query = params.word.unwrap_or_default();
    tracing::info!(query = %query, "search request");
    match state.searcher.search(&query) {
        Ok(hits) => Ok(Json(hits)),
        Err(IndexError::EmptyQuery) => Err((StatusCode::BAD_REQUEST, MISSING_QUERY)),
        Err(e) => {
            tracing::error!(error = %e, "search failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "search failed"))
        }
    }
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<u32>,
) -> Result<Json<Document>, (StatusCode, Json<serde_json::Value>)> {
    match state.searcher.index().get_document(doc_id) {
        Ok(doc) => Ok(Json(doc.clone())),
        Err(e) => Err((StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": e.to_string() })))),
    }
}

/// Console front end: one query per input line, results printed as a JSON
/// array. Returns when the input is exhausted.
pub fn run_repl<R: BufRead, W: Write>(searcher: &Searcher, input: R, mut out: W) -> Result<()> {
    let mut lines = input.lines();
    loop {
        write!(out, "query> ")?;
        out.flush()?;
        let Some(line) = lines.next() else { break };
        let query = line?;
        match searcher.search(&query) {
            Ok(hits) => writeln!(out, "{}", serde_json::to_string_pretty(&hits)?)?,
            Err(IndexError::EmptyQuery) => writeln!(out, "{MISSING_QUERY}")?,
            Err(e) => writeln!(out, "error: {e}")?,
        }
    }
    writeln!(out)?;
    Ok(())
}
