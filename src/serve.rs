use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use thiserror::Error;
use tower_http::trace::TraceLayer;

use crate::input::csv::parse_line_items;
use crate::model::bins::BinProfile;
use crate::pipeline::run_pipeline;
use crate::report::csv::render_segments_csv;

const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to start runtime: {0}")]
    Runtime(std::io::Error),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(std::io::Error),
}

/// Read-only state shared across requests. Each request parses its own
/// table and runs the pipeline on its own data.
#[derive(Debug, Clone)]
pub struct AppState {
    pub bins: BinProfile,
}

/// Runs the upload service until the process is terminated.
pub fn serve(addr: SocketAddr, bins: BinProfile) -> Result<(), ServeError> {
    let runtime = tokio::runtime::Runtime::new().map_err(ServeError::Runtime)?;
    runtime.block_on(run_server(addr, bins))
}

async fn run_server(addr: SocketAddr, bins: BinProfile) -> Result<(), ServeError> {
    let router = build_router(Arc::new(AppState { bins }));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;
    tracing::info!("listening on {addr}");
    axum::serve(listener, router).await.map_err(ServeError::Serve)
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// Accepts a multipart form with a `file` part holding the line-item CSV
/// and responds with the labeled table as CSV. Malformed input is a 400;
/// an unmapped composite key is a coverage bug and a 500.
async fn predict(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let upload = match read_upload(&mut multipart).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            return (StatusCode::BAD_REQUEST, "missing file part\n").into_response();
        }
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };

    let items = match parse_line_items(Cursor::new(upload.as_slice())) {
        Ok(items) => items,
        Err(e) => return (StatusCode::BAD_REQUEST, format!("{e}\n")).into_response(),
    };

    match run_pipeline(&items, &state.bins) {
        Ok(rows) => (
            [(header::CONTENT_TYPE, "text/csv")],
            render_segments_csv(&rows),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("pipeline failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{e}\n")).into_response()
        }
    }
}

/// Pulls the uploaded table out of the multipart stream: the part named
/// `file`, or failing that the first part carrying a filename.
async fn read_upload(multipart: &mut Multipart) -> Result<Option<Vec<u8>>, String> {
    let mut fallback = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("invalid multipart body: {e}\n"))?
    {
        let named_file = field.name() == Some("file");
        let has_filename = field.file_name().is_some();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| format!("failed to read upload: {e}\n"))?;
        if named_file {
            return Ok(Some(bytes.to_vec()));
        }
        if has_filename && fallback.is_none() {
            fallback = Some(bytes.to_vec());
        }
    }
    Ok(fallback)
}

#[cfg(test)]
#[path = "../tests/src_inline/serve.rs"]
mod tests;
