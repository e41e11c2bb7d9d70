use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    foundation::core::BearRequest,
    foundation::error::BearResult,
    pipeline::{BearOutcome, BearPipeline, MISSING_HEADER, missing_report},
};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const IMAGE_JPEG: &str = "image/jpeg";

#[derive(Clone)]
struct AppState {
    pipeline: Arc<BearPipeline>,
}

/// Routes: `GET /bear/{head}/{body}/{leg}` and `GET /health`.
pub fn router(pipeline: BearPipeline) -> Router {
    let state = AppState {
        pipeline: Arc::new(pipeline),
    };
    Router::new()
        .route("/bear/:head/:body/:leg", get(get_bear))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `router(pipeline)` on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, pipeline: BearPipeline) -> anyhow::Result<()> {
    axum::serve(listener, router(pipeline))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn get_bear(
    State(state): State<AppState>,
    Path((head, body, leg)): Path<(String, String, String)>,
) -> Response {
    let req = BearRequest::new(head, body, leg);
    let pipeline = Arc::clone(&state.pipeline);
    match tokio::task::spawn_blocking(move || pipeline.build(&req)).await {
        Ok(result) => into_response(result),
        Err(e) => {
            tracing::error!(error = %e, "bear task failed");
            plain(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{MISSING_HEADER} internal error"),
            )
        }
    }
}

async fn health() -> Response {
    plain(StatusCode::OK, "ok".to_string())
}

/// Map a pipeline result onto an HTTP response.
///
/// Found bears are `200 image/jpeg`, a missing member is `404 text/plain` with the tier
/// report, and every fatal error is `500 text/plain`.
pub fn into_response(result: BearResult<BearOutcome>) -> Response {
    match result {
        Ok(BearOutcome::Composed(bear)) => {
            tracing::debug!(
                width = bear.width,
                height = bear.height,
                bytes = bear.jpeg.len(),
                "bear composed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, IMAGE_JPEG)],
                bear.jpeg,
            )
                .into_response()
        }
        Ok(BearOutcome::Missing(misses)) => {
            tracing::warn!(member = %misses.request, "bear member not found");
            plain(StatusCode::NOT_FOUND, missing_report(&misses))
        }
        Err(e) => {
            tracing::error!(error = %e, "bear failed");
            plain(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{MISSING_HEADER} {e}"),
            )
        }
    }
}

fn plain(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, TEXT_PLAIN)], body).into_response()
}

#[cfg(test)]
#[path = "../tests/unit/server.rs"]
mod tests;
