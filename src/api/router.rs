//! HTTP router.
//!
//! Two surfaces share one server:
//! - `/extract-document`: the OCR engine contract, open CORS
//! - `/api/...`: the upload → extract → review → export flow

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the full router from a shared context.
pub fn api_router(ctx: ApiContext) -> Router {
    let max_upload = ctx.config.max_upload_bytes;

    // Base64 inflates payloads by a third.
    let engine = Router::new()
        .route("/extract-document", post(endpoints::engine::extract))
        .layer(DefaultBodyLimit::max(max_upload + max_upload / 3 + 1024))
        .layer(CorsLayer::permissive())
        .with_state(ctx.clone());

    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/extract",
            post(endpoints::extract::extract).layer(DefaultBodyLimit::max(max_upload)),
        )
        .route("/fields/check", post(endpoints::fields::check))
        .route("/submit", post(endpoints::submit::submit))
        .route("/export", post(endpoints::export::export))
        .with_state(ctx);

    Router::new()
        .merge(engine)
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
}
