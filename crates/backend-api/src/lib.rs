mod docs;
mod error;
mod state;
mod util;

pub mod routes;

pub use docs::ApiDoc;
pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, Method,
    },
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_body_bytes();

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/docs/openapi.json", get(openapi_document))
        .route("/api/doubt-answer", post(routes::doubt::answer_doubt))
        .route("/api/clear-doubt", post(routes::doubt::answer_doubt))
        .route("/api/translate-text", post(routes::translate::translate_text))
        .route(
            "/api/transcribe-audio",
            post(routes::transcribe::transcribe_audio),
        )
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}
