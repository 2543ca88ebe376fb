use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::{util::present, ApiError, AppState};

pub const MISSING_FIELDS: &str = "Missing required fields: text, targetLanguage";
const SERVICE: &str = "Translation service error";

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// `telugu` or `english`; other names are handed to the translator as-is.
    #[serde(default)]
    pub target_language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_text: String,
}

#[utoipa::path(
    post,
    path = "/api/translate-text",
    tag = "Translation",
    request_body = TranslateRequest,
    responses(
        (status = 200, description = "Translated text", body = TranslateResponse),
        (status = 400, description = "Missing fields", body = crate::error::ErrorResponse),
        (status = 401, description = "Access token rejected", body = crate::error::ErrorResponse),
        (status = 500, description = "Unexpected failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn translate_text(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ApiError> {
    state.authorize(&headers)?;
    let Json(payload) = payload?;

    // Forwarded untrimmed; only the blank check trims.
    let text = payload
        .text
        .as_deref()
        .filter(|text| !text.trim().is_empty());
    let target_language = present(payload.target_language.as_deref());
    let (Some(text), Some(target_language)) = (text, target_language) else {
        return Err(ApiError::bad_request(MISSING_FIELDS));
    };

    info!(
        target_language,
        chars = text.chars().count(),
        "translating text"
    );

    let translated_text = state
        .orchestrator()
        .translate(text, target_language)
        .await
        .map_err(|error| ApiError::upstream(SERVICE, error))?;

    Ok(Json(TranslateResponse { translated_text }))
}
