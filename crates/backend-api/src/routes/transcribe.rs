use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::{util::present, ApiError, AppState};

pub const MISSING_AUDIO: &str = "Missing required field: audio (base64)";
pub const NOT_CONFIGURED: &str =
    "Voice transcription is not yet configured. Please type your question instead.";

#[derive(Debug, Deserialize, ToSchema)]
pub struct TranscribeRequest {
    /// Recorded audio, base64 encoded. A `data:` URI prefix is accepted.
    #[serde(default)]
    pub audio: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TranscribeResponse {
    pub transcript: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/transcribe-audio",
    tag = "Transcription",
    request_body = TranscribeRequest,
    responses(
        (status = 200, description = "Transcript, or the not-configured notice", body = TranscribeResponse),
        (status = 400, description = "Missing or undecodable audio", body = crate::error::ErrorResponse),
        (status = 401, description = "Access token rejected", body = crate::error::ErrorResponse)
    )
)]
pub async fn transcribe_audio(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<TranscribeRequest>, JsonRejection>,
) -> Result<Json<TranscribeResponse>, ApiError> {
    state.authorize(&headers)?;
    let Json(payload) = payload?;

    let audio = present(payload.audio.as_deref())
        .ok_or_else(|| ApiError::bad_request(MISSING_AUDIO))?;
    let bytes = decode_audio(audio)?;

    debug!(bytes = bytes.len(), "received audio for transcription");
    warn!("speech-to-text backend not configured");

    Ok(Json(TranscribeResponse {
        transcript: String::new(),
        error: Some(NOT_CONFIGURED.to_string()),
    }))
}

fn decode_audio(audio: &str) -> Result<Vec<u8>, ApiError> {
    let encoded = match audio.split_once("base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => audio,
    };

    general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|error| ApiError::bad_request(format!("audio must be base64 encoded: {error}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_audio_accepts_plain_and_data_uri() {
        assert_eq!(decode_audio("aGVsbG8=").unwrap(), b"hello");
        assert_eq!(
            decode_audio("data:audio/m4a;base64,aGVsbG8=").unwrap(),
            b"hello"
        );
    }

    #[test]
    fn decode_audio_rejects_garbage() {
        let error = decode_audio("not base64!").expect_err("invalid input");
        assert_eq!(error.status, axum::http::StatusCode::BAD_REQUEST);
    }
}
