use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use eduassist_learning::{Grade, Language, Subject};
use reqwest::{header::AUTHORIZATION, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::ClientError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DoubtAnswer {
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub translated_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Transcription {
    #[serde(default)]
    pub transcript: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DoubtBody<'a> {
    question: &'a str,
    subject: Subject,
    grade: Grade,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateBody<'a> {
    text: &'a str,
    target_language: Language,
}

#[derive(Serialize)]
struct TranscribeBody {
    audio: String,
}

/// Per-request timeout used by [`FunctionsClient::new`]. Covers the relay's
/// own upstream timeout plus a translation round.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// Calls the relay functions under `{base_url}/api/`.
#[derive(Debug, Clone)]
pub struct FunctionsClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl FunctionsClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http_client(http, base_url))
    }

    pub fn with_http_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    /// Sends `Authorization: Bearer <key>` with every call.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into()).filter(|key| !key.trim().is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn ask_doubt(
        &self,
        question: &str,
        subject: Subject,
        grade: Grade,
        image: Option<&str>,
    ) -> Result<DoubtAnswer, ClientError> {
        let body = DoubtBody {
            question,
            subject,
            grade,
            image_url: image,
        };
        self.invoke("doubt-answer", &body).await
    }

    pub async fn translate_text(
        &self,
        text: &str,
        language: Language,
    ) -> Result<Translation, ClientError> {
        let body = TranslateBody {
            text,
            target_language: language,
        };
        self.invoke("translate-text", &body).await
    }

    /// Uploads raw audio bytes base64 encoded and returns the transcript.
    pub async fn transcribe_audio(&self, audio: &[u8]) -> Result<String, ClientError> {
        let body = TranscribeBody {
            audio: general_purpose::STANDARD.encode(audio),
        };
        let transcription: Transcription = self.invoke("transcribe-audio", &body).await?;
        Ok(transcription.transcript)
    }

    async fn invoke<B, T>(&self, function: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/api/{function}", self.base_url);
        debug!(%url, "invoking relay function");

        let mut request = self.http.post(&url).json(body);
        if let Some(api_key) = &self.api_key {
            request = request.header(AUTHORIZATION, format!("Bearer {api_key}"));
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = error_field(&text).unwrap_or(text);
            warn!(function, status = status.as_u16(), %message, "relay function failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let value: Value = serde_json::from_str(&text)?;
        if let Some(message) = value.get("error").and_then(Value::as_str) {
            if !message.is_empty() {
                return Err(ClientError::Function(message.to_string()));
            }
        }

        Ok(serde_json::from_value(value)?)
    }
}

fn error_field(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("error")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn doubt_body_uses_wire_field_names() {
        let body = DoubtBody {
            question: "What is 2+2?",
            subject: Subject::Math,
            grade: Grade::College,
            image_url: Some("data:image/png;base64,AAAA"),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "question": "What is 2+2?",
                "subject": "math",
                "grade": "college",
                "imageUrl": "data:image/png;base64,AAAA"
            })
        );
    }

    #[test]
    fn error_field_reads_json_errors_only() {
        assert_eq!(
            error_field(r#"{"error":"Missing required field: audio (base64)"}"#).as_deref(),
            Some("Missing required field: audio (base64)")
        );
        assert_eq!(error_field("Bad Gateway"), None);
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let client = FunctionsClient::new("http://localhost:7070/").expect("client");
        assert_eq!(client.base_url(), "http://localhost:7070");
    }
}
