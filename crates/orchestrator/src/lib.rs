use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

use eduassist_config::{AppConfig, OrchestratorConfig, UpstreamProviderConfig};
use eduassist_learning::Grade;

pub mod prompts;

pub use prompts::{doubt_system_prompt, translation_system_prompt};

/// Environment variable consulted for the upstream API key when the
/// configuration leaves it unset.
pub const API_KEY_ENV: &str = "AI_API_KEY";

/// Returned when the upstream reply carries no answer text.
pub const NO_ANSWER_FALLBACK: &str = "I could not generate an answer. Please try again.";

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("upstream client not initialised")]
    UpstreamMissing,
    #[error("missing upstream API key")]
    ApiKeyMissing,
    #[error("upstream returned {status}: {body}")]
    UpstreamStatus { status: StatusCode, body: String },
    #[error("upstream http request failed: {0}")]
    ProviderHttp(#[from] reqwest::Error),
    #[error("invalid upstream response: {0}")]
    ProviderResponse(#[from] serde_json::Error),
}

/// Everything needed to ask the tutor one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoubtPrompt {
    pub question: String,
    pub subject: String,
    pub grade: Grade,
    /// Photo of the problem, as an http(s) URL or a data URI.
    pub image_url: Option<String>,
}

impl DoubtPrompt {
    pub fn new(question: impl Into<String>, subject: impl Into<String>, grade: Grade) -> Self {
        Self {
            question: question.into(),
            subject: subject.into(),
            grade,
            image_url: None,
        }
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

#[derive(Debug, Clone)]
struct ResolvedUpstream {
    client: Client,
    base_url: String,
    api_key: String,
    referer: Option<String>,
    title: Option<String>,
}

impl ResolvedUpstream {
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

pub struct Orchestrator {
    config: OrchestratorConfig,
    upstream: Option<ResolvedUpstream>,
}

impl Orchestrator {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            config: config.orchestrator.clone(),
            upstream: None,
        }
    }

    pub fn bootstrap(mut self) -> Result<Self, OrchestratorError> {
        let upstream = resolve_upstream(&self.config.upstream)?;
        info!(
            model = %self.config.model,
            base_url = %upstream.base_url,
            "upstream chat-completion client initialised"
        );
        self.upstream = Some(upstream);
        Ok(self)
    }

    pub fn active_model(&self) -> &str {
        &self.config.model
    }

    pub fn is_ready(&self) -> bool {
        self.upstream.is_some()
    }

    /// Ask the tutor. A reply without content yields [`NO_ANSWER_FALLBACK`].
    pub async fn answer_doubt(&self, prompt: &DoubtPrompt) -> Result<String, OrchestratorError> {
        let system = doubt_system_prompt(&prompt.subject, prompt.grade);
        let user = match &prompt.image_url {
            Some(url) => ChatMessage::user_with_image(&prompt.question, url),
            None => ChatMessage::user(&prompt.question),
        };

        debug!(
            subject = %prompt.subject,
            grade = %prompt.grade,
            has_image = prompt.image_url.is_some(),
            "requesting doubt answer"
        );

        let answer = self.complete(vec![ChatMessage::system(system), user]).await?;
        Ok(answer.unwrap_or_else(|| NO_ANSWER_FALLBACK.to_string()))
    }

    /// Translate `text` into `target_language`. A reply without content yields
    /// an empty string.
    pub async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, OrchestratorError> {
        let system = translation_system_prompt(target_language);

        debug!(target_language, chars = text.chars().count(), "requesting translation");

        let translated = self
            .complete(vec![ChatMessage::system(system), ChatMessage::user(text)])
            .await?;
        Ok(translated.unwrap_or_default())
    }

    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<Option<String>, OrchestratorError> {
        let upstream = self
            .upstream
            .as_ref()
            .ok_or(OrchestratorError::UpstreamMissing)?;

        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages,
        };

        let mut request = upstream
            .client
            .post(upstream.completions_url())
            .bearer_auth(&upstream.api_key)
            .json(&body);
        if let Some(referer) = &upstream.referer {
            request = request.header("HTTP-Referer", referer);
        }
        if let Some(title) = &upstream.title {
            request = request.header("X-Title", title);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!(%status, body = %text, "upstream chat-completion failed");
            return Err(OrchestratorError::UpstreamStatus { status, body: text });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)?;
        Ok(parsed.into_content())
    }
}

fn resolve_upstream(config: &UpstreamProviderConfig) -> Result<ResolvedUpstream, OrchestratorError> {
    let api_key = config
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|key| !key.trim().is_empty()))
        .ok_or(OrchestratorError::ApiKeyMissing)?;

    let api_key_source = if config
        .api_key
        .as_deref()
        .is_some_and(|key| !key.trim().is_empty())
    {
        "config"
    } else {
        "env"
    };
    debug!(source = api_key_source, "resolved upstream API key");

    let client = Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .build()?;

    Ok(ResolvedUpstream {
        client,
        base_url: config.base_url.clone(),
        api_key,
        referer: config.referer.clone(),
        title: config.title.clone(),
    })
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

impl ChatMessage {
    fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: MessageContent::Text(content.into()),
        }
    }

    fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: MessageContent::Text(content.into()),
        }
    }

    fn user_with_image(text: &str, image_url: &str) -> Self {
        Self {
            role: "user",
            content: MessageContent::Parts(vec![
                ContentPart::Text {
                    text: text.to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image_url.to_string(),
                    },
                },
            ]),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatCompletionChoice>,
}

impl ChatCompletionResponse {
    fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    #[serde(default)]
    message: Option<ChatCompletionMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    #[serde(default)]
    content: Option<String>,
}
