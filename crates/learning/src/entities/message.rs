use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message role enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One entry of a tutoring session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Random UUID
    pub id: String,
    pub role: Role,
    /// Text content, Markdown for assistant replies
    pub content: String,
    /// Reference (URL or data URI) to a photo the student attached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    /// Translation of `content`, when one was requested and succeeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_content: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            image_uri: None,
            translated_content: None,
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn with_image(mut self, image_uri: impl Into<String>) -> Self {
        self.image_uri = Some(image_uri.into());
        self
    }

    pub fn with_translation(mut self, translated: impl Into<String>) -> Self {
        self.translated_content = Some(translated.into());
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Content to show: the translation when asked for and present, the
    /// original otherwise.
    pub fn display_content(&self, prefer_translation: bool) -> &str {
        match (&self.translated_content, prefer_translation) {
            (Some(translated), true) => translated,
            _ => &self.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_get_distinct_ids() {
        let first = Message::user("What is a prime number?");
        let second = Message::user("What is a prime number?");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn display_content_falls_back_to_original() {
        let message = Message::assistant("**Photosynthesis** is...");
        assert_eq!(message.display_content(true), "**Photosynthesis** is...");

        let message = message.with_translation("**కిరణజన్య సంయోగక్రియ**...");
        assert_eq!(message.display_content(true), "**కిరణజన్య సంయోగక్రియ**...");
        assert_eq!(message.display_content(false), "**Photosynthesis** is...");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let message = Message::user("formula").with_image("file:///tmp/formula.jpg");
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["role"], "user");
        assert_eq!(value["imageUri"], "file:///tmp/formula.jpg");
        assert!(value.get("translatedContent").is_none());
    }
}
