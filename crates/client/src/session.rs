use eduassist_learning::{Conversation, Grade, Language, Message, Subject, UserSettings};
use tracing::{info, warn};

use crate::{ClientError, FunctionsClient};

pub const DEFAULT_PHOTO_QUESTION: &str = "Explain what is shown in this image step by step.";

/// One student's tutoring session: settings plus the running conversation.
pub struct TutorSession {
    client: FunctionsClient,
    settings: UserSettings,
    conversation: Conversation,
}

impl TutorSession {
    pub fn new(client: FunctionsClient, settings: UserSettings) -> Self {
        Self {
            client,
            settings,
            conversation: Conversation::new(),
        }
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn set_grade(&mut self, grade: Grade) {
        self.settings.grade = grade;
    }

    pub fn set_subject(&mut self, subject: Subject) {
        self.settings.subject = subject;
    }

    pub fn set_language(&mut self, language: Language) {
        self.settings.language = language;
    }

    /// Forgets the conversation; settings are kept.
    pub fn reset(&mut self) {
        self.conversation.clear();
    }

    /// Asks a typed question and returns the tutor's reply once it is part of
    /// the conversation.
    pub async fn ask(&mut self, question: &str) -> Result<&Message, ClientError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ClientError::EmptyQuestion);
        }
        self.exchange(question.to_string(), None).await
    }

    /// Asks about a photo. `image_ref` is an http(s) URL or a data URI.
    pub async fn ask_about_photo(
        &mut self,
        image_ref: &str,
        question: Option<&str>,
    ) -> Result<&Message, ClientError> {
        let question = question
            .map(str::trim)
            .filter(|question| !question.is_empty())
            .unwrap_or(DEFAULT_PHOTO_QUESTION);
        self.exchange(question.to_string(), Some(image_ref.to_string()))
            .await
    }

    async fn exchange(
        &mut self,
        question: String,
        image: Option<String>,
    ) -> Result<&Message, ClientError> {
        let mut user_message = Message::user(question.as_str());
        if let Some(image) = &image {
            user_message = user_message.with_image(image.as_str());
        }
        self.conversation.push(user_message);

        let settings = self.settings;
        info!(
            subject = %settings.subject,
            grade = %settings.grade,
            has_image = image.is_some(),
            "asking tutor"
        );

        let answer = self
            .client
            .ask_doubt(&question, settings.subject, settings.grade, image.as_deref())
            .await?
            .answer;

        let mut reply = Message::assistant(answer.as_str());
        if settings.wants_translation() {
            match self.client.translate_text(&answer, settings.language).await {
                Ok(translation) if !translation.translated_text.trim().is_empty() => {
                    reply = reply.with_translation(translation.translated_text);
                }
                Ok(_) => warn!(language = %settings.language, "translation came back empty"),
                Err(error) => warn!(%error, language = %settings.language, "translation failed"),
            }
        }

        Ok(self.conversation.push(reply))
    }
}
