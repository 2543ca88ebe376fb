use serde::{Deserialize, Serialize};

use super::{Grade, Language, Subject};

/// What the student has picked in the selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserSettings {
    pub grade: Grade,
    pub subject: Subject,
    /// Language answers are translated into. English means no translation.
    pub language: Language,
}

impl UserSettings {
    pub fn new(grade: Grade, subject: Subject, language: Language) -> Self {
        Self {
            grade,
            subject,
            language,
        }
    }

    pub fn wants_translation(&self) -> bool {
        self.language != Language::English
    }
}
