//! Parse errors for the student-selected enumerations.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("grade must be a number from 1 to 12 or \"college\", got {0}")]
    InvalidGrade(String),

    #[error("unknown subject {0:?}, expected math, science or computer")]
    UnknownSubject(String),

    #[error("unknown language {0:?}, expected english or telugu")]
    UnknownLanguage(String),
}
