//! # EduAssist Learning Crate
//!
//! Value types shared by the relay and its clients: the grade, subject and
//! language a student picks, and the chat messages of a tutoring session.
//!
//! - **Entities**: `Message` and the in-memory `Conversation`
//! - **Types**: `Grade`, `Subject`, `Language`, `UserSettings` and parse errors

pub mod entities;
pub mod types;

pub use entities::{Conversation, Message, Role};
pub use types::{Grade, Language, ParseError, Subject, UserSettings};
