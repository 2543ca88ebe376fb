//! # EduAssist Client
//!
//! Talks to the relay functions and drives a tutoring session:
//!
//! - [`FunctionsClient`]: one method per relay function, JSON in and typed
//!   results (or a readable error) out
//! - [`TutorSession`]: the ask → answer → translate chain over an in-memory
//!   conversation
//! - [`markdown`]: turns tutor answers into blocks for terminal output

mod error;
mod functions;
pub mod markdown;
mod session;

pub use error::ClientError;
pub use functions::{DoubtAnswer, FunctionsClient, Transcription, Translation, DEFAULT_TIMEOUT};
pub use session::{TutorSession, DEFAULT_PHOTO_QUESTION};
