pub mod doubt;
pub mod health;
pub mod transcribe;
pub mod translate;
