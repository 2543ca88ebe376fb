mod errors;
mod grade;
mod language;
mod settings;
mod subject;

pub use errors::ParseError;
pub use grade::Grade;
pub use language::Language;
pub use settings::UserSettings;
pub use subject::Subject;
