use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-2xx reply; `message` is the `error` field or the raw body.
    #[error("[Code: {status}] {message}")]
    Status { status: u16, message: String },
    /// 2xx reply that still carried an `error` field.
    #[error("{0}")]
    Function(String),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("question must not be empty")]
    EmptyQuestion,
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_render_with_code_prefix() {
        let error = ClientError::Status {
            status: 429,
            message: "AI service error: slow down".into(),
        };
        assert_eq!(error.to_string(), "[Code: 429] AI service error: slow down");
        assert_eq!(error.status(), Some(429));
        assert_eq!(ClientError::Function("nope".into()).status(), None);
    }
}
