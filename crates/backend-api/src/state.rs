use std::sync::Arc;

use axum::http::HeaderMap;
use eduassist_config::HttpConfig;
use eduassist_orchestrator::Orchestrator;

use crate::{util::require_bearer, ApiError};

#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<Orchestrator>,
    access_token: Option<Arc<str>>,
    max_body_bytes: usize,
}

impl AppState {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            orchestrator,
            access_token: None,
            max_body_bytes: HttpConfig::DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_access_token(orchestrator: Arc<Orchestrator>, access_token: Option<String>) -> Self {
        Self {
            orchestrator,
            access_token: access_token.map(Arc::from),
            max_body_bytes: HttpConfig::DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Checks the bearer token when the relay is configured with one.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), ApiError> {
        let Some(expected) = self.access_token.as_deref() else {
            return Ok(());
        };

        let token = require_bearer(headers)?;
        if token != expected {
            return Err(ApiError::unauthorized("invalid access token"));
        }
        Ok(())
    }
}
