use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health_check,
        crate::routes::doubt::answer_doubt,
        crate::routes::translate::translate_text,
        crate::routes::transcribe::transcribe_audio
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            crate::routes::health::HealthResponse,
            crate::routes::doubt::DoubtRequest,
            crate::routes::doubt::DoubtResponse,
            crate::routes::translate::TranslateRequest,
            crate::routes::translate::TranslateResponse,
            crate::routes::transcribe::TranscribeRequest,
            crate::routes::transcribe::TranscribeResponse
        )
    ),
    tags(
        (name = "Health", description = "Service health endpoints"),
        (name = "Doubts", description = "AI explanations for student questions"),
        (name = "Translation", description = "Answer translation"),
        (name = "Transcription", description = "Voice question transcription")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        let schemes = &mut components.security_schemes;

        let mut scheme = SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer));
        if let SecurityScheme::Http(http) = &mut scheme {
            http.bearer_format = Some("Bearer".to_string());
        }

        schemes.insert("bearerAuth".to_string(), scheme);
    }
}
