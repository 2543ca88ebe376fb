use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use eduassist_learning::Grade;
use eduassist_orchestrator::DoubtPrompt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use utoipa::ToSchema;

use crate::{
    util::{is_blank, present},
    ApiError, AppState,
};

pub const MISSING_FIELDS: &str = "Missing required fields: question, subject, grade";
const SERVICE: &str = "AI service error";

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoubtRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    /// A number from 1 to 12, or `"college"`.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub grade: Option<Value>,
    /// Photo of the problem as an http(s) URL or data URI.
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DoubtResponse {
    pub answer: String,
}

impl DoubtRequest {
    fn into_prompt(self) -> Result<DoubtPrompt, ApiError> {
        let question = present(self.question.as_deref());
        let subject = present(self.subject.as_deref());
        let grade = self.grade.filter(|value| !is_blank(value));

        let (Some(question), Some(subject), Some(grade)) = (question, subject, grade) else {
            return Err(ApiError::bad_request(MISSING_FIELDS));
        };

        let grade: Grade = serde_json::from_value(grade)
            .map_err(|error| ApiError::bad_request(format!("Invalid grade: {error}")))?;

        let mut prompt = DoubtPrompt::new(question, subject, grade);
        if let Some(image_url) = present(self.image_url.as_deref()) {
            prompt = prompt.with_image(image_url);
        }
        Ok(prompt)
    }
}

#[utoipa::path(
    post,
    path = "/api/doubt-answer",
    tag = "Doubts",
    request_body = DoubtRequest,
    responses(
        (status = 200, description = "Tutor answer in Markdown", body = DoubtResponse),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ErrorResponse),
        (status = 401, description = "Access token rejected", body = crate::error::ErrorResponse),
        (status = 500, description = "Unexpected failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn answer_doubt(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<DoubtRequest>, JsonRejection>,
) -> Result<Json<DoubtResponse>, ApiError> {
    state.authorize(&headers)?;
    let Json(payload) = payload?;
    let prompt = payload.into_prompt()?;

    info!(
        subject = %prompt.subject,
        grade = %prompt.grade,
        has_image = prompt.image_url.is_some(),
        "answering doubt"
    );

    let answer = state
        .orchestrator()
        .answer_doubt(&prompt)
        .await
        .map_err(|error| ApiError::upstream(SERVICE, error))?;

    Ok(Json(DoubtResponse { answer }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: Value) -> DoubtRequest {
        serde_json::from_value(value).expect("valid request shape")
    }

    #[test]
    fn builds_prompt_from_complete_request() {
        let prompt = request(json!({
            "question": " What is gravity? ",
            "subject": "science",
            "grade": "college",
            "imageUrl": "https://img.test/apple.png"
        }))
        .into_prompt()
        .expect("prompt");

        assert_eq!(prompt.question, "What is gravity?");
        assert_eq!(prompt.grade, Grade::College);
        assert_eq!(prompt.image_url.as_deref(), Some("https://img.test/apple.png"));
    }

    #[test]
    fn blank_fields_count_as_missing() {
        for body in [
            json!({"subject": "math", "grade": 3}),
            json!({"question": "  ", "subject": "math", "grade": 3}),
            json!({"question": "q", "grade": 3}),
            json!({"question": "q", "subject": "math", "grade": 0}),
            json!({"question": "q", "subject": "math", "grade": null}),
        ] {
            let error = request(body).into_prompt().expect_err("missing field");
            assert_eq!(error.message, MISSING_FIELDS);
        }
    }

    #[test]
    fn out_of_range_grade_is_rejected() {
        let error = request(json!({"question": "q", "subject": "math", "grade": 14}))
            .into_prompt()
            .expect_err("grade 14 is invalid");
        assert!(error.message.starts_with("Invalid grade"));
    }
}
