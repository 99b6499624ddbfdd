//! POST /chat — runs the safety/formatting pipeline for one question.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chat_pipeline::ChatResult;
use tracing::instrument;

use crate::{
    core::app_state::AppState, error_handler::AppError, routes::chat::chat_request::ChatRequest,
};

/// Handler: POST /chat
///
/// Malformed JSON and empty/whitespace-only questions are rejected with
/// 400 before the pipeline runs. Everything past that point answers 200,
/// including the apology outcome for a failed generation, which is carried
/// inside the body (`success=false`), not as a transport error.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/chat \
///   -H 'content-type: application/json' \
///   -d '{"question":"What are the symptoms of PCOS?"}'
/// ```
#[instrument(name = "chat_route", skip(state, body))]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResult>, AppError> {
    let Json(body) = body?;
    validate_question(&body.question)?;

    let result = chat_pipeline::respond(state.llm.as_ref(), &body.question).await;
    Ok(Json(result))
}

/// Boundary validation: the pipeline itself never sees an empty question.
fn validate_question(question: &str) -> Result<(), AppError> {
    if question.trim().is_empty() {
        return Err(AppError::BadRequest("question cannot be empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_whitespace_questions() {
        assert!(validate_question("").is_err());
        assert!(validate_question("   \n\t ").is_err());
    }

    #[test]
    fn accepts_non_empty_question() {
        assert!(validate_question("What are the symptoms of PCOS?").is_ok());
    }

    #[tokio::test]
    async fn malformed_json_becomes_bad_request() {
        use axum::body::Body;
        use axum::extract::FromRequest;
        use axum::http::{Request, StatusCode, header};
        use axum::response::IntoResponse;

        let req = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"question":"#))
            .unwrap();

        let rejection = Json::<ChatRequest>::from_request(req, &())
            .await
            .unwrap_err();

        // The rejection converts into the JSON error envelope, not axum's
        // default plain-text response.
        let resp = AppError::from(rejection).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
