use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::{json, Value};
use thiserror::Error;

use crate::forms::FormErrors;

/// Failures talking to the booking API.
#[derive(Error, Debug)]
pub enum ApiClientError {
    #[error("Session expired, please log in again")]
    Unauthorized,

    #[error("Resource not found")]
    NotFound,

    #[error("{message}")]
    Rejected {
        status: u16,
        message: String,
        errors: Option<Value>,
    },

    #[error("Booking service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response from booking service: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiClientError {
    /// Failures where serving fallback data is better than an error page.
    pub fn is_unavailable(&self) -> bool {
        match self {
            ApiClientError::Transport(_) | ApiClientError::Decode(_) => true,
            ApiClientError::Rejected { status, .. } => *status >= 500,
            ApiClientError::Unauthorized | ApiClientError::NotFound => false,
        }
    }
}

/// Errors surfaced to the browser as `{"error": ...}` bodies.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("Admin access required")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("Please correct the highlighted fields")]
    Validation(FormErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Upstream(#[from] ApiClientError),
}

impl From<FormErrors> for AppError {
    fn from(errors: FormErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(e) => match e {
                ApiClientError::Unauthorized => StatusCode::UNAUTHORIZED,
                ApiClientError::NotFound => StatusCode::NOT_FOUND,
                ApiClientError::Rejected { status, .. } => {
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
                }
                ApiClientError::Transport(_) | ApiClientError::Decode(_) => {
                    StatusCode::BAD_GATEWAY
                }
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut body = json!({ "error": self.to_string() });

        match self {
            AppError::Validation(errors) => body["errors"] = json!(errors),
            AppError::Upstream(ApiClientError::Rejected {
                errors: Some(errors),
                ..
            }) => body["errors"] = errors.clone(),
            _ => {}
        }
        // The browser drops its stored token when told to.
        if status == StatusCode::UNAUTHORIZED {
            body["clear_token"] = json!(true);
        }

        HttpResponse::build(status).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: HttpResponse) -> serde_json::Value {
        let bytes = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn unauthorized_responses_ask_the_browser_to_clear_its_token() {
        let response = AppError::Upstream(ApiClientError::Unauthorized).error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_of(response).await;
        assert_eq!(body["clear_token"], true);
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn other_errors_leave_the_token_alone() {
        let body = body_of(AppError::Forbidden.error_response()).await;
        assert!(body.get("clear_token").is_none());
    }

    #[test]
    fn upstream_rejections_keep_their_status() {
        let err = AppError::Upstream(ApiClientError::Rejected {
            status: 409,
            message: "Dates unavailable".into(),
            errors: None,
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "Dates unavailable");
    }

    #[test]
    fn only_outages_trigger_fallback() {
        assert!(!ApiClientError::Unauthorized.is_unavailable());
        assert!(!ApiClientError::NotFound.is_unavailable());
        assert!(ApiClientError::Rejected {
            status: 503,
            message: String::new(),
            errors: None
        }
        .is_unavailable());
    }
}
