use log::{debug, error, warn};
use reqwest::{header, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;

use super::envelope::error_message;
use super::token::TokenStore;
use crate::error::ApiClientError;

/// HTTP client for the booking API.
///
/// Injects the bearer token on every request and clears it when the API
/// answers 401, mirroring what the browser does with its stored token.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: TokenStore,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, base_url: &str, token: TokenStore) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn token(&self) -> &TokenStore {
        &self.token
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, self.url(path))
            .header(header::ACCEPT, "application/json");
        if let Some(token) = self.token.get() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Value, ApiClientError> {
        let response = builder.send().await.map_err(|e| {
            error!("Booking API request failed: {}", e);
            e
        })?;
        let status = response.status();
        let url = response.url().path().to_string();
        let bytes = response.bytes().await?;

        debug!("{} {} ({} bytes)", status.as_u16(), url, bytes.len());

        let body: Value = if bytes.is_empty() {
            Value::Null
        } else if status.is_success() {
            serde_json::from_slice(&bytes)?
        } else {
            // Error pages are not always JSON.
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        if status.is_success() {
            return Ok(body);
        }

        match status {
            StatusCode::UNAUTHORIZED => {
                warn!("Booking API rejected the token for {}, clearing it", url);
                self.token.clear();
                Err(ApiClientError::Unauthorized)
            }
            StatusCode::NOT_FOUND => Err(ApiClientError::NotFound),
            _ => {
                let message = error_message(&body).unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                });
                warn!("Booking API answered {} for {}: {}", status.as_u16(), url, message);
                Err(ApiClientError::Rejected {
                    status: status.as_u16(),
                    message,
                    errors: body.get("errors").cloned(),
                })
            }
        }
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiClientError> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiClientError> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiClientError> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiClientError> {
        self.send(self.request(Method::PATCH, path).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiClientError> {
        self.send(self.request(Method::DELETE, path)).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(
            reqwest::Client::new(),
            "http://localhost:8000/api/",
            TokenStore::new(Some("tok".into())),
        )
    }

    #[test]
    fn urls_join_without_double_slashes() {
        let client = client();
        assert_eq!(client.url("/hotels"), "http://localhost:8000/api/hotels");
        assert_eq!(client.url("hotels/1"), "http://localhost:8000/api/hotels/1");
    }

    #[test]
    fn requests_carry_the_bearer_token() {
        let request = client().request(Method::GET, "/user").build().unwrap();
        assert_eq!(
            request.headers().get(header::AUTHORIZATION).unwrap(),
            "Bearer tok"
        );
        assert_eq!(request.headers().get(header::ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn anonymous_requests_have_no_authorization_header() {
        let client = ApiClient::new(reqwest::Client::new(), "http://localhost", TokenStore::default());
        let request = client.request(Method::GET, "/hotels").build().unwrap();
        assert!(request.headers().get(header::AUTHORIZATION).is_none());
    }

    /// Stand-in booking API answering each path with a fixed error.
    fn spawn_api() -> String {
        use actix_web::{web, App, HttpResponse, HttpServer};
        use serde_json::json;

        let server = HttpServer::new(|| {
            App::new()
                .route(
                    "/user",
                    web::get().to(|| async {
                        HttpResponse::Unauthorized().json(json!({ "message": "Unauthenticated." }))
                    }),
                )
                .route("/hotels/404", web::get().to(|| async { HttpResponse::NotFound().finish() }))
                .route(
                    "/bookings",
                    web::post().to(|| async {
                        HttpResponse::UnprocessableEntity().json(json!({
                            "message": "The selected dates are not available.",
                            "errors": { "check_in": ["Already booked"] }
                        }))
                    }),
                )
                .route(
                    "/broken",
                    web::get().to(|| async { HttpResponse::InternalServerError().body("<html>oops</html>") }),
                )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{}", addr)
    }

    fn client_for(base: &str) -> ApiClient {
        ApiClient::new(reqwest::Client::new(), base, TokenStore::new(Some("tok".into())))
    }

    #[actix_web::test]
    async fn rejected_token_is_cleared() {
        let client = client_for(&spawn_api());
        assert!(client.token().is_set());

        let err = client.get("/user").await.unwrap_err();
        assert!(matches!(err, ApiClientError::Unauthorized));
        assert!(!client.token().is_set());

        // Clones share the store, as the per-request handlers do.
        assert!(!client.clone().token().is_set());
    }

    #[actix_web::test]
    async fn missing_records_are_not_found() {
        let client = client_for(&spawn_api());
        let err = client.get("/hotels/404").await.unwrap_err();
        assert!(matches!(err, ApiClientError::NotFound));
        assert!(!err.is_unavailable());
        assert!(client.token().is_set());
    }

    #[actix_web::test]
    async fn validation_failures_carry_message_and_field_errors() {
        let client = client_for(&spawn_api());
        let err = client.post("/bookings", &serde_json::json!({})).await.unwrap_err();
        match err {
            ApiClientError::Rejected { status, message, errors } => {
                assert_eq!(status, 422);
                assert_eq!(message, "The selected dates are not available.");
                assert_eq!(errors.unwrap()["check_in"][0], "Already booked");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn server_errors_with_html_bodies_count_as_outages() {
        let client = client_for(&spawn_api());
        let err = client.get("/broken").await.unwrap_err();
        match &err {
            ApiClientError::Rejected { status, message, errors } => {
                assert_eq!(*status, 500);
                assert_eq!(message, "Internal Server Error");
                assert!(errors.is_none());
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.is_unavailable());
    }

    #[actix_web::test]
    async fn unreachable_service_is_a_transport_error() {
        let client = ApiClient::new(reqwest::Client::new(), "http://127.0.0.1:9", TokenStore::default());
        let err = client.get("/hotels").await.unwrap_err();
        assert!(matches!(err, ApiClientError::Transport(_)));
        assert!(err.is_unavailable());
    }
}
