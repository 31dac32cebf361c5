use std::time::Duration;

use actix_web::HttpRequest;

use crate::auth::bearer_token;
use crate::config::Config;
use crate::upstream::{ApiClient, TokenStore};

pub struct AppState {
    pub config: Config,
    http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { config, http })
    }

    /// Client acting on behalf of the caller, carrying their bearer token.
    pub fn client_for(&self, req: &HttpRequest) -> ApiClient {
        self.client_with(TokenStore::new(bearer_token(req)))
    }

    pub fn client_with(&self, token: TokenStore) -> ApiClient {
        ApiClient::new(self.http.clone(), &self.config.api_url, token)
    }
}
