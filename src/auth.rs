use actix_web::{http::header, HttpRequest};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use log::{debug, error};

use crate::error::AppError;
use crate::models::{Claims, Role};
use crate::state::AppState;
use crate::upstream::ApiClient;

/// Token from an `Authorization: Bearer ...` header.
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    let Some(auth_header) = req.headers().get(header::AUTHORIZATION) else {
        debug!("Missing Authorization header");
        return None;
    };

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if token.is_none() {
        debug!("Invalid Authorization header format");
    }
    token.map(String::from)
}

pub fn decode_claims(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
}

fn login_required() -> AppError {
    AppError::Unauthorized("Please log in to continue".to_string())
}

/// Client for a signed-in caller. Only checks that a token is present; the
/// booking API decides whether it is still valid.
pub fn require_user(req: &HttpRequest, state: &AppState) -> Result<ApiClient, AppError> {
    let client = state.client_for(req);
    if client.token().is_set() {
        Ok(client)
    } else {
        Err(login_required())
    }
}

/// Client for an admin caller.
///
/// With `JWT_SECRET` configured the role comes from the verified token;
/// otherwise the booking API is asked who the caller is.
pub async fn require_admin(req: &HttpRequest, state: &AppState) -> Result<ApiClient, AppError> {
    let client = require_user(req, state)?;

    let role = match (&state.config.jwt_secret, client.token().get()) {
        (Some(secret), Some(token)) => match decode_claims(&token, secret) {
            Ok(claims) => {
                debug!("Token decoded successfully for user: {}", claims.sub);
                Role::parse(&claims.role)
            }
            Err(e) => {
                error!("Token decoding failed: {:?}", e);
                return Err(login_required());
            }
        },
        _ => client.me().await?.role,
    };

    if role == Role::Admin {
        Ok(client)
    } else {
        Err(AppError::Forbidden)
    }
}
