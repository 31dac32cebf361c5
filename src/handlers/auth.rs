use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::auth::require_user;
use crate::error::AppError;
use crate::forms::{validate, LoginForm, ProfileForm, RegisterForm};
use crate::state::AppState;
use crate::upstream::TokenStore;

pub async fn register(
    state: web::Data<AppState>,
    form: web::Json<RegisterForm>,
) -> Result<HttpResponse, AppError> {
    validate(&*form)?;
    let client = state.client_with(TokenStore::default());
    let session = client.register(&form).await?;
    Ok(HttpResponse::Ok().json(session))
}

pub async fn login(
    state: web::Data<AppState>,
    form: web::Json<LoginForm>,
) -> Result<HttpResponse, AppError> {
    validate(&*form)?;
    let client = state.client_with(TokenStore::default());
    match client.login(&form).await {
        Ok(session) => Ok(HttpResponse::Ok().json(session)),
        // A 401 here means bad credentials, not an expired session.
        Err(crate::error::ApiClientError::Unauthorized) => {
            Err(AppError::Unauthorized("Invalid credentials".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Always succeeds; the browser forgets its token regardless.
pub async fn logout(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let client = state.client_for(&req);
    if client.token().is_set() {
        // Failure is already logged by the client.
        let _ = client.logout().await;
    }
    HttpResponse::Ok().json(json!({ "success": true, "clear_token": true }))
}

pub async fn me(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let client = require_user(&req, &state)?;
    let user = client.me().await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn update_profile(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<ProfileForm>,
) -> Result<HttpResponse, AppError> {
    let client = require_user(&req, &state)?;
    validate(&*form)?;
    let user = client.update_profile(&form).await?;
    Ok(HttpResponse::Ok().json(user))
}
