use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::state::AppState;

pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "upstream": state.config.api_url,
        "mock_fallback": state.config.mock_fallback,
    }))
}
