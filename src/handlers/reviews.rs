use actix_web::{web, HttpRequest, HttpResponse};

use crate::auth::require_user;
use crate::error::AppError;
use crate::forms::{validate, ReviewForm};
use crate::state::AppState;

pub async fn create_review(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<ReviewForm>,
) -> Result<HttpResponse, AppError> {
    let client = require_user(&req, &state)?;
    validate(&*form)?;
    let review = client.create_review(&form).await?;
    Ok(HttpResponse::Created().json(review))
}
