use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use log::info;
use serde_json::json;

use crate::auth::require_user;
use crate::error::{ApiClientError, AppError};
use crate::forms::BookingForm;
use crate::models::BookingQuote;
use crate::services::listings;
use crate::state::AppState;
use crate::upstream::ApiClient;

async fn quote_for(
    client: &ApiClient,
    state: &AppState,
    form: &BookingForm,
) -> Result<BookingQuote, AppError> {
    form.check(Utc::now().date_naive())?;

    let unit_price = match listings::unit_price(
        client,
        form.bookable_type,
        &form.bookable_id,
        state.config.mock_fallback,
    )
    .await
    {
        Ok(price) => price,
        Err(ApiClientError::NotFound) => {
            return Err(AppError::NotFound(format!(
                "{} {} not found",
                form.bookable_type, form.bookable_id
            )))
        }
        Err(e) => return Err(e.into()),
    };

    Ok(BookingQuote::for_stay(
        form.bookable_type,
        unit_price,
        form.check_in,
        form.check_out,
    ))
}

/// Price a stay without booking it.
pub async fn quote_booking(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<BookingForm>,
) -> Result<HttpResponse, AppError> {
    let client = state.client_for(&req);
    let quote = quote_for(&client, &state, &form).await?;
    Ok(HttpResponse::Ok().json(quote))
}

pub async fn create_booking(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<BookingForm>,
) -> Result<HttpResponse, AppError> {
    let client = require_user(&req, &state)?;
    let quote = quote_for(&client, &state, &form).await?;
    let booking = client.create_booking(&form, &quote).await?;
    Ok(HttpResponse::Created().json(booking))
}

pub async fn get_user_bookings(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let client = require_user(&req, &state)?;
    let mut bookings = client.my_bookings().await?;
    bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(HttpResponse::Ok().json(bookings))
}

pub async fn cancel_booking(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let booking_id = path.into_inner();
    let client = require_user(&req, &state)?;

    match client.cancel_booking(&booking_id).await {
        Ok(()) => {
            info!("Booking {} cancelled", booking_id);
            Ok(HttpResponse::Ok().json(json!({ "success": true, "message": "Booking cancelled successfully" })))
        }
        Err(ApiClientError::NotFound) => Err(AppError::NotFound("Booking not found".to_string())),
        Err(e) => Err(e.into()),
    }
}
