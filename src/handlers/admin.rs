use actix_web::{web, HttpRequest, HttpResponse};
use log::info;
use serde_json::json;

use super::SortParam;
use crate::auth::require_admin;
use crate::catalog::{sort_listings, HotelFilter, Page, PageRequest, SortOrder, YachtFilter};
use crate::error::AppError;
use crate::forms::{validate, BookingStatusForm, HotelForm, UserUpdateForm, YachtForm};
use crate::services::{BookingQuery, DashboardStats, ReviewQuery, UserQuery};
use crate::state::AppState;

fn deleted(what: &str, id: &str) -> HttpResponse {
    info!("Admin deleted {} {}", what, id);
    HttpResponse::Ok().json(json!({ "success": true, "message": format!("{what} deleted successfully") }))
}

pub async fn stats(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let client = require_admin(&req, &state).await?;
    let (hotels, yachts, users, bookings, reviews) = futures::try_join!(
        client.hotels(),
        client.yachts(),
        client.users(),
        client.bookings(),
        client.reviews(),
    )?;
    Ok(HttpResponse::Ok().json(DashboardStats::compute(
        &hotels, &yachts, &users, &bookings, &reviews,
    )))
}

// Hotels

pub async fn list_hotels(
    req: HttpRequest,
    state: web::Data<AppState>,
    filter: web::Query<HotelFilter>,
    sort: web::Query<SortParam>,
    page: web::Query<PageRequest>,
) -> Result<HttpResponse, AppError> {
    let client = require_admin(&req, &state).await?;
    let mut hotels = filter.apply(client.hotels().await?);
    sort_listings(&mut hotels, SortOrder::parse(sort.sort.as_deref()));
    Ok(HttpResponse::Ok().json(Page::from_items(hotels, page.into_inner(), state.config.page_size)))
}

pub async fn create_hotel(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<HotelForm>,
) -> Result<HttpResponse, AppError> {
    let client = require_admin(&req, &state).await?;
    validate(&*form)?;
    let hotel = client.create_hotel(&form).await?;
    info!("Admin created hotel {}", hotel.id);
    Ok(HttpResponse::Created().json(hotel))
}

pub async fn update_hotel(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Json<HotelForm>,
) -> Result<HttpResponse, AppError> {
    let client = require_admin(&req, &state).await?;
    validate(&*form)?;
    let hotel = client.update_hotel(&path, &form).await?;
    Ok(HttpResponse::Ok().json(hotel))
}

pub async fn delete_hotel(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let client = require_admin(&req, &state).await?;
    client.delete_hotel(&path).await?;
    Ok(deleted("Hotel", &path))
}

// Yachts

pub async fn list_yachts(
    req: HttpRequest,
    state: web::Data<AppState>,
    filter: web::Query<YachtFilter>,
    sort: web::Query<SortParam>,
    page: web::Query<PageRequest>,
) -> Result<HttpResponse, AppError> {
    let client = require_admin(&req, &state).await?;
    let mut yachts = filter.apply(client.yachts().await?);
    sort_listings(&mut yachts, SortOrder::parse(sort.sort.as_deref()));
    Ok(HttpResponse::Ok().json(Page::from_items(yachts, page.into_inner(), state.config.page_size)))
}

pub async fn create_yacht(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<YachtForm>,
) -> Result<HttpResponse, AppError> {
    let client = require_admin(&req, &state).await?;
    validate(&*form)?;
    let yacht = client.create_yacht(&form).await?;
    info!("Admin created yacht {}", yacht.id);
    Ok(HttpResponse::Created().json(yacht))
}

pub async fn update_yacht(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Json<YachtForm>,
) -> Result<HttpResponse, AppError> {
    let client = require_admin(&req, &state).await?;
    validate(&*form)?;
    let yacht = client.update_yacht(&path, &form).await?;
    Ok(HttpResponse::Ok().json(yacht))
}

pub async fn delete_yacht(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let client = require_admin(&req, &state).await?;
    client.delete_yacht(&path).await?;
    Ok(deleted("Yacht", &path))
}

// Bookings

pub async fn list_bookings(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<BookingQuery>,
    page: web::Query<PageRequest>,
) -> Result<HttpResponse, AppError> {
    let client = require_admin(&req, &state).await?;
    let bookings = query.apply(client.bookings().await?);
    Ok(HttpResponse::Ok().json(Page::from_items(bookings, page.into_inner(), state.config.page_size)))
}

pub async fn update_booking_status(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Json<BookingStatusForm>,
) -> Result<HttpResponse, AppError> {
    let client = require_admin(&req, &state).await?;
    let booking = client.update_booking_status(&path, form.status).await?;
    info!("Admin set booking {} to {}", booking.id, booking.status);
    Ok(HttpResponse::Ok().json(booking))
}

pub async fn delete_booking(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let client = require_admin(&req, &state).await?;
    client.delete_booking(&path).await?;
    Ok(deleted("Booking", &path))
}

// Users

pub async fn list_users(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
    page: web::Query<PageRequest>,
) -> Result<HttpResponse, AppError> {
    let client = require_admin(&req, &state).await?;
    let users = query.apply(client.users().await?);
    Ok(HttpResponse::Ok().json(Page::from_items(users, page.into_inner(), state.config.page_size)))
}

pub async fn update_user(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Json<UserUpdateForm>,
) -> Result<HttpResponse, AppError> {
    let client = require_admin(&req, &state).await?;
    validate(&*form)?;
    let user = client.update_user(&path, &form).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn delete_user(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let client = require_admin(&req, &state).await?;
    client.delete_user(&path).await?;
    Ok(deleted("User", &path))
}

// Reviews

pub async fn list_reviews(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<ReviewQuery>,
    page: web::Query<PageRequest>,
) -> Result<HttpResponse, AppError> {
    let client = require_admin(&req, &state).await?;
    let reviews = query.apply(client.reviews().await?);
    Ok(HttpResponse::Ok().json(Page::from_items(reviews, page.into_inner(), state.config.page_size)))
}

pub async fn delete_review(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let client = require_admin(&req, &state).await?;
    client.delete_review(&path).await?;
    Ok(deleted("Review", &path))
}
