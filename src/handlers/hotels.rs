use actix_web::{web, HttpRequest, HttpResponse};

use super::{SortParam, DATA_SOURCE_HEADER};
use crate::catalog::{sort_listings, HotelFilter, Page, PageRequest, SortOrder};
use crate::error::AppError;
use crate::models::ListingKind;
use crate::services::listings;
use crate::state::AppState;

pub async fn list_hotels(
    req: HttpRequest,
    state: web::Data<AppState>,
    filter: web::Query<HotelFilter>,
    sort: web::Query<SortParam>,
    page: web::Query<PageRequest>,
) -> Result<HttpResponse, AppError> {
    let client = state.client_for(&req);
    let loaded = listings::load_hotels(&client, state.config.mock_fallback).await?;

    let mut hotels = filter.apply(loaded.data);
    sort_listings(&mut hotels, SortOrder::parse(sort.sort.as_deref()));
    let page = Page::from_items(hotels, page.into_inner(), state.config.page_size);

    Ok(HttpResponse::Ok()
        .insert_header((DATA_SOURCE_HEADER, loaded.source.as_str()))
        .json(page))
}

pub async fn get_hotel(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let client = state.client_for(&req);

    match listings::load_hotel(&client, &id, state.config.mock_fallback).await {
        Ok(loaded) => Ok(HttpResponse::Ok()
            .insert_header((DATA_SOURCE_HEADER, loaded.source.as_str()))
            .json(loaded.data)),
        Err(crate::error::ApiClientError::NotFound) => {
            Err(AppError::NotFound(format!("Hotel {id} not found")))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn hotel_reviews(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let client = state.client_for(&req);
    let loaded =
        listings::load_reviews(&client, ListingKind::Hotel, &id, state.config.mock_fallback).await?;

    Ok(HttpResponse::Ok()
        .insert_header((DATA_SOURCE_HEADER, loaded.source.as_str()))
        .json(loaded.data))
}
