use actix_web::{web, HttpRequest, HttpResponse};

use super::{SortParam, DATA_SOURCE_HEADER};
use crate::catalog::{sort_listings, Page, PageRequest, SortOrder, YachtFilter};
use crate::error::{ApiClientError, AppError};
use crate::models::ListingKind;
use crate::services::listings;
use crate::state::AppState;

pub async fn list_yachts(
    req: HttpRequest,
    state: web::Data<AppState>,
    filter: web::Query<YachtFilter>,
    sort: web::Query<SortParam>,
    page: web::Query<PageRequest>,
) -> Result<HttpResponse, AppError> {
    let client = state.client_for(&req);
    let loaded = listings::load_yachts(&client, state.config.mock_fallback).await?;

    let mut yachts = filter.apply(loaded.data);
    sort_listings(&mut yachts, SortOrder::parse(sort.sort.as_deref()));
    let page = Page::from_items(yachts, page.into_inner(), state.config.page_size);

    Ok(HttpResponse::Ok()
        .insert_header((DATA_SOURCE_HEADER, loaded.source.as_str()))
        .json(page))
}

pub async fn get_yacht(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let client = state.client_for(&req);

    match listings::load_yacht(&client, &id, state.config.mock_fallback).await {
        Ok(loaded) => Ok(HttpResponse::Ok()
            .insert_header((DATA_SOURCE_HEADER, loaded.source.as_str()))
            .json(loaded.data)),
        Err(ApiClientError::NotFound) => Err(AppError::NotFound(format!("Yacht {id} not found"))),
        Err(e) => Err(e.into()),
    }
}

pub async fn yacht_reviews(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let client = state.client_for(&req);
    let loaded =
        listings::load_reviews(&client, ListingKind::Yacht, &id, state.config.mock_fallback).await?;

    Ok(HttpResponse::Ok()
        .insert_header((DATA_SOURCE_HEADER, loaded.source.as_str()))
        .json(loaded.data))
}
