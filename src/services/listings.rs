//! Catalogue reads with the mock fallback.

use log::warn;
use serde::Serialize;

use crate::error::ApiClientError;
use crate::mock;
use crate::models::{Hotel, ListingKind, Review, Yacht};
use crate::upstream::ApiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Mock,
}

impl DataSource {
    pub fn as_str(self) -> &'static str {
        match self {
            DataSource::Live => "live",
            DataSource::Mock => "mock",
        }
    }
}

#[derive(Debug)]
pub struct Loaded<T> {
    pub data: T,
    pub source: DataSource,
}

impl<T> Loaded<T> {
    fn live(data: T) -> Self {
        Self {
            data,
            source: DataSource::Live,
        }
    }

    fn mock(data: T) -> Self {
        Self {
            data,
            source: DataSource::Mock,
        }
    }
}

/// Use the live result, or `fallback()` when the API is down and fallback is
/// allowed. Auth and not-found answers are never masked.
fn or_fallback<T>(
    what: &str,
    result: Result<T, ApiClientError>,
    allow: bool,
    fallback: impl FnOnce() -> Option<T>,
) -> Result<Loaded<T>, ApiClientError> {
    match result {
        Ok(data) => Ok(Loaded::live(data)),
        Err(e) if allow && e.is_unavailable() => match fallback() {
            Some(data) => {
                warn!("Serving mock {what}: {e}");
                Ok(Loaded::mock(data))
            }
            None => Err(e),
        },
        Err(e) => Err(e),
    }
}

pub async fn load_hotels(client: &ApiClient, allow_mock: bool) -> Result<Loaded<Vec<Hotel>>, ApiClientError> {
    or_fallback("hotels", client.hotels().await, allow_mock, || Some(mock::hotels()))
}

pub async fn load_hotel(client: &ApiClient, id: &str, allow_mock: bool) -> Result<Loaded<Hotel>, ApiClientError> {
    or_fallback("hotel", client.hotel(id).await, allow_mock, || mock::hotel_by_id(id))
}

pub async fn load_yachts(client: &ApiClient, allow_mock: bool) -> Result<Loaded<Vec<Yacht>>, ApiClientError> {
    or_fallback("yachts", client.yachts().await, allow_mock, || Some(mock::yachts()))
}

pub async fn load_yacht(client: &ApiClient, id: &str, allow_mock: bool) -> Result<Loaded<Yacht>, ApiClientError> {
    or_fallback("yacht", client.yacht(id).await, allow_mock, || mock::yacht_by_id(id))
}

pub async fn load_reviews(
    client: &ApiClient,
    kind: ListingKind,
    id: &str,
    allow_mock: bool,
) -> Result<Loaded<Vec<Review>>, ApiClientError> {
    let mut loaded = or_fallback("reviews", client.reviews_for(kind, id).await, allow_mock, || {
        Some(mock::reviews_for(kind, id))
    })?;
    loaded.data.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(loaded)
}

/// Nightly or daily price of a listing, for quoting.
pub async fn unit_price(
    client: &ApiClient,
    kind: ListingKind,
    id: &str,
    allow_mock: bool,
) -> Result<f64, ApiClientError> {
    Ok(match kind {
        ListingKind::Hotel => load_hotel(client, id, allow_mock).await?.data.price_per_night,
        ListingKind::Yacht => load_yacht(client, id, allow_mock).await?.data.price_per_day,
    })
}
