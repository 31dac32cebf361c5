pub mod admin;
pub mod auth;
pub mod bookings;
pub mod health;
pub mod hotels;
pub mod reviews;
pub mod yachts;

use serde::Deserialize;

/// Tells the browser whether it is looking at live or fallback data.
pub const DATA_SOURCE_HEADER: &str = "X-Data-Source";

#[derive(Debug, Default, Deserialize)]
pub struct SortParam {
    pub sort: Option<String>,
}
