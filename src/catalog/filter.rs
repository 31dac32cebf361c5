use serde::Deserialize;

use crate::models::{de, Hotel, Yacht};

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

/// Non-blank filter value, trimmed.
fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Comma separated amenity list from the query string.
fn wanted_amenities(raw: &Option<String>) -> Vec<String> {
    raw.as_deref()
        .unwrap_or_default()
        .split(',')
        .map(|a| a.trim().to_lowercase())
        .filter(|a| !a.is_empty())
        .collect()
}

fn has_all_amenities(have: &[String], wanted: &[String]) -> bool {
    wanted
        .iter()
        .all(|w| have.iter().any(|h| h.to_lowercase() == *w))
}

fn in_price_range(price: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.map_or(true, |min| price >= min) && max.map_or(true, |max| price <= max)
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct HotelFilter {
    pub city: Option<String>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "de::query_opt")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "de::query_opt")]
    pub max_price: Option<f64>,
    #[serde(default, deserialize_with = "de::query_opt")]
    pub min_rating: Option<f32>,
    #[serde(default, deserialize_with = "de::query_opt")]
    pub stars: Option<u8>,
    pub amenities: Option<String>,
    #[serde(default, deserialize_with = "de::query_opt")]
    pub guests: Option<u32>,
    #[serde(default, deserialize_with = "de::query_flag")]
    pub available_only: Option<bool>,
}

impl HotelFilter {
    pub fn matches(&self, hotel: &Hotel) -> bool {
        let amenities = wanted_amenities(&self.amenities);
        self.matches_with(hotel, &amenities)
    }

    fn matches_with(&self, hotel: &Hotel, amenities: &[String]) -> bool {
        if let Some(city) = active(&self.city) {
            if !contains_ci(&hotel.city, city) {
                return false;
            }
        }
        if let Some(term) = active(&self.search) {
            if !(contains_ci(&hotel.name, term)
                || contains_ci(&hotel.city, term)
                || contains_ci(&hotel.description, term))
            {
                return false;
            }
        }
        if !in_price_range(hotel.price_per_night, self.min_price, self.max_price) {
            return false;
        }
        if self.min_rating.is_some_and(|min| hotel.rating < min) {
            return false;
        }
        if let Some(stars) = self.stars {
            if hotel.stars != Some(stars) {
                return false;
            }
        }
        if let (Some(guests), Some(max)) = (self.guests, hotel.max_guests) {
            if guests > max {
                return false;
            }
        }
        if self.available_only == Some(true) && !hotel.available {
            return false;
        }
        has_all_amenities(&hotel.amenities, amenities)
    }

    pub fn apply(&self, hotels: Vec<Hotel>) -> Vec<Hotel> {
        let amenities = wanted_amenities(&self.amenities);
        hotels
            .into_iter()
            .filter(|h| self.matches_with(h, &amenities))
            .collect()
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct YachtFilter {
    pub location: Option<String>,
    pub search: Option<String>,
    pub yacht_type: Option<String>,
    #[serde(default, deserialize_with = "de::query_opt")]
    pub min_capacity: Option<u32>,
    #[serde(default, deserialize_with = "de::query_opt")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "de::query_opt")]
    pub max_price: Option<f64>,
    #[serde(default, deserialize_with = "de::query_opt")]
    pub min_rating: Option<f32>,
    pub amenities: Option<String>,
    #[serde(default, deserialize_with = "de::query_flag")]
    pub available_only: Option<bool>,
}

impl YachtFilter {
    pub fn matches(&self, yacht: &Yacht) -> bool {
        let amenities = wanted_amenities(&self.amenities);
        self.matches_with(yacht, &amenities)
    }

    fn matches_with(&self, yacht: &Yacht, amenities: &[String]) -> bool {
        if let Some(location) = active(&self.location) {
            if !contains_ci(&yacht.location, location) {
                return false;
            }
        }
        if let Some(term) = active(&self.search) {
            if !(contains_ci(&yacht.name, term)
                || contains_ci(&yacht.location, term)
                || contains_ci(&yacht.description, term))
            {
                return false;
            }
        }
        if let Some(kind) = active(&self.yacht_type) {
            match &yacht.yacht_type {
                Some(t) if t.eq_ignore_ascii_case(kind) => {}
                _ => return false,
            }
        }
        if self.min_capacity.is_some_and(|min| yacht.capacity < min) {
            return false;
        }
        if !in_price_range(yacht.price_per_day, self.min_price, self.max_price) {
            return false;
        }
        if self.min_rating.is_some_and(|min| yacht.rating < min) {
            return false;
        }
        if self.available_only == Some(true) && !yacht.available {
            return false;
        }
        has_all_amenities(&yacht.amenities, amenities)
    }

    pub fn apply(&self, yachts: Vec<Yacht>) -> Vec<Yacht> {
        let amenities = wanted_amenities(&self.amenities);
        yachts
            .into_iter()
            .filter(|y| self.matches_with(y, &amenities))
            .collect()
    }
}
