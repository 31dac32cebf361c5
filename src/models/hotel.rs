use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{clamp_rating, de, Listing};

/// Hotel record as the booking API sends it. Every field is optional and
/// several have more than one name depending on which endpoint answered.
#[derive(Deserialize, Default, Debug)]
pub struct RawHotel {
    #[serde(default, deserialize_with = "de::opt_id")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, deserialize_with = "de::opt_id")]
    pub object_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub price_per_night: Option<f64>,
    #[serde(rename = "pricePerNight", default, deserialize_with = "de::opt_f64")]
    pub price_per_night_camel: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_u32")]
    pub stars: Option<u32>,
    #[serde(default, deserialize_with = "de::string_list")]
    pub amenities: Vec<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "de::string_list")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "de::opt_bool")]
    pub available: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_bool")]
    pub is_available: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_u32")]
    pub available_rooms: Option<u32>,
    #[serde(default, deserialize_with = "de::opt_u32")]
    pub max_guests: Option<u32>,
    #[serde(default, deserialize_with = "de::opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub city: String,
    pub country: Option<String>,
    pub address: Option<String>,
    pub description: String,
    pub price_per_night: f64,
    pub rating: f32,
    pub stars: Option<u8>,
    pub amenities: Vec<String>,
    pub image: Option<String>,
    pub available: bool,
    pub max_guests: Option<u32>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<RawHotel> for Hotel {
    fn from(raw: RawHotel) -> Self {
        let city = raw.city.clone().or_else(|| {
            raw.location
                .as_deref()
                .and_then(|l| l.split(',').next())
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
        });
        let available = raw
            .available
            .or(raw.is_available)
            .or(raw.available_rooms.map(|rooms| rooms > 0))
            .unwrap_or(true);

        Self {
            id: raw.id.or(raw.object_id).unwrap_or_default(),
            name: raw
                .name
                .or(raw.title)
                .unwrap_or_else(|| "Unnamed hotel".to_string()),
            city: city.unwrap_or_default(),
            country: raw.country,
            address: raw.address.or(raw.location),
            description: raw.description.unwrap_or_default(),
            price_per_night: raw
                .price_per_night
                .or(raw.price_per_night_camel)
                .or(raw.price)
                .unwrap_or(0.0)
                .max(0.0),
            rating: clamp_rating(raw.rating),
            stars: raw.stars.map(|s| s.min(5) as u8),
            amenities: raw.amenities,
            image: raw
                .image
                .or(raw.image_url)
                .or_else(|| raw.images.into_iter().next()),
            available,
            max_guests: raw.max_guests,
            created_at: raw.created_at,
        }
    }
}

impl Listing for Hotel {
    fn name(&self) -> &str {
        &self.name
    }

    fn unit_price(&self) -> f64 {
        self.price_per_night
    }

    fn rating(&self) -> f32 {
        self.rating
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
