use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{clamp_rating, de, Listing};

#[derive(Deserialize, Default, Debug)]
pub struct RawYacht {
    #[serde(default, deserialize_with = "de::opt_id")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, deserialize_with = "de::opt_id")]
    pub object_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub marina: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "de::opt_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub yacht_type: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::opt_u32")]
    pub capacity: Option<u32>,
    #[serde(default, deserialize_with = "de::opt_u32")]
    pub guests: Option<u32>,
    #[serde(default, deserialize_with = "de::opt_u32")]
    pub max_guests: Option<u32>,
    #[serde(default, deserialize_with = "de::opt_u32")]
    pub cabins: Option<u32>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub length: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub length_m: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub price_per_day: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub daily_price: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub rating: Option<f64>,
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
    #[serde(default, deserialize_with = "de::opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Yacht {
    pub id: String,
    pub name: String,
    pub location: String,
    pub yacht_type: Option<String>,
    pub description: String,
    pub capacity: u32,
    pub cabins: Option<u32>,
    pub length_m: Option<f64>,
    pub price_per_day: f64,
    pub rating: f32,
    pub amenities: Vec<String>,
    pub image: Option<String>,
    pub available: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<RawYacht> for Yacht {
    fn from(raw: RawYacht) -> Self {
        Self {
            id: raw.id.or(raw.object_id).unwrap_or_default(),
            name: raw.name.unwrap_or_else(|| "Unnamed yacht".to_string()),
            location: raw.location.or(raw.marina).unwrap_or_default(),
            yacht_type: raw.yacht_type.or(raw.kind),
            description: raw.description.unwrap_or_default(),
            capacity: raw.capacity.or(raw.guests).or(raw.max_guests).unwrap_or(0),
            cabins: raw.cabins,
            length_m: raw.length_m.or(raw.length),
            price_per_day: raw
                .price_per_day
                .or(raw.daily_price)
                .or(raw.price)
                .unwrap_or(0.0)
                .max(0.0),
            rating: clamp_rating(raw.rating),
            amenities: raw.amenities,
            image: raw
                .image
                .or(raw.image_url)
                .or_else(|| raw.images.into_iter().next()),
            available: raw.available.or(raw.is_available).unwrap_or(true),
            created_at: raw.created_at,
        }
    }
}

impl Listing for Yacht {
    fn name(&self) -> &str {
        &self.name
    }

    fn unit_price(&self) -> f64 {
        self.price_per_day
    }

    fn rating(&self) -> f32 {
        self.rating
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
