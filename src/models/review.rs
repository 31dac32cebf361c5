use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{de, Bookable, ListingKind};

#[derive(Deserialize, Default, Debug)]
pub struct RawReview {
    #[serde(default, deserialize_with = "de::opt_id")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, deserialize_with = "de::opt_id")]
    pub object_id: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub body: Option<String>,
    #[serde(default)]
    pub bookable: Option<Value>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub bookable_type: Option<String>,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub bookable_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub hotel_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub yacht_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReviewAuthor {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Review {
    pub id: String,
    pub user: ReviewAuthor,
    pub bookable: Bookable,
    /// Whole stars, 0 to 5. Zero means unrated.
    pub rating: u8,
    pub comment: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Review {
    pub fn is_for(&self, kind: ListingKind, id: &str) -> bool {
        self.bookable.kind == Some(kind) && self.bookable.id.as_deref() == Some(id)
    }
}

impl From<RawReview> for Review {
    fn from(raw: RawReview) -> Self {
        let nested_user = raw.user.as_ref().filter(|u| u.is_object());
        let user = ReviewAuthor {
            id: nested_user
                .and_then(|u| u.get("id"))
                .and_then(de::id_from_value)
                .or(raw.user_id),
            name: nested_user
                .and_then(|u| u.get("name"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .or(raw.user_name)
                .unwrap_or_else(|| "Anonymous".to_string()),
        };

        let nested_bookable = raw.bookable.as_ref().filter(|b| b.is_object());
        let kind = raw
            .bookable_type
            .as_deref()
            .and_then(|t| t.parse().ok())
            .or(raw.hotel_id.as_ref().map(|_| ListingKind::Hotel))
            .or(raw.yacht_id.as_ref().map(|_| ListingKind::Yacht));
        let bookable = Bookable {
            kind,
            id: raw
                .bookable_id
                .or_else(|| nested_bookable.and_then(|b| b.get("id")).and_then(de::id_from_value))
                .or(raw.hotel_id)
                .or(raw.yacht_id),
            name: nested_bookable
                .and_then(|b| b.get("name"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_default(),
        };

        Self {
            id: raw.id.or(raw.object_id).unwrap_or_default(),
            user,
            bookable,
            rating: raw.rating.map(|r| r.round().clamp(0.0, 5.0) as u8).unwrap_or(0),
            comment: raw.comment.or(raw.content).or(raw.body).unwrap_or_default(),
            created_at: raw.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn review_body_and_author_aliases() {
        let raw: RawReview = serde_json::from_value(json!({
            "id": 8,
            "user": { "id": 2, "name": "Luka" },
            "rating": "4.6",
            "content": "Lovely staff and a quiet room.",
            "hotel_id": 1
        }))
        .unwrap();
        let review = Review::from(raw);

        assert_eq!(review.user.name, "Luka");
        assert_eq!(review.rating, 5);
        assert_eq!(review.comment, "Lovely staff and a quiet room.");
        assert!(review.is_for(ListingKind::Hotel, "1"));
        assert!(!review.is_for(ListingKind::Yacht, "1"));
    }

    #[test]
    fn flat_author_name_is_used_when_no_nested_user() {
        let raw: RawReview = serde_json::from_value(json!({
            "user_name": "Petra",
            "rating": 3,
            "bookable_type": "App\\Models\\Yacht",
            "bookable_id": "9"
        }))
        .unwrap();
        let review = Review::from(raw);
        assert_eq!(review.user.name, "Petra");
        assert!(review.is_for(ListingKind::Yacht, "9"));
    }

    #[test]
    fn missing_or_out_of_range_ratings_are_clamped() {
        let unrated: RawReview = serde_json::from_value(json!({ "comment": "No stars given" })).unwrap();
        assert_eq!(Review::from(unrated).rating, 0);

        let high: RawReview = serde_json::from_value(json!({ "rating": 9 })).unwrap();
        assert_eq!(Review::from(high).rating, 5);

        let negative: RawReview = serde_json::from_value(json!({ "rating": -2 })).unwrap();
        assert_eq!(Review::from(negative).rating, 0);
    }
}
