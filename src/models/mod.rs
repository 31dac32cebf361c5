pub mod auth;
pub mod booking;
pub mod de;
pub mod hotel;
pub mod review;
pub mod user;
pub mod yacht;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export all the models that are used in other modules
pub use auth::{AuthSession, Claims, RawAuthResponse};
pub use booking::{Bookable, Booking, BookingQuote, BookingStatus, BookingUser, RawBooking};
pub use hotel::{Hotel, RawHotel};
pub use review::{RawReview, Review, ReviewAuthor};
pub use user::{RawUser, Role, User};
pub use yacht::{RawYacht, Yacht};

/// The two things a guest can book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Hotel,
    Yacht,
}

impl ListingKind {
    /// Collection path segment on the booking API.
    pub fn collection(self) -> &'static str {
        match self {
            ListingKind::Hotel => "hotels",
            ListingKind::Yacht => "yachts",
        }
    }

    /// Polymorphic type name the booking API stores on bookings and reviews.
    pub fn morph_type(self) -> &'static str {
        match self {
            ListingKind::Hotel => "App\\Models\\Hotel",
            ListingKind::Yacht => "App\\Models\\Yacht",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ListingKind::Hotel => "hotel",
            ListingKind::Yacht => "yacht",
        })
    }
}

impl FromStr for ListingKind {
    type Err = String;

    /// Accepts `hotel`, `Hotels`, `App\Models\Yacht` and similar.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        if lower.contains("yacht") {
            Ok(ListingKind::Yacht)
        } else if lower.contains("hotel") {
            Ok(ListingKind::Hotel)
        } else {
            Err(format!("unknown listing type: {s}"))
        }
    }
}

/// Common view over hotels and yachts used by the catalogue sorters.
pub trait Listing {
    fn name(&self) -> &str;
    /// Nightly price for hotels, daily price for yachts.
    fn unit_price(&self) -> f64;
    fn rating(&self) -> f32;
    fn created_at(&self) -> Option<DateTime<Utc>>;
}

/// Clamp a raw rating into the 0..=5 star range.
pub(crate) fn clamp_rating(raw: Option<f64>) -> f32 {
    raw.map(|r| r.clamp(0.0, 5.0) as f32).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_kind_parses_morph_names() {
        assert_eq!("App\\Models\\Hotel".parse::<ListingKind>(), Ok(ListingKind::Hotel));
        assert_eq!("yachts".parse::<ListingKind>(), Ok(ListingKind::Yacht));
        assert_eq!("Hotel".parse::<ListingKind>(), Ok(ListingKind::Hotel));
        assert!("villa".parse::<ListingKind>().is_err());
    }

    #[test]
    fn ratings_are_clamped() {
        assert_eq!(clamp_rating(Some(7.2)), 5.0);
        assert_eq!(clamp_rating(Some(-1.0)), 0.0);
        assert_eq!(clamp_rating(None), 0.0);
    }
}
