use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{de, ListingKind};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
        BookingStatus::Completed,
    ];

    /// Bookings that count towards revenue.
    pub fn is_billable(self) -> bool {
        matches!(self, BookingStatus::Confirmed | BookingStatus::Completed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            other => Err(format!("unknown booking status: {other}")),
        }
    }
}

#[derive(Deserialize, Default, Debug)]
pub struct RawBooking {
    #[serde(default, deserialize_with = "de::opt_id")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, deserialize_with = "de::opt_id")]
    pub object_id: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub bookable: Option<Value>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub bookable_type: Option<String>,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub bookable_id: Option<String>,
    #[serde(default)]
    pub hotel: Option<Value>,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub hotel_id: Option<String>,
    #[serde(default)]
    pub yacht: Option<Value>,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub yacht_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_date")]
    pub check_in: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::opt_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::opt_date")]
    pub check_out: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::opt_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::opt_u32")]
    pub guests: Option<u32>,
    #[serde(default, deserialize_with = "de::opt_u32")]
    pub guests_count: Option<u32>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub total_price: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub total: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub special_requests: Option<String>,
    #[serde(default, deserialize_with = "de::opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BookingUser {
    pub id: Option<String>,
    pub name: String,
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Bookable {
    pub kind: Option<ListingKind>,
    pub id: Option<String>,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Booking {
    pub id: String,
    pub user: BookingUser,
    pub bookable: Bookable,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: u32,
    pub total_price: f64,
    pub status: BookingStatus,
    pub special_requests: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

fn str_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        })
}

fn user_from(raw_user: Option<&Value>, user_id: Option<String>) -> BookingUser {
    match raw_user {
        Some(user @ Value::Object(_)) => BookingUser {
            id: user.get("id").and_then(de::id_from_value).or(user_id),
            name: str_field(user, &["name", "username", "email"])
                .unwrap_or_else(|| "Unknown guest".to_string()),
            email: str_field(user, &["email"]),
        },
        _ => BookingUser {
            id: user_id,
            name: "Unknown guest".to_string(),
            email: None,
        },
    }
}

impl From<RawBooking> for Booking {
    fn from(raw: RawBooking) -> Self {
        let user = user_from(raw.user.as_ref(), raw.user_id);

        // Nested objects carry the name; loose ids and morph types only
        // tell us what was booked.
        let (nested, nested_kind) = match (&raw.bookable, &raw.hotel, &raw.yacht) {
            (Some(b @ Value::Object(_)), _, _) => (Some(b), None),
            (_, Some(h @ Value::Object(_)), _) => (Some(h), Some(ListingKind::Hotel)),
            (_, _, Some(y @ Value::Object(_))) => (Some(y), Some(ListingKind::Yacht)),
            _ => (None, None),
        };
        let kind = raw
            .bookable_type
            .as_deref()
            .and_then(|t| t.parse().ok())
            .or(nested_kind)
            .or_else(|| {
                nested
                    .and_then(|n| str_field(n, &["type", "bookable_type"]))
                    .and_then(|t| t.parse().ok())
            })
            .or(raw.hotel_id.as_ref().map(|_| ListingKind::Hotel))
            .or(raw.yacht_id.as_ref().map(|_| ListingKind::Yacht));
        let bookable_id = raw
            .bookable_id
            .or_else(|| nested.and_then(|n| n.get("id")).and_then(de::id_from_value))
            .or(raw.hotel_id)
            .or(raw.yacht_id);
        let bookable_name = nested
            .and_then(|n| str_field(n, &["name", "title"]))
            .unwrap_or_else(|| match kind {
                Some(kind) => format!("Unknown {kind}"),
                None => "Unknown listing".to_string(),
            });

        Self {
            id: raw.id.or(raw.object_id).unwrap_or_default(),
            user,
            bookable: Bookable {
                kind,
                id: bookable_id,
                name: bookable_name,
            },
            check_in: raw.check_in.or(raw.start_date),
            check_out: raw.check_out.or(raw.end_date),
            guests: raw.guests.or(raw.guests_count).unwrap_or(1),
            total_price: raw
                .total_price
                .or(raw.total)
                .or(raw.amount)
                .unwrap_or(0.0),
            status: raw
                .status
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or(BookingStatus::Pending),
            special_requests: raw.special_requests,
            created_at: raw.created_at,
        }
    }
}

/// Price breakdown for a stay or charter.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BookingQuote {
    pub kind: ListingKind,
    /// Nights for hotels, charter days for yachts.
    pub units: u32,
    pub unit_price: f64,
    pub total: f64,
}

impl BookingQuote {
    pub fn for_stay(
        kind: ListingKind,
        unit_price: f64,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Self {
        let units = (check_out - check_in).num_days().max(1) as u32;
        let total = (f64::from(units) * unit_price * 100.0).round() / 100.0;
        Self {
            kind,
            units,
            unit_price,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(value: Value) -> Booking {
        Booking::from(serde_json::from_value::<RawBooking>(value).unwrap())
    }

    #[test]
    fn morph_bookable_with_nested_user() {
        let booking = normalize(json!({
            "id": 41,
            "user": { "id": 5, "name": "Ana Horvat", "email": "ana@example.com" },
            "bookable_type": "App\\Models\\Yacht",
            "bookable_id": 2,
            "bookable": { "id": 2, "name": "Blue Horizon" },
            "check_in": "2026-07-01",
            "check_out": "2026-07-04",
            "guests": 6,
            "total_price": "3600.00",
            "status": "confirmed"
        }));

        assert_eq!(booking.id, "41");
        assert_eq!(booking.user.id.as_deref(), Some("5"));
        assert_eq!(booking.user.name, "Ana Horvat");
        assert_eq!(booking.bookable.kind, Some(ListingKind::Yacht));
        assert_eq!(booking.bookable.id.as_deref(), Some("2"));
        assert_eq!(booking.bookable.name, "Blue Horizon");
        assert_eq!(booking.total_price, 3600.0);
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }

    #[test]
    fn legacy_hotel_booking_shape() {
        let booking = normalize(json!({
            "_id": "b1",
            "user_id": 9,
            "hotel": { "id": 3, "title": "Hotel Adriatic" },
            "start_date": "2026-08-10T00:00:00Z",
            "end_date": "2026-08-12",
            "guests_count": 2,
            "amount": 240,
            "status": "canceled"
        }));

        assert_eq!(booking.user.id.as_deref(), Some("9"));
        assert_eq!(booking.user.name, "Unknown guest");
        assert_eq!(booking.bookable.kind, Some(ListingKind::Hotel));
        assert_eq!(booking.bookable.name, "Hotel Adriatic");
        assert_eq!(booking.check_in, NaiveDate::from_ymd_opt(2026, 8, 10));
        assert_eq!(booking.guests, 2);
        assert_eq!(booking.status, BookingStatus::Cancelled);
    }

    #[test]
    fn unknown_status_defaults_to_pending() {
        let booking = normalize(json!({ "id": 1, "status": "on-hold", "yacht_id": 4 }));
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.bookable.kind, Some(ListingKind::Yacht));
        assert_eq!(booking.bookable.name, "Unknown yacht");
    }

    #[test]
    fn quote_counts_nights_and_rounds_to_cents() {
        let check_in = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let check_out = NaiveDate::from_ymd_opt(2026, 7, 4).unwrap();
        let quote = BookingQuote::for_stay(ListingKind::Hotel, 89.99, check_in, check_out);
        assert_eq!(quote.units, 3);
        assert_eq!(quote.total, 269.97);

        // Same-day charters still bill one day.
        let quote = BookingQuote::for_stay(ListingKind::Yacht, 1500.0, check_in, check_in);
        assert_eq!(quote.units, 1);
        assert_eq!(quote.total, 1500.0);
    }
}
