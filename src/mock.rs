//! Built-in catalogue served when the booking API cannot be reached, so the
//! listing pages never render empty.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{Bookable, Hotel, ListingKind, Review, ReviewAuthor, Yacht};

fn added(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0).single()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn listed_hotel(
    id: &str,
    name: &str,
    city: &str,
    price: f64,
    rating: f32,
    stars: u8,
    amenities: &[&str],
    created_at: Option<DateTime<Utc>>,
) -> Hotel {
    Hotel {
        id: id.to_string(),
        name: name.to_string(),
        city: city.to_string(),
        country: Some("Croatia".to_string()),
        address: None,
        description: format!("{stars}-star stay in {city}."),
        price_per_night: price,
        rating,
        stars: Some(stars),
        amenities: strings(amenities),
        image: Some(format!("/images/hotels/{id}.jpg")),
        available: true,
        max_guests: Some(4),
        created_at,
    }
}

pub fn hotels() -> Vec<Hotel> {
    vec![
        listed_hotel(
            "1",
            "Hotel Excelsior",
            "Dubrovnik",
            320.0,
            4.8,
            5,
            &["WiFi", "Pool", "Spa", "Sea view"],
            added(2025, 3, 2),
        ),
        listed_hotel(
            "2",
            "Villa Dubrovnik",
            "Dubrovnik",
            410.0,
            4.9,
            5,
            &["WiFi", "Spa", "Restaurant"],
            added(2025, 6, 14),
        ),
        listed_hotel(
            "3",
            "Hotel Park Split",
            "Split",
            180.0,
            4.5,
            4,
            &["WiFi", "Pool", "Parking"],
            added(2024, 11, 20),
        ),
        listed_hotel(
            "4",
            "Amfora Hvar",
            "Hvar",
            240.0,
            4.4,
            4,
            &["WiFi", "Pool", "Spa", "Beach access"],
            added(2025, 1, 8),
        ),
        listed_hotel(
            "5",
            "Bastion Zadar",
            "Zadar",
            150.0,
            4.6,
            4,
            &["WiFi", "Restaurant"],
            added(2024, 9, 30),
        ),
        listed_hotel(
            "6",
            "Hostel Old Town",
            "Split",
            55.0,
            3.9,
            2,
            &["WiFi"],
            added(2025, 8, 1),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn listed_yacht(
    id: &str,
    name: &str,
    location: &str,
    yacht_type: &str,
    capacity: u32,
    cabins: u32,
    length_m: f64,
    price: f64,
    rating: f32,
    created_at: Option<DateTime<Utc>>,
) -> Yacht {
    Yacht {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        yacht_type: Some(yacht_type.to_string()),
        description: format!("{length_m} m {yacht_type} based in {location}."),
        capacity,
        cabins: Some(cabins),
        length_m: Some(length_m),
        price_per_day: price,
        rating,
        amenities: strings(&["Skipper", "Snorkeling gear", "Sun deck"]),
        image: Some(format!("/images/yachts/{id}.jpg")),
        available: true,
        created_at,
    }
}

pub fn yachts() -> Vec<Yacht> {
    vec![
        listed_yacht("1", "Blue Horizon", "Split", "Catamaran", 10, 5, 13.9, 1200.0, 4.7, added(2025, 4, 1)),
        listed_yacht("2", "Adriatic Pearl", "Dubrovnik", "Motor yacht", 8, 4, 21.0, 3400.0, 4.9, added(2025, 5, 12)),
        listed_yacht("3", "Vjetar", "Zadar", "Sailboat", 6, 3, 12.5, 450.0, 4.3, added(2024, 7, 19)),
        listed_yacht("4", "Lagoon Spirit", "Hvar", "Catamaran", 8, 4, 12.0, 980.0, 4.6, added(2025, 2, 23)),
    ]
}

fn review(
    id: &str,
    author: &str,
    kind: ListingKind,
    listing_id: &str,
    rating: u8,
    comment: &str,
    created_at: Option<DateTime<Utc>>,
) -> Review {
    Review {
        id: id.to_string(),
        user: ReviewAuthor {
            id: None,
            name: author.to_string(),
        },
        bookable: Bookable {
            kind: Some(kind),
            id: Some(listing_id.to_string()),
            name: String::new(),
        },
        rating,
        comment: comment.to_string(),
        created_at,
    }
}

pub fn reviews() -> Vec<Review> {
    vec![
        review("1", "Marta", ListingKind::Hotel, "1", 5, "Breathtaking view of the old town walls.", added(2025, 7, 2)),
        review("2", "Tom", ListingKind::Hotel, "1", 4, "Great spa, breakfast could be better.", added(2025, 7, 20)),
        review("3", "Ines", ListingKind::Hotel, "3", 5, "Friendly staff and a quiet pool area.", added(2025, 6, 5)),
        review("4", "Jakob", ListingKind::Yacht, "1", 5, "Skipper knew every hidden bay around Brac.", added(2025, 8, 11)),
        review("5", "Ana", ListingKind::Yacht, "2", 4, "Luxurious, though fuel costs add up quickly.", added(2025, 8, 28)),
    ]
}

pub fn hotel_by_id(id: &str) -> Option<Hotel> {
    hotels().into_iter().find(|h| h.id == id)
}

pub fn yacht_by_id(id: &str) -> Option<Yacht> {
    yachts().into_iter().find(|y| y.id == id)
}

pub fn reviews_for(kind: ListingKind, id: &str) -> Vec<Review> {
    reviews().into_iter().filter(|r| r.is_for(kind, id)).collect()
}
