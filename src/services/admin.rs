//! Admin dashboard: per-entity list queries and the overview numbers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{de, Booking, BookingStatus, Hotel, ListingKind, Review, Role, User, Yacht};

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn search_term(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct BookingQuery {
    /// Guest name, email, listing name or booking id.
    pub search: Option<String>,
    #[serde(default, deserialize_with = "de::query_opt")]
    pub status: Option<BookingStatus>,
    #[serde(default, deserialize_with = "de::query_opt")]
    pub kind: Option<ListingKind>,
    /// `newest` (default), `oldest`, `check_in`, `total_desc`, `total_asc`.
    pub sort: Option<String>,
}

impl BookingQuery {
    pub fn apply(&self, bookings: Vec<Booking>) -> Vec<Booking> {
        let term = search_term(&self.search);
        let mut found: Vec<Booking> = bookings
            .into_iter()
            .filter(|b| self.status.map_or(true, |s| b.status == s))
            .filter(|b| self.kind.map_or(true, |k| b.bookable.kind == Some(k)))
            .filter(|b| match &term {
                Some(term) => {
                    contains_ci(&b.user.name, term)
                        || b.user.email.as_deref().is_some_and(|e| contains_ci(e, term))
                        || contains_ci(&b.bookable.name, term)
                        || contains_ci(&b.id, term)
                }
                None => true,
            })
            .collect();

        match self.sort.as_deref() {
            Some("oldest") => found.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            Some("check_in") => found.sort_by(|a, b| a.check_in.cmp(&b.check_in)),
            Some("total_desc") => found.sort_by(|a, b| b.total_price.total_cmp(&a.total_price)),
            Some("total_asc") => found.sort_by(|a, b| a.total_price.total_cmp(&b.total_price)),
            _ => found.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }
        found
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct UserQuery {
    pub search: Option<String>,
    #[serde(default, deserialize_with = "de::query_opt")]
    pub role: Option<Role>,
    /// `name` (default), `email`, `newest`.
    pub sort: Option<String>,
}

impl UserQuery {
    pub fn apply(&self, users: Vec<User>) -> Vec<User> {
        let term = search_term(&self.search);
        let mut found: Vec<User> = users
            .into_iter()
            .filter(|u| self.role.map_or(true, |r| u.role == r))
            .filter(|u| match &term {
                Some(term) => contains_ci(&u.name, term) || contains_ci(&u.email, term),
                None => true,
            })
            .collect();

        match self.sort.as_deref() {
            Some("email") => found.sort_by_cached_key(|u| u.email.to_lowercase()),
            Some("newest") => found.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            _ => found.sort_by_cached_key(|u| u.name.to_lowercase()),
        }
        found
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ReviewQuery {
    pub search: Option<String>,
    #[serde(default, deserialize_with = "de::query_opt")]
    pub kind: Option<ListingKind>,
    #[serde(default, deserialize_with = "de::query_opt")]
    pub min_rating: Option<u8>,
    #[serde(default, deserialize_with = "de::query_opt")]
    pub max_rating: Option<u8>,
    /// `newest` (default), `rating_desc`, `rating_asc`.
    pub sort: Option<String>,
}

impl ReviewQuery {
    pub fn apply(&self, reviews: Vec<Review>) -> Vec<Review> {
        let term = search_term(&self.search);
        let mut found: Vec<Review> = reviews
            .into_iter()
            .filter(|r| self.kind.map_or(true, |k| r.bookable.kind == Some(k)))
            .filter(|r| self.min_rating.map_or(true, |min| r.rating >= min))
            .filter(|r| self.max_rating.map_or(true, |max| r.rating <= max))
            .filter(|r| match &term {
                Some(term) => {
                    contains_ci(&r.comment, term)
                        || contains_ci(&r.user.name, term)
                        || contains_ci(&r.bookable.name, term)
                }
                None => true,
            })
            .collect();

        match self.sort.as_deref() {
            Some("rating_desc") => found.sort_by(|a, b| b.rating.cmp(&a.rating)),
            Some("rating_asc") => found.sort_by(|a, b| a.rating.cmp(&b.rating)),
            _ => found.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }
        found
    }
}

pub const RECENT_BOOKINGS: usize = 5;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardStats {
    pub hotels: usize,
    pub yachts: usize,
    pub users: usize,
    pub admins: usize,
    pub bookings: usize,
    pub reviews: usize,
    /// Sum over confirmed and completed bookings.
    pub revenue: f64,
    pub pending_bookings: usize,
    pub bookings_by_status: BTreeMap<String, usize>,
    pub average_rating: Option<f32>,
    pub recent_bookings: Vec<Booking>,
}

impl DashboardStats {
    pub fn compute(
        hotels: &[Hotel],
        yachts: &[Yacht],
        users: &[User],
        bookings: &[Booking],
        reviews: &[Review],
    ) -> Self {
        let mut bookings_by_status: BTreeMap<String, usize> = BookingStatus::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        for booking in bookings {
            *bookings_by_status
                .entry(booking.status.as_str().to_string())
                .or_default() += 1;
        }

        let revenue: f64 = bookings
            .iter()
            .filter(|b| b.status.is_billable())
            .map(|b| b.total_price)
            .sum();

        // Unrated reviews (0 stars) do not count towards the average.
        let rated: Vec<u32> = reviews
            .iter()
            .filter(|r| r.rating > 0)
            .map(|r| u32::from(r.rating))
            .collect();
        let average_rating = (!rated.is_empty()).then(|| {
            let sum: u32 = rated.iter().sum();
            ((sum as f32 / rated.len() as f32) * 10.0).round() / 10.0
        });

        let mut recent: Vec<Booking> = bookings.to_vec();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(RECENT_BOOKINGS);

        Self {
            hotels: hotels.len(),
            yachts: yachts.len(),
            users: users.len(),
            admins: users.iter().filter(|u| u.is_admin()).count(),
            bookings: bookings.len(),
            reviews: reviews.len(),
            revenue: (revenue * 100.0).round() / 100.0,
            pending_bookings: bookings
                .iter()
                .filter(|b| b.status == BookingStatus::Pending)
                .count(),
            bookings_by_status,
            average_rating,
            recent_bookings: recent,
        }
    }
}
