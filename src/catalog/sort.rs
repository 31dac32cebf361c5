use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::Listing;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Best rated first, cheaper first among equals.
    #[default]
    Recommended,
    PriceAsc,
    PriceDesc,
    Rating,
    Name,
    Newest,
}

impl SortOrder {
    /// Lenient parse for query strings; anything unknown is `Recommended`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("price_asc") | Some("price") | Some("price-low") => SortOrder::PriceAsc,
            Some("price_desc") | Some("price-high") => SortOrder::PriceDesc,
            Some("rating") => SortOrder::Rating,
            Some("name") => SortOrder::Name,
            Some("newest") => SortOrder::Newest,
            _ => SortOrder::Recommended,
        }
    }
}

fn by_price(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

fn by_rating_desc(a: f32, b: f32) -> Ordering {
    b.total_cmp(&a)
}

/// Stable sort, so equal items keep the API's order.
pub fn sort_listings<T: Listing>(items: &mut [T], order: SortOrder) {
    match order {
        SortOrder::Recommended => items.sort_by(|a, b| {
            by_rating_desc(a.rating(), b.rating())
                .then_with(|| by_price(a.unit_price(), b.unit_price()))
        }),
        SortOrder::PriceAsc => items.sort_by(|a, b| by_price(a.unit_price(), b.unit_price())),
        SortOrder::PriceDesc => items.sort_by(|a, b| by_price(b.unit_price(), a.unit_price())),
        SortOrder::Rating => items.sort_by(|a, b| by_rating_desc(a.rating(), b.rating())),
        SortOrder::Name => items.sort_by_cached_key(|item| item.name().to_lowercase()),
        // Undated records sink to the bottom.
        SortOrder::Newest => items.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    fn prices(order: SortOrder) -> Vec<f64> {
        let mut hotels = mock::hotels();
        sort_listings(&mut hotels, order);
        hotels.iter().map(|h| h.price_per_night).collect()
    }

    #[test]
    fn price_orders() {
        let asc = prices(SortOrder::PriceAsc);
        assert!(asc.windows(2).all(|w| w[0] <= w[1]));
        let desc = prices(SortOrder::PriceDesc);
        assert!(desc.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn recommended_puts_best_rated_first() {
        let mut yachts = mock::yachts();
        sort_listings(&mut yachts, SortOrder::Recommended);
        assert!(yachts.windows(2).all(|w| w[0].rating >= w[1].rating));
    }

    #[test]
    fn name_sort_ignores_case() {
        let mut hotels = mock::hotels();
        hotels[0].name = "aaa first".into();
        sort_listings(&mut hotels, SortOrder::Name);
        assert_eq!(hotels[0].name, "aaa first");
    }

    #[test]
    fn newest_first_with_undated_last() {
        let mut hotels = mock::hotels();
        hotels[0].created_at = None;
        let undated = hotels[0].id.clone();
        sort_listings(&mut hotels, SortOrder::Newest);
        assert_eq!(hotels.last().map(|h| h.id.clone()), Some(undated));
    }

    #[test]
    fn unknown_sort_is_recommended() {
        assert_eq!(SortOrder::parse(Some("PRICE_DESC")), SortOrder::PriceDesc);
        assert_eq!(SortOrder::parse(Some("popularity")), SortOrder::Recommended);
        assert_eq!(SortOrder::parse(None), SortOrder::Recommended);
    }
}
