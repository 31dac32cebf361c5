//! In-memory filter, sort and pagination over fetched listings.

pub mod filter;
pub mod page;
pub mod sort;

pub use filter::{HotelFilter, YachtFilter};
pub use page::{Page, PageRequest, MAX_PER_PAGE};
pub use sort::{sort_listings, SortOrder};
