pub mod admin;
pub mod listings;

pub use admin::{BookingQuery, DashboardStats, ReviewQuery, UserQuery};
pub use listings::{DataSource, Loaded};
