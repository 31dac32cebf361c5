//! Everything that talks to the external booking API.

pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod token;

pub use client::ApiClient;
pub use token::TokenStore;
