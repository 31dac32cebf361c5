//! Backend-for-frontend of a hotel and yacht booking site.
//!
//! The browser talks to this service; this service talks to the external
//! booking API. In between it normalizes the API's inconsistent records,
//! filters, sorts and pages the catalogue, validates forms before they are
//! posted, and serves a built-in catalogue when the API is unreachable.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod mock;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod upstream;
