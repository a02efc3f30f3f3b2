//! Async client for the TaskDeck HTTP API.
//!
//! Every endpoint wraps its payload in a common response envelope;
//! this crate unwraps it into `Result` and maps expired sessions to a
//! dedicated error so the UI can route back to login.

pub mod auth;
pub mod categories;
pub mod envelope;
pub mod error;
pub mod model;
pub mod tasks;

mod client;

pub use auth::TokenClaims;
pub use client::ApiClient;
pub use envelope::{Envelope, Listing, Paged};
pub use error::Error;
