//! Core domain entities.
//!
//! - [`ShortUrl`] - A persisted code → long URL mapping
//! - [`NewShortUrl`] - Insert payload for the mapping store

pub mod short_url;

pub use short_url::{NewShortUrl, ShortUrl};
