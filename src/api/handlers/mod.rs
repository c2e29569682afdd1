//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod lookup;
pub mod redirect;
pub mod shorten;

pub use health::health_handler;
pub use lookup::lookup_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
