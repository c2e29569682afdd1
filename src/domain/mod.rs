//! Domain layer containing business entities and contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`record_id`] - Identifier allocation for code synthesis
//! - [`clock`] - Time source for creation and expiry
//! - [`resolution`] - Resolve outcomes
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business logic lives in [`crate::application::services`].

pub mod clock;
pub mod entities;
pub mod record_id;
pub mod repositories;
pub mod resolution;

pub use clock::{Clock, ManualClock, SystemClock};
pub use record_id::{IdAllocator, ObjectIdAllocator, RecordId};
pub use resolution::Resolution;

#[cfg(test)]
pub use record_id::MockIdAllocator;
