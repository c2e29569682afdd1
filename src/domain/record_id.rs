//! Record identifiers used as the input to code synthesis.
//!
//! Synthesized codes are only as unique as the identifiers they are derived
//! from, so allocation is kept behind [`IdAllocator`] and the default
//! implementation produces 96-bit object-id style values:
//!
//! ```text
//! | 32 bits unix seconds | 40 bits per-allocator random | 24 bits counter |
//! ```

use chrono::Utc;
use rand::Rng;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

const COUNTER_MASK: u32 = 0x00FF_FFFF;
const RANDOM_MASK: u64 = 0xFF_FFFF_FFFF;

/// Opaque, globally unique record identifier.
///
/// Stored as `u128` so base-62 conversion never loses precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(u128);

impl RecordId {
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u128 {
        self.0
    }

    /// Packs the three object-id components into a 96-bit value.
    pub fn from_parts(timestamp: u32, random: u64, counter: u32) -> Self {
        let value = (u128::from(timestamp) << 64)
            | (u128::from(random & RANDOM_MASK) << 24)
            | u128::from(counter & COUNTER_MASK);
        Self(value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:024x}", self.0)
    }
}

/// Source of fresh record identifiers.
///
/// Implementations must never hand out the same value twice.
#[cfg_attr(test, mockall::automock)]
pub trait IdAllocator: Send + Sync {
    fn allocate(&self) -> RecordId;
}

/// Object-id style allocator: timestamp, random instance tag, counter.
///
/// Two allocators collide only if they draw the same 40-bit tag and their
/// counters overlap within the same second.
pub struct ObjectIdAllocator {
    random: u64,
    counter: AtomicU32,
}

impl ObjectIdAllocator {
    pub fn new() -> Self {
        let mut rng = rand::rng();
        Self {
            random: rng.random::<u64>() & RANDOM_MASK,
            counter: AtomicU32::new(rng.random::<u32>() & COUNTER_MASK),
        }
    }
}

impl Default for ObjectIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator for ObjectIdAllocator {
    fn allocate(&self) -> RecordId {
        let timestamp = u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX);
        let counter = self.counter.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;
        RecordId::from_parts(timestamp, self.random, counter)
    }
}
