//! Strongly-typed identifiers and the allocator that issues them.
//!
//! Box ids and pallet ids are separate namespaces. Both are positive and fit in
//! an `i64`, which is the range the flat-file format and the CLI accept.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Identifier of a box.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoxId(u64);

/// Identifier of a pallet.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PalletId(u64);

const MAX_ID: u64 = i64::MAX as u64;

macro_rules! impl_numeric_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Validate an explicitly supplied identifier (must be positive).
            pub fn new(raw: i64) -> DomainResult<Self> {
                if raw <= 0 {
                    return Err(DomainError::invalid_argument(format!(
                        "{} must be a positive integer, got {raw}",
                        $name
                    )));
                }
                Ok(Self(raw as u64))
            }

            pub fn get(&self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.trim().parse::<i64>().map_err(|e| {
                    DomainError::invalid_argument(format!("{}: '{s}': {e}", $name))
                })?;
                Self::new(raw)
            }
        }

        impl From<$t> for u64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_numeric_id!(BoxId, "BoxId");
impl_numeric_id!(PalletId, "PalletId");

/// Monotonic watermark for one id namespace.
///
/// `next` hands out `last + 1`; `observe` lifts the watermark over an id that
/// was chosen elsewhere, so later `next` calls never collide with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdSequence {
    last: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest id issued or observed so far (0 when none).
    pub fn last(&self) -> u64 {
        self.last
    }

    pub fn next(&mut self) -> DomainResult<u64> {
        if self.last >= MAX_ID {
            return Err(DomainError::invalid_argument("identifier space exhausted"));
        }
        self.last += 1;
        Ok(self.last)
    }

    pub fn observe(&mut self, raw: u64) {
        if raw > self.last {
            self.last = raw;
        }
    }
}

/// Per-entity id watermarks.
///
/// One allocator is owned by each warehouse service (and each repository load),
/// so tests get a fresh namespace by constructing a new value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdAllocator {
    boxes: IdSequence,
    pallets: IdSequence,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_box_id(&mut self) -> DomainResult<BoxId> {
        self.boxes.next().map(BoxId)
    }

    pub fn next_pallet_id(&mut self) -> DomainResult<PalletId> {
        self.pallets.next().map(PalletId)
    }

    pub fn observe_box_id(&mut self, id: BoxId) {
        self.boxes.observe(id.0);
    }

    pub fn observe_pallet_id(&mut self, id: PalletId) {
        self.pallets.observe(id.0);
    }

    pub fn last_box_id(&self) -> u64 {
        self.boxes.last()
    }

    pub fn last_pallet_id(&self) -> u64 {
        self.pallets.last()
    }
}
