//! `warehouse-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the error model, typed identifiers and the id allocator that hands them out.

pub mod error;
pub mod id;
pub mod model;

pub use error::{DomainError, DomainResult};
pub use id::{BoxId, IdAllocator, IdSequence, PalletId};
pub use model::{Entity, ValueObject, position_by_id};
