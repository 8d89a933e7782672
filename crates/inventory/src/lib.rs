//! Warehouse inventory domain.
//!
//! Boxes and pallets with their derived weight, volume and expiry, plus the
//! service that owns the pallet collection and answers the listing queries.
//! Storage lives behind [`WarehouseRepository`]; this crate does no IO itself.

pub mod boxes;
pub mod dimensions;
pub mod expiry;
pub mod pallet;
pub mod repository;
pub mod service;

pub use boxes::{BoxSpec, InventoryBox, SHELF_LIFE_DAYS};
pub use dimensions::Dimensions;
pub use expiry::{ExpiryKey, by_expiry_then_weight};
pub use pallet::{PALLET_BASE_WEIGHT, Pallet};
pub use repository::{RepositoryError, WarehouseRepository};
pub use service::{DEFAULT_TOP_COUNT, ExpiryGroup, WarehouseError, WarehouseService};
