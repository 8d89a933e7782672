//! Implementations of the warehouse repository port.
//!
//! The port itself ([`WarehouseRepository`]) lives with the domain; this module
//! only provides storage backends for it.

pub mod file;
pub mod in_memory;

pub use file::FileWarehouseRepository;
pub use in_memory::InMemoryWarehouseRepository;
pub use warehouse_inventory::{RepositoryError, WarehouseRepository};
