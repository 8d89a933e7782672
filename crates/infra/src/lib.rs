//! Infrastructure layer: storage backends, the flat-file codec, configuration.

pub mod codec;
pub mod config;
pub mod repository;

mod integration_tests;

pub use config::{ConfigError, WarehouseConfig};
pub use repository::{FileWarehouseRepository, InMemoryWarehouseRepository};
