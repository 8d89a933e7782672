//! Persistence boundary for the pallet collection.

use std::sync::Arc;

use thiserror::Error;
use warehouse_core::DomainError;

use crate::pallet::Pallet;

/// Repository operation error.
///
/// These are storage failures. A record that decodes fine but breaks a domain
/// rule is reported as [`RepositoryError::Domain`] with its position.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed record at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("invalid record at line {line}: {source}")]
    Domain {
        line: usize,
        #[source]
        source: DomainError,
    },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            reason: reason.into(),
        }
    }
}

/// Loads and saves the whole pallet collection at once.
///
/// Implementations own the encoding; the service only sees fully built pallets.
pub trait WarehouseRepository: Send + Sync {
    /// Load every pallet (with its boxes), in stored order.
    ///
    /// `Ok(None)` means the backend has no snapshot to offer; an empty or
    /// missing source is `Ok(Some(vec![]))`.
    fn load(&self) -> Result<Option<Vec<Pallet>>, RepositoryError>;

    /// Persist `pallets`, replacing whatever was stored before.
    fn save(&self, pallets: &[Pallet]) -> Result<(), RepositoryError>;
}

impl<R> WarehouseRepository for Arc<R>
where
    R: WarehouseRepository + ?Sized,
{
    fn load(&self) -> Result<Option<Vec<Pallet>>, RepositoryError> {
        (**self).load()
    }

    fn save(&self, pallets: &[Pallet]) -> Result<(), RepositoryError> {
        (**self).save(pallets)
    }
}
