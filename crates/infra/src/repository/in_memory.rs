use std::sync::RwLock;

use warehouse_inventory::{Pallet, RepositoryError, WarehouseRepository};

/// In-memory snapshot store.
///
/// Intended for tests/dev. `load` returns `None` until the store is seeded or saved to.
#[derive(Debug, Default)]
pub struct InMemoryWarehouseRepository {
    snapshot: RwLock<Option<Vec<Pallet>>>,
}

impl InMemoryWarehouseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(pallets: Vec<Pallet>) -> Self {
        Self {
            snapshot: RwLock::new(Some(pallets)),
        }
    }

    /// Copy of the last saved or seeded collection.
    pub fn snapshot(&self) -> Result<Option<Vec<Pallet>>, RepositoryError> {
        self.load()
    }
}

impl WarehouseRepository for InMemoryWarehouseRepository {
    fn load(&self) -> Result<Option<Vec<Pallet>>, RepositoryError> {
        let guard = self
            .snapshot
            .read()
            .map_err(|_| RepositoryError::Unavailable("lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, pallets: &[Pallet]) -> Result<(), RepositoryError> {
        let mut guard = self
            .snapshot
            .write()
            .map_err(|_| RepositoryError::Unavailable("lock poisoned".to_string()))?;
        *guard = Some(pallets.to_vec());
        Ok(())
    }
}
