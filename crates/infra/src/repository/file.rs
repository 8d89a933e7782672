use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use warehouse_inventory::{Pallet, RepositoryError, WarehouseRepository};

use crate::codec;

/// Stores the pallet collection in a single pipe-delimited text file.
///
/// A missing file loads as an empty collection. Saving rewrites the whole file.
#[derive(Debug, Clone)]
pub struct FileWarehouseRepository {
    path: PathBuf,
}

impl FileWarehouseRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WarehouseRepository for FileWarehouseRepository {
    fn load(&self) -> Result<Option<Vec<Pallet>>, RepositoryError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "data file missing; starting empty");
                return Ok(Some(Vec::new()));
            }
            Err(e) => return Err(e.into()),
        };

        let pallets = codec::decode(&text)?;
        info!(path = %self.path.display(), pallets = pallets.len(), "data file read");
        Ok(Some(pallets))
    }

    fn save(&self, pallets: &[Pallet]) -> Result<(), RepositoryError> {
        fs::write(&self.path, codec::encode(pallets))?;
        info!(path = %self.path.display(), pallets = pallets.len(), "data file written");
        Ok(())
    }
}
