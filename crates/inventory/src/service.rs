//! Warehouse service: owns the pallet collection, mediates every mutation and
//! answers the aggregate queries.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, info};

use warehouse_core::{BoxId, DomainError, DomainResult, IdAllocator, PalletId, position_by_id};

use crate::boxes::{BoxSpec, InventoryBox};
use crate::expiry::{ExpiryKey, by_expiry_then_weight};
use crate::pallet::Pallet;
use crate::repository::{RepositoryError, WarehouseRepository};

/// How many pallets the top-by-expiry query returns by default.
pub const DEFAULT_TOP_COUNT: usize = 3;

#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Pallets sharing one expiry key, lightest first.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpiryGroup<'a> {
    pub key: ExpiryKey,
    pub pallets: Vec<&'a Pallet>,
}

/// The authoritative in-memory pallet collection.
///
/// Queries are recomputed from the current state on each call. Every pallet that
/// enters the collection lifts the id watermarks, so auto-assigned ids never
/// collide with loaded or externally built ones.
#[derive(Debug)]
pub struct WarehouseService<R>
where
    R: WarehouseRepository,
{
    repository: R,
    pallets: Vec<Pallet>,
    ids: IdAllocator,
}

impl<R> WarehouseService<R>
where
    R: WarehouseRepository,
{
    /// Load the initial collection from `repository`. `None` loads as empty.
    pub fn new(repository: R) -> Result<Self, WarehouseError> {
        Self::with_ids(repository, IdAllocator::new())
    }

    /// Like [`WarehouseService::new`], starting from existing id watermarks.
    pub fn with_ids(repository: R, ids: IdAllocator) -> Result<Self, WarehouseError> {
        let mut service = Self {
            repository,
            pallets: Vec::new(),
            ids,
        };
        if let Some(loaded) = service.repository.load()? {
            service.replace_all(loaded)?;
        }
        info!(pallets = service.pallets.len(), "warehouse loaded");
        Ok(service)
    }

    /// Current pallets in insertion order.
    pub fn pallets(&self) -> &[Pallet] {
        &self.pallets
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn pallet_by_id(&self, id: PalletId) -> Option<&Pallet> {
        self.pallets.iter().find(|p| p.id() == id)
    }

    /// Every pallet ordered by `(expiry, weight)`; pallets without boxes come first.
    /// Ties keep collection order.
    pub fn all_pallets_sorted(&self) -> Vec<&Pallet> {
        let mut sorted: Vec<&Pallet> = self.pallets.iter().collect();
        sorted.sort_by(|a, b| by_expiry_then_weight(a, b));
        sorted
    }

    /// Pallets partitioned by exact expiry, groups ascending by key, each group by weight.
    pub fn pallets_grouped_by_expiry(&self) -> Vec<ExpiryGroup<'_>> {
        let mut groups: Vec<ExpiryGroup<'_>> = Vec::new();
        for pallet in self.all_pallets_sorted() {
            let key = pallet.expiry_key();
            match groups.last_mut() {
                Some(group) if group.key == key => group.pallets.push(pallet),
                _ => groups.push(ExpiryGroup {
                    key,
                    pallets: vec![pallet],
                }),
            }
        }
        groups
    }

    /// The `count` pallets whose latest box expiry is furthest out, smallest volume first.
    ///
    /// Empty pallets are never eligible. When `count` splits a tie on latest expiry,
    /// the pallets earlier in the collection win.
    pub fn top_pallets_by_box_expiry(&self, count: usize) -> Vec<&Pallet> {
        let mut eligible: Vec<(&Pallet, _)> = self
            .pallets
            .iter()
            .filter_map(|p| p.latest_box_expiry().map(|latest| (p, latest)))
            .collect();
        eligible.sort_by(|(_, a), (_, b)| b.cmp(a));

        let mut selected: Vec<&Pallet> =
            eligible.into_iter().take(count).map(|(p, _)| p).collect();
        selected.sort_by(|a, b| a.volume().total_cmp(&b.volume()));
        selected
    }

    /// Create an empty pallet with an auto-assigned id and add it.
    pub fn add_pallet(&mut self, width: f64, height: f64, depth: f64) -> DomainResult<&Pallet> {
        let pallet = Pallet::new(&mut self.ids, width, height, depth)?;
        debug!(pallet_id = %pallet.id(), "pallet added");
        self.pallets.push(pallet);
        Ok(&self.pallets[self.pallets.len() - 1])
    }

    /// Add a pallet built elsewhere, rejecting a duplicate id.
    pub fn add_existing_pallet(&mut self, pallet: Pallet) -> DomainResult<()> {
        if self.pallet_by_id(pallet.id()).is_some() {
            return Err(DomainError::duplicate_key(format!(
                "pallet {} already exists in the warehouse",
                pallet.id()
            )));
        }
        observe(&mut self.ids, &pallet);
        debug!(pallet_id = %pallet.id(), boxes = pallet.boxes().len(), "existing pallet added");
        self.pallets.push(pallet);
        Ok(())
    }

    pub fn remove_pallet(&mut self, id: PalletId) -> bool {
        match position_by_id(&self.pallets, id) {
            Some(index) => {
                self.pallets.remove(index);
                debug!(pallet_id = %id, "pallet removed");
                true
            }
            None => false,
        }
    }

    /// Build a box with an auto-assigned id and put it on pallet `pallet_id`.
    ///
    /// The box id is only consumed when the box actually lands on the pallet.
    pub fn add_box_to_pallet(
        &mut self,
        pallet_id: PalletId,
        spec: BoxSpec,
    ) -> DomainResult<InventoryBox> {
        let index = position_by_id(&self.pallets, pallet_id)
            .ok_or_else(|| DomainError::not_found(format!("pallet {pallet_id}")))?;

        let mut staged = self.ids;
        let carton = InventoryBox::new(&mut staged, spec)?;
        self.pallets[index].add_box(carton.clone())?;
        self.ids = staged;

        debug!(pallet_id = %pallet_id, box_id = %carton.id(), "box added");
        Ok(carton)
    }

    /// `false` when either the pallet or the box is missing.
    pub fn remove_box_from_pallet(&mut self, pallet_id: PalletId, box_id: BoxId) -> bool {
        let removed = match position_by_id(&self.pallets, pallet_id) {
            Some(index) => self.pallets[index].remove_box(box_id),
            None => false,
        };
        if removed {
            debug!(pallet_id = %pallet_id, box_id = %box_id, "box removed");
        }
        removed
    }

    /// Replace the whole collection with a fresh load. A `None` load is ignored;
    /// an empty load clears the collection.
    pub fn reload_data(&mut self) -> Result<(), WarehouseError> {
        match self.repository.load()? {
            Some(loaded) => {
                self.replace_all(loaded)?;
                info!(pallets = self.pallets.len(), "warehouse reloaded");
            }
            None => debug!("repository returned no snapshot; keeping current pallets"),
        }
        Ok(())
    }

    /// Hand the full collection to the repository.
    pub fn save(&self) -> Result<(), RepositoryError> {
        self.repository.save(&self.pallets)?;
        info!(pallets = self.pallets.len(), "warehouse saved");
        Ok(())
    }

    fn replace_all(&mut self, loaded: Vec<Pallet>) -> DomainResult<()> {
        let mut seen = HashSet::with_capacity(loaded.len());
        for pallet in &loaded {
            if !seen.insert(pallet.id()) {
                return Err(DomainError::duplicate_key(format!(
                    "pallet {} appears more than once in the loaded data",
                    pallet.id()
                )));
            }
        }
        for pallet in &loaded {
            observe(&mut self.ids, pallet);
        }
        self.pallets = loaded;
        Ok(())
    }
}

fn observe(ids: &mut IdAllocator, pallet: &Pallet) {
    ids.observe_pallet_id(pallet.id());
    for carton in pallet.boxes() {
        ids.observe_box_id(carton.id());
    }
}
