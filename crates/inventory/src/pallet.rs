use chrono::NaiveDate;

use warehouse_core::{
    BoxId, DomainError, DomainResult, Entity, IdAllocator, PalletId, position_by_id,
};

use crate::boxes::InventoryBox;
use crate::dimensions::Dimensions;
use crate::expiry::ExpiryKey;

/// Weight of an empty pallet.
pub const PALLET_BASE_WEIGHT: f64 = 30.0;

/// A pallet: a footprint plus the boxes stacked on it, in insertion order.
///
/// Weight, volume and expiry are derived from the current boxes on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct Pallet {
    id: PalletId,
    dimensions: Dimensions,
    boxes: Vec<InventoryBox>,
}

impl Pallet {
    /// Create an empty pallet with the next free id from `ids`.
    pub fn new(ids: &mut IdAllocator, width: f64, height: f64, depth: f64) -> DomainResult<Self> {
        let dimensions = Dimensions::new(width, height, depth)?;
        let id = ids.next_pallet_id()?;
        Ok(Self::empty(id, dimensions))
    }

    /// Create an empty pallet with an explicit id, lifting the pallet watermark past it.
    pub fn with_id(
        ids: &mut IdAllocator,
        id: i64,
        width: f64,
        height: f64,
        depth: f64,
    ) -> DomainResult<Self> {
        let id = PalletId::new(id)?;
        let dimensions = Dimensions::new(width, height, depth)?;
        ids.observe_pallet_id(id);
        Ok(Self::empty(id, dimensions))
    }

    fn empty(id: PalletId, dimensions: Dimensions) -> Self {
        Self {
            id,
            dimensions,
            boxes: Vec::new(),
        }
    }

    pub fn id(&self) -> PalletId {
        self.id
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn width(&self) -> f64 {
        self.dimensions.width()
    }

    pub fn height(&self) -> f64 {
        self.dimensions.height()
    }

    pub fn depth(&self) -> f64 {
        self.dimensions.depth()
    }

    pub fn boxes(&self) -> &[InventoryBox] {
        &self.boxes
    }

    pub fn has_boxes(&self) -> bool {
        !self.boxes.is_empty()
    }

    /// Box weights plus [`PALLET_BASE_WEIGHT`].
    pub fn weight(&self) -> f64 {
        self.boxes.iter().map(InventoryBox::weight).sum::<f64>() + PALLET_BASE_WEIGHT
    }

    /// Box volumes plus the pallet's own volume.
    pub fn volume(&self) -> f64 {
        self.boxes.iter().map(InventoryBox::volume).sum::<f64>() + self.dimensions.volume()
    }

    /// Earliest box expiry, or `None` for an empty pallet.
    pub fn expiry_date(&self) -> Option<NaiveDate> {
        self.boxes.iter().map(InventoryBox::expiry_date).min()
    }

    pub fn expiry_key(&self) -> ExpiryKey {
        ExpiryKey::from(self.expiry_date())
    }

    /// Latest box expiry, or `None` for an empty pallet.
    pub fn latest_box_expiry(&self) -> Option<NaiveDate> {
        self.boxes.iter().map(InventoryBox::expiry_date).max()
    }

    /// Append a box. Height is unconstrained (boxes stack); width and depth
    /// must fit the pallet footprint.
    pub fn add_box(&mut self, carton: InventoryBox) -> DomainResult<()> {
        self.ensure_fits(&carton)?;
        self.boxes.push(carton);
        Ok(())
    }

    /// Remove the first box with `box_id`. Returns `false` when there is none.
    pub fn remove_box(&mut self, box_id: BoxId) -> bool {
        match position_by_id(&self.boxes, box_id) {
            Some(index) => {
                self.boxes.remove(index);
                true
            }
            None => false,
        }
    }

    fn ensure_fits(&self, carton: &InventoryBox) -> DomainResult<()> {
        if carton.width() > self.width() {
            return Err(DomainError::constraint(format!(
                "box {} width ({}) exceeds pallet {} width ({})",
                carton.id(),
                carton.width(),
                self.id,
                self.width()
            )));
        }
        if carton.depth() > self.depth() {
            return Err(DomainError::constraint(format!(
                "box {} depth ({}) exceeds pallet {} depth ({})",
                carton.id(),
                carton.depth(),
                self.id,
                self.depth()
            )));
        }
        Ok(())
    }
}

impl Entity for Pallet {
    type Id = PalletId;

    fn id(&self) -> PalletId {
        self.id
    }
}
