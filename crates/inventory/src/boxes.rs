use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use warehouse_core::{BoxId, DomainError, DomainResult, Entity, IdAllocator};

use crate::dimensions::{Dimensions, ensure_positive};

/// Days between production and expiry for boxes built from a production date.
pub const SHELF_LIFE_DAYS: u64 = 100;

/// Input for building a box.
///
/// Exactly one of `production_date` / `expiry_date` must be set, and it must
/// carry no time of day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSpec {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub weight: f64,
    pub production_date: Option<NaiveDateTime>,
    pub expiry_date: Option<NaiveDateTime>,
}

impl BoxSpec {
    /// A box whose expiry is derived from its production date.
    pub fn produced_on(width: f64, height: f64, depth: f64, weight: f64, date: NaiveDate) -> Self {
        Self {
            width,
            height,
            depth,
            weight,
            production_date: Some(date.and_time(NaiveTime::MIN)),
            expiry_date: None,
        }
    }

    /// A box with an explicit expiry date.
    pub fn expiring_on(width: f64, height: f64, depth: f64, weight: f64, date: NaiveDate) -> Self {
        Self {
            width,
            height,
            depth,
            weight,
            production_date: None,
            expiry_date: Some(date.and_time(NaiveTime::MIN)),
        }
    }
}

/// A box: the smallest inventory unit. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryBox {
    id: BoxId,
    dimensions: Dimensions,
    weight: f64,
    production_date: Option<NaiveDate>,
    expiry_date: NaiveDate,
}

/// Everything about a box except its id, already validated.
struct CheckedBox {
    dimensions: Dimensions,
    weight: f64,
    production_date: Option<NaiveDate>,
    expiry_date: NaiveDate,
}

impl InventoryBox {
    /// Build a box with the next free id from `ids`.
    ///
    /// The id is only taken once the input has been validated.
    pub fn new(ids: &mut IdAllocator, spec: BoxSpec) -> DomainResult<Self> {
        let checked = check(&spec)?;
        let id = ids.next_box_id()?;
        Ok(Self::assemble(id, checked))
    }

    /// Build a box with an explicit id, lifting the box watermark past it.
    pub fn with_id(ids: &mut IdAllocator, id: i64, spec: BoxSpec) -> DomainResult<Self> {
        let id = BoxId::new(id)?;
        let checked = check(&spec)?;
        ids.observe_box_id(id);
        Ok(Self::assemble(id, checked))
    }

    fn assemble(id: BoxId, checked: CheckedBox) -> Self {
        Self {
            id,
            dimensions: checked.dimensions,
            weight: checked.weight,
            production_date: checked.production_date,
            expiry_date: checked.expiry_date,
        }
    }

    pub fn id(&self) -> BoxId {
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

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn volume(&self) -> f64 {
        self.dimensions.volume()
    }

    /// Set only for boxes built from a production date.
    pub fn production_date(&self) -> Option<NaiveDate> {
        self.production_date
    }

    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }
}

impl Entity for InventoryBox {
    type Id = BoxId;

    fn id(&self) -> BoxId {
        self.id
    }
}

fn check(spec: &BoxSpec) -> DomainResult<CheckedBox> {
    let dimensions = Dimensions::new(spec.width, spec.height, spec.depth)?;
    ensure_positive("weight", spec.weight)?;

    let (production_date, expiry_date) = match (spec.production_date, spec.expiry_date) {
        (Some(_), Some(_)) => {
            return Err(DomainError::invalid_argument(
                "exactly one of production date or expiry date must be given, not both",
            ));
        }
        (None, None) => {
            return Err(DomainError::invalid_argument(
                "either a production date or an expiry date is required",
            ));
        }
        (Some(produced), None) => {
            let produced = date_only("production date", produced)?;
            let expiry = produced
                .checked_add_days(Days::new(SHELF_LIFE_DAYS))
                .ok_or_else(|| {
                    DomainError::invalid_argument(format!(
                        "production date {produced} is too late to derive an expiry date"
                    ))
                })?;
            (Some(produced), expiry)
        }
        (None, Some(expiry)) => (None, date_only("expiry date", expiry)?),
    };

    Ok(CheckedBox {
        dimensions,
        weight: spec.weight,
        production_date,
        expiry_date,
    })
}

fn date_only(what: &str, value: NaiveDateTime) -> DomainResult<NaiveDate> {
    if value.time() != NaiveTime::MIN {
        return Err(DomainError::invalid_argument(format!(
            "{what} must not carry a time of day, got {value}"
        )));
    }
    Ok(value.date())
}
