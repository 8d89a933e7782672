use warehouse_core::{DomainError, DomainResult, ValueObject};

/// Width × height × depth of a box or a pallet footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    width: f64,
    height: f64,
    depth: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64, depth: f64) -> DomainResult<Self> {
        ensure_positive("width", width)?;
        ensure_positive("height", height)?;
        ensure_positive("depth", depth)?;
        Ok(Self {
            width,
            height,
            depth,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth
    }
}

impl ValueObject for Dimensions {}

impl core::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.depth)
    }
}

/// Rejects zero, negative and non-finite measurements.
pub(crate) fn ensure_positive(name: &str, value: f64) -> DomainResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DomainError::invalid_argument(format!(
            "{name} must be positive, got {value}"
        )))
    }
}
