//! Expiry ordering shared by the listing and grouping queries.

use core::cmp::Ordering;

use chrono::NaiveDate;

use crate::pallet::Pallet;

/// Expiry of a pallet as a sort and group key.
///
/// `NoBoxes` (a pallet with nothing on it) orders before every date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpiryKey {
    NoBoxes,
    On(NaiveDate),
}

impl ExpiryKey {
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            ExpiryKey::NoBoxes => None,
            ExpiryKey::On(date) => Some(date),
        }
    }
}

impl From<Option<NaiveDate>> for ExpiryKey {
    fn from(value: Option<NaiveDate>) -> Self {
        match value {
            Some(date) => ExpiryKey::On(date),
            None => ExpiryKey::NoBoxes,
        }
    }
}

impl Ord for ExpiryKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ExpiryKey::NoBoxes, ExpiryKey::NoBoxes) => Ordering::Equal,
            (ExpiryKey::NoBoxes, ExpiryKey::On(_)) => Ordering::Less,
            (ExpiryKey::On(_), ExpiryKey::NoBoxes) => Ordering::Greater,
            (ExpiryKey::On(a), ExpiryKey::On(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for ExpiryKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl core::fmt::Display for ExpiryKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ExpiryKey::NoBoxes => f.write_str("no boxes"),
            ExpiryKey::On(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// `(expiry ascending, weight ascending)`.
pub fn by_expiry_then_weight(a: &Pallet, b: &Pallet) -> Ordering {
    a.expiry_key()
        .cmp(&b.expiry_key())
        .then_with(|| a.weight().total_cmp(&b.weight()))
}
