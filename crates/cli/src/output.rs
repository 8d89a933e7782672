//! Text and JSON renderings of pallets, boxes and expiry groups.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::Serialize;
use warehouse_inventory::{ExpiryGroup, InventoryBox, Pallet};

#[derive(Debug, Serialize)]
pub struct BoxView {
    pub id: u64,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub weight: f64,
    pub volume: f64,
    pub production_date: Option<NaiveDate>,
    pub expiry_date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct PalletView {
    pub id: u64,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub weight: f64,
    pub volume: f64,
    pub expiry_date: Option<NaiveDate>,
    pub boxes: Vec<BoxView>,
}

#[derive(Debug, Serialize)]
pub struct GroupView {
    /// `None` for the group of pallets without boxes.
    pub expiry_date: Option<NaiveDate>,
    pub pallets: Vec<PalletView>,
}

impl From<&InventoryBox> for BoxView {
    fn from(carton: &InventoryBox) -> Self {
        Self {
            id: carton.id().get(),
            width: carton.width(),
            height: carton.height(),
            depth: carton.depth(),
            weight: carton.weight(),
            volume: carton.volume(),
            production_date: carton.production_date(),
            expiry_date: carton.expiry_date(),
        }
    }
}

impl From<&Pallet> for PalletView {
    fn from(pallet: &Pallet) -> Self {
        Self {
            id: pallet.id().get(),
            width: pallet.width(),
            height: pallet.height(),
            depth: pallet.depth(),
            weight: pallet.weight(),
            volume: pallet.volume(),
            expiry_date: pallet.expiry_date(),
            boxes: pallet.boxes().iter().map(BoxView::from).collect(),
        }
    }
}

impl From<&ExpiryGroup<'_>> for GroupView {
    fn from(group: &ExpiryGroup<'_>) -> Self {
        Self {
            expiry_date: group.key.date(),
            pallets: group.pallets.iter().copied().map(PalletView::from).collect(),
        }
    }
}

pub fn pallet_views(pallets: &[&Pallet]) -> Vec<PalletView> {
    pallets.iter().copied().map(PalletView::from).collect()
}

pub fn group_views(groups: &[ExpiryGroup<'_>]) -> Vec<GroupView> {
    groups.iter().map(GroupView::from).collect()
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// One pallet summary line followed by an indented line per box.
pub fn pallet_text(pallet: &Pallet) -> String {
    let mut out = String::new();
    let expiry = pallet.expiry_key();
    let _ = writeln!(
        out,
        "Pallet {}: {} | weight {} | volume {} | expires {}",
        pallet.id(),
        pallet.dimensions(),
        pallet.weight(),
        pallet.volume(),
        expiry
    );
    for carton in pallet.boxes() {
        let produced = carton
            .production_date()
            .map(|d| format!(" | produced {}", d.format("%Y-%m-%d")))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  Box {}: {} | weight {} | volume {}{} | expires {}",
            carton.id(),
            carton.dimensions(),
            carton.weight(),
            carton.volume(),
            produced,
            carton.expiry_date().format("%Y-%m-%d")
        );
    }
    out
}

pub fn pallets_text(pallets: &[&Pallet]) -> String {
    if pallets.is_empty() {
        return "No pallets.\n".to_string();
    }
    pallets.iter().map(|p| pallet_text(p)).collect()
}

pub fn groups_text(groups: &[ExpiryGroup<'_>]) -> String {
    if groups.is_empty() {
        return "No pallets.\n".to_string();
    }
    let mut out = String::new();
    for group in groups {
        let _ = writeln!(out, "== Expiry: {} ({} pallets)", group.key, group.pallets.len());
        for pallet in &group.pallets {
            out.push_str(&pallet_text(pallet));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use warehouse_core::IdAllocator;
    use warehouse_inventory::{BoxSpec, ExpiryKey};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loaded_pallet() -> Pallet {
        let mut ids = IdAllocator::new();
        let mut pallet = Pallet::with_id(&mut ids, 2, 100.0, 10.0, 50.0).unwrap();
        let produced = BoxSpec::produced_on(10.0, 10.0, 10.0, 5.0, day(2024, 1, 1));
        let expiring = BoxSpec::expiring_on(5.0, 5.0, 5.0, 2.5, day(2024, 2, 1));
        pallet.add_box(InventoryBox::with_id(&mut ids, 1, produced).unwrap()).unwrap();
        pallet.add_box(InventoryBox::with_id(&mut ids, 2, expiring).unwrap()).unwrap();
        pallet
    }

    #[test]
    fn pallet_text_lists_summary_and_boxes() {
        let text = pallet_text(&loaded_pallet());
        assert_eq!(
            text,
            "Pallet 2: 100x10x50 | weight 37.5 | volume 51125 | expires 2024-02-01\n\
             \x20 Box 1: 10x10x10 | weight 5 | volume 1000 | produced 2024-01-01 | expires 2024-04-10\n\
             \x20 Box 2: 5x5x5 | weight 2.5 | volume 125 | expires 2024-02-01\n"
        );
    }

    #[test]
    fn empty_pallet_reports_no_boxes() {
        let mut ids = IdAllocator::new();
        let pallet = Pallet::with_id(&mut ids, 7, 1.0, 1.0, 1.0).unwrap();
        assert_eq!(
            pallet_text(&pallet),
            "Pallet 7: 1x1x1 | weight 30 | volume 1 | expires no boxes\n"
        );
        assert_eq!(pallets_text(&[]), "No pallets.\n");
    }

    #[test]
    fn json_view_carries_dates_and_boxes() {
        let pallet = loaded_pallet();
        let json = to_json(&PalletView::from(&pallet)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["id"], 2);
        assert_eq!(value["expiry_date"], "2024-02-01");
        assert_eq!(value["boxes"][0]["production_date"], "2024-01-01");
        assert_eq!(value["boxes"][1]["production_date"], serde_json::Value::Null);
    }

    #[test]
    fn group_view_uses_null_for_boxless_group() {
        let mut ids = IdAllocator::new();
        let empty = Pallet::with_id(&mut ids, 1, 1.0, 1.0, 1.0).unwrap();
        let group = ExpiryGroup {
            key: ExpiryKey::NoBoxes,
            pallets: vec![&empty],
        };

        let views = group_views(std::slice::from_ref(&group));
        assert_eq!(views[0].expiry_date, None);
        assert_eq!(views[0].pallets.len(), 1);
        assert!(groups_text(&[group]).starts_with("== Expiry: no boxes (1 pallets)\n"));
    }
}
