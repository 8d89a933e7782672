//! Integration tests for the service over real storage backends.
//!
//! Tests: WarehouseService → Repository → (memory | file) → WarehouseService
//!
//! Verifies:
//! - Mutations persist and survive a fresh service instance
//! - Reload replaces in-memory state with what storage holds
//! - Ids never collide after reloading persisted data

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use chrono::NaiveDate;
    use warehouse_core::{BoxId, DomainError, PalletId};
    use warehouse_inventory::{
        BoxSpec, ExpiryKey, RepositoryError, WarehouseError, WarehouseService,
    };

    use crate::repository::{FileWarehouseRepository, InMemoryWarehouseRepository};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stock<R: warehouse_inventory::WarehouseRepository>(service: &mut WarehouseService<R>) {
        let expiries = [day(2023, 6, 1), day(2023, 6, 1), day(2023, 7, 1), day(2023, 7, 1)];
        let sides = [10.0, 20.0, 15.0, 25.0];
        let weights = [5.0, 10.0, 7.0, 12.0];
        for i in 0..4 {
            let id = service.add_pallet(100.0, 100.0, 100.0).unwrap().id();
            let spec = BoxSpec::expiring_on(sides[i], sides[i], sides[i], weights[i], expiries[i]);
            service.add_box_to_pallet(id, spec).unwrap();
        }
    }

    #[test]
    fn in_memory_round_trip_through_service() {
        let repo = Arc::new(InMemoryWarehouseRepository::new());

        let mut service = WarehouseService::new(repo.clone()).unwrap();
        assert!(service.pallets().is_empty());
        stock(&mut service);
        service.save().unwrap();

        let reopened = WarehouseService::new(repo.clone()).unwrap();
        assert_eq!(reopened.pallets(), service.pallets());
        let top: Vec<u64> =
            reopened.top_pallets_by_box_expiry(3).iter().map(|p| p.id().get()).collect();
        assert_eq!(top, vec![1, 3, 4]);
    }

    #[test]
    fn reload_discards_unsaved_changes() {
        let repo = Arc::new(InMemoryWarehouseRepository::new());
        let mut service = WarehouseService::new(repo.clone()).unwrap();
        stock(&mut service);
        service.save().unwrap();

        service.add_pallet(1.0, 1.0, 1.0).unwrap();
        service.remove_pallet(PalletId::new(1).unwrap());
        service.reload_data().unwrap();

        assert_eq!(Some(service.pallets().to_vec()), repo.snapshot().unwrap());
        // The watermark does not go back after reload: pallet 5 was handed out before.
        assert_eq!(service.add_pallet(1.0, 1.0, 1.0).unwrap().id().get(), 6);
    }

    #[test]
    fn file_backed_warehouse_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warehouse.txt");

        {
            let mut service = WarehouseService::new(FileWarehouseRepository::new(&path)).unwrap();
            stock(&mut service);
            let target = PalletId::new(2).unwrap();
            let spec = BoxSpec::produced_on(5.0, 5.0, 5.0, 1.0, day(2023, 3, 1));
            service.add_box_to_pallet(target, spec).unwrap();
            service.save().unwrap();
        }

        let mut service = WarehouseService::new(FileWarehouseRepository::new(&path)).unwrap();
        assert_eq!(service.pallets().len(), 4);

        let second = service.pallet_by_id(PalletId::new(2).unwrap()).unwrap();
        assert_eq!(second.boxes().len(), 2);
        assert_eq!(second.boxes()[1].production_date(), Some(day(2023, 3, 1)));
        assert_eq!(second.expiry_key(), ExpiryKey::On(day(2023, 6, 1)));

        // Loaded box ids lift the watermark, so the next box gets id 6.
        let spec = BoxSpec::expiring_on(1.0, 1.0, 1.0, 1.0, day(2024, 1, 1));
        let carton = service.add_box_to_pallet(PalletId::new(1).unwrap(), spec).unwrap();
        assert_eq!(carton.id(), BoxId::new(6).unwrap());
    }

    #[test]
    fn grouping_over_loaded_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warehouse.txt");
        fs::write(
            &path,
            "P|1|100|100|100|1\n\
             B|1|10|10|10|5||2023-06-01\n\
             P|2|100|100|100|0\n\
             P|3|100|100|100|1\n\
             B|2|15|15|15|7||2023-07-01\n",
        )
        .unwrap();

        let service = WarehouseService::new(FileWarehouseRepository::new(&path)).unwrap();
        let keys: Vec<ExpiryKey> =
            service.pallets_grouped_by_expiry().iter().map(|g| g.key).collect();
        assert_eq!(
            keys,
            vec![ExpiryKey::NoBoxes, ExpiryKey::On(day(2023, 6, 1)), ExpiryKey::On(day(2023, 7, 1))]
        );
    }

    #[test]
    fn duplicate_pallets_in_file_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warehouse.txt");
        fs::write(&path, "P|1|10|10|10|0\nP|1|20|20|20|0\n").unwrap();

        let err = WarehouseService::new(FileWarehouseRepository::new(&path)).unwrap_err();
        assert!(matches!(err, WarehouseError::Domain(DomainError::DuplicateKey(_))));
    }

    #[test]
    fn corrupt_file_on_reload_keeps_current_pallets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warehouse.txt");

        let mut service = WarehouseService::new(FileWarehouseRepository::new(&path)).unwrap();
        stock(&mut service);
        service.save().unwrap();

        fs::write(&path, "P|1|10|10|10|0\nZ|oops\n").unwrap();
        let err = service.reload_data().unwrap_err();

        assert!(matches!(
            err,
            WarehouseError::Repository(RepositoryError::Malformed { line: 2, .. })
        ));
        assert_eq!(service.pallets().len(), 4);
    }
}
