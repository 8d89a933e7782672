use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{Duration, NaiveDate};
use warehouse_core::IdAllocator;
use warehouse_inventory::{
    BoxSpec, InventoryBox, Pallet, RepositoryError, WarehouseRepository, WarehouseService,
};

/// Serves a pre-built snapshot; saves are discarded.
struct SnapshotRepository {
    pallets: Vec<Pallet>,
}

impl WarehouseRepository for SnapshotRepository {
    fn load(&self) -> Result<Option<Vec<Pallet>>, RepositoryError> {
        Ok(Some(self.pallets.clone()))
    }

    fn save(&self, _pallets: &[Pallet]) -> Result<(), RepositoryError> {
        Ok(())
    }
}

fn build_pallets(count: usize, boxes_per_pallet: usize) -> Vec<Pallet> {
    let mut ids = IdAllocator::new();
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..count)
        .map(|i| {
            let mut pallet = Pallet::new(&mut ids, 120.0, 100.0, 80.0).unwrap();
            for j in 0..boxes_per_pallet {
                let side = 5.0 + ((i + j) % 40) as f64;
                let expiry = base + Duration::days(((i * 7 + j * 13) % 365) as i64);
                let spec = BoxSpec::expiring_on(side, side, side, 1.0 + (j % 9) as f64, expiry);
                pallet.add_box(InventoryBox::new(&mut ids, spec).unwrap()).unwrap();
            }
            pallet
        })
        .collect()
}

fn service_with(count: usize) -> WarehouseService<SnapshotRepository> {
    WarehouseService::new(SnapshotRepository {
        pallets: build_pallets(count, 8),
    })
    .unwrap()
}

fn bench_sorted_listing(c: &mut Criterion) {
    let mut group = c.benchmark_group("all_pallets_sorted");

    for pallet_count in [10, 100, 1000, 10000].iter() {
        let service = service_with(*pallet_count);
        group.throughput(Throughput::Elements(*pallet_count as u64));
        group.bench_with_input(BenchmarkId::new("sort", pallet_count), pallet_count, |b, _| {
            b.iter(|| black_box(service.all_pallets_sorted().len()));
        });
    }

    group.finish();
}

fn bench_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("pallets_grouped_by_expiry");

    for pallet_count in [10, 100, 1000, 10000].iter() {
        let service = service_with(*pallet_count);
        group.throughput(Throughput::Elements(*pallet_count as u64));
        group.bench_with_input(BenchmarkId::new("group", pallet_count), pallet_count, |b, _| {
            b.iter(|| black_box(service.pallets_grouped_by_expiry().len()));
        });
    }

    group.finish();
}

fn bench_top_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("top_pallets_by_box_expiry");
    let service = service_with(10000);

    for count in [1, 3, 100].iter() {
        group.bench_with_input(BenchmarkId::new("top", count), count, |b, count| {
            b.iter(|| black_box(service.top_pallets_by_box_expiry(*count).len()));
        });
    }

    group.finish();
}

fn bench_add_box(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_box_to_pallet");
    group.sample_size(1000);

    group.bench_function("append_to_loaded_warehouse", |b| {
        let mut service = service_with(1000);
        let target = service.pallets()[0].id();
        let produced = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let spec = BoxSpec::produced_on(10.0, 10.0, 10.0, 2.0, produced);
        b.iter(|| {
            let carton = service.add_box_to_pallet(target, spec).unwrap();
            black_box(service.remove_box_from_pallet(target, carton.id()));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_sorted_listing,
    bench_grouping,
    bench_top_selection,
    bench_add_box
);
criterion_main!(benches);
