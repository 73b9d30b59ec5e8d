use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use matcha_core::prelude::*;
use std::hint::black_box;

const TAGS: [&str; 5] = ["ceremonial", "to-go", "work-friendly", "no-laptops", "flavoured"];
const NAMES: [&str; 6] = ["Aoi", "Béa", "Cerise", "Ōmotenashi", "Échoppe", "Kissa"];

fn synthetic(n: u32) -> Vec<Entry> {
    (0..n)
        .map(|i| {
            let zone = i % 20 + 1;
            let name = format!("{} {i}", NAMES[i as usize % NAMES.len()]);
            let address = format!("{i} Rue de Test, 750{zone:02} Paris");
            let mut e = Entry::new(i, &name, &address).with_tags(&[
                TAGS[i as usize % TAGS.len()],
                TAGS[(i as usize / 3) % TAGS.len()],
            ]);
            if i % 4 != 0 {
                e = e.with_rating(f64::from(i % 50) / 10.0);
            }
            if i % 3 != 0 {
                let lat = 48.8 + f64::from(i % 100) / 1000.0;
                let lng = 2.3 + f64::from(i % 70) / 1000.0;
                e = e.with_coordinates(lat, lng);
            }
            e
        })
        .collect()
}

fn bench_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("recompute");
    for size in [100u32, 1_000, 5_000] {
        group.throughput(Throughput::Elements(u64::from(size)));

        group.bench_with_input(BenchmarkId::new("unfiltered", size), &size, |b, &size| {
            let store = EntryStore::from_entries(synthetic(size));
            let mut dir = Directory::new(store, EngineConfig::default());
            b.iter(|| black_box(dir.recompute().rows.len()));
        });

        group.bench_with_input(BenchmarkId::new("query_and_tags", size), &size, |b, &size| {
            let store = EntryStore::from_entries(synthetic(size));
            let mut dir = Directory::new(store, EngineConfig::default());
            dir.dispatch(Action::SetTag("to-go".into(), true));
            dir.dispatch(Action::SetHideUnrated(true));
            dir.dispatch(Action::SetQuery("rue".into()));
            b.iter(|| black_box(dir.recompute().markers.len()));
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let json = serde_json::to_string(
        &synthetic(1_000)
            .iter()
            .map(|e| {
                serde_json::json!({
                    "name": e.name,
                    "address": e.address,
                    "my_rating": e.rating.value(),
                    "lat": e.coordinates.map(|p| p.lat),
                    "lng": e.coordinates.map(|p| p.lng),
                    "tags": e.tag_keys().collect::<Vec<_>>(),
                })
            })
            .collect::<Vec<_>>(),
    )
    .unwrap();

    c.bench_function("parse_1000_entries", |b| {
        b.iter(|| black_box(EntryStore::from_json_str(&json).len()))
    });
}

criterion_group!(benches, bench_recompute, bench_parse);
criterion_main!(benches);
