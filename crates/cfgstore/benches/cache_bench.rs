//! Criterion benchmarks for the value cache.
//!
//! Compares a cached `ConfigStore` read against the uncached path (dotted
//! lookup + coercion + colour-code translation) to check that the cache pays
//! for its lock on the hot path.
//!
//! Run with:
//! ```bash
//! cargo bench --package cfgstore --bench cache_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cfgstore::{ConfigStore, DataDirHost, EmbeddedResources, PluginHost};
use cfgstore_core::translate_color_codes;

static BUNDLE: EmbeddedResources = EmbeddedResources::new(&[(
    "config.yml",
    b"messages:
  shop:
    header: '&8&m-----&r &6&lShop &8&m-----'
    lines: ['&aBuy', '&cSell', '&7Close']
limits:
  per-player:
    max-listings: 25
",
)]);

fn bench_reads(c: &mut Criterion) {
    let dir = std::env::temp_dir().join(format!("cfgstore_bench_{}", uuid::Uuid::new_v4()));
    let host = DataDirHost::new("bench", &dir);
    let store = ConfigStore::open("config", &host, "", BUNDLE).expect("open");

    let mut group = c.benchmark_group("reads");

    group.bench_function("get_string/cached", |b| {
        b.iter(|| store.get_string(black_box("messages.shop.header")))
    });
    group.bench_function("get_string/uncached", |b| {
        b.iter(|| {
            translate_color_codes(
                &store
                    .document()
                    .get_string(black_box("messages.shop.header"), ""),
            )
        })
    });
    group.bench_function("get_strings/cached", |b| {
        b.iter(|| store.get_strings(black_box("messages.shop.lines")))
    });
    group.bench_function("get_int/cached", |b| {
        b.iter(|| store.get_int(black_box("limits.per-player.max-listings")))
    });
    group.bench_function("get_int/uncached", |b| {
        b.iter(|| {
            store
                .document()
                .get_int(black_box("limits.per-player.max-listings"), 0)
        })
    });

    group.finish();
    std::fs::remove_dir_all(host.data_dir()).ok();
}

criterion_group!(benches, bench_reads);
criterion_main!(benches);
