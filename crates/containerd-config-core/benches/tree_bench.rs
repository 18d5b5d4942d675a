//! Criterion benchmarks for the document tree editor.
//!
//! Run with:
//! ```bash
//! cargo bench --package containerd-config-core --bench tree_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use containerd_config_core::plan::containerd::{self, RegistrySettings};
use containerd_config_core::DocumentTree;

/// Builds a config with `n` registries already configured.
fn config_with_registries(n: usize) -> String {
    let mut tree = DocumentTree::default();
    for i in 0..n {
        let settings = RegistrySettings {
            registry_url: format!("registry-{i}.example.com:5000"),
            username: format!("user-{i}"),
            password: "secret".to_string(),
            ca_file: format!("/etc/certs/{i}.pem"),
            insecure_skip_verify: false,
        };
        containerd::add_registry(&settings)
            .apply(&mut tree)
            .expect("plan applies to an empty tree");
    }
    tree.to_toml_string().expect("serializable")
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    for n in [1_usize, 16, 128] {
        let text = config_with_registries(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &text, |b, text| {
            b.iter(|| DocumentTree::load(black_box(text)).expect("valid toml"));
        });
    }
    group.finish();
}

fn bench_enable_disable(c: &mut Criterion) {
    let text = config_with_registries(16);
    let base = DocumentTree::load(&text).expect("valid toml");
    let enable = containerd::enable_nvidia_runtime();
    let disable = containerd::disable_nvidia_runtime();

    c.bench_function("enable_then_disable_nvidia", |b| {
        b.iter(|| {
            let mut tree = base.clone();
            enable.apply(&mut tree).expect("enable");
            disable.apply(&mut tree).expect("disable");
            black_box(tree)
        });
    });
}

fn bench_serialize(c: &mut Criterion) {
    let tree = DocumentTree::load(&config_with_registries(128)).expect("valid toml");
    c.bench_function("serialize_128_registries", |b| {
        b.iter(|| black_box(&tree).to_toml_string().expect("serialize"));
    });
}

criterion_group!(benches, bench_load, bench_enable_disable, bench_serialize);
criterion_main!(benches);
