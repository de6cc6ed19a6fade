use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use mimeo_core::{Declaration, Plan, Position, Record, Registry, Resolver, ResolverContext};

struct Noop;

impl Resolver for Noop {
    fn apply(
        &self,
        _source: &Record,
        clone: Record,
        _declaration: &Declaration,
        _ctx: &mut ResolverContext<'_>,
    ) -> mimeo_core::Result<Record> {
        Ok(clone)
    }
}

fn constrained_registry(size: usize) -> Registry {
    let mut registry = Registry::new();
    registry.register_at("head", Arc::new(Noop), Position::Prepend);
    registry.register("anchor_0", Arc::new(Noop));
    for i in 1..size {
        // Every third binding anchors onto an earlier one.
        let name = format!("anchor_{i}");
        if i % 3 == 0 {
            let anchor = format!("anchor_{}", i / 2);
            registry.register_at(name, Arc::new(Noop), Position::After(anchor));
        } else {
            registry.register(name, Arc::new(Noop));
        }
    }
    registry
}

fn benchmark_resolve_100_bindings(c: &mut Criterion) {
    let registry = constrained_registry(100);
    c.bench_function("resolve_100_bindings", |b| {
        b.iter(|| registry.resolve().unwrap())
    });
}

fn benchmark_clone_with_50_declarations(c: &mut Criterion) {
    let registry = constrained_registry(50);
    let adapter = mimeo_core::BaseAdapter::with_registry(&registry).unwrap();
    let mut plan = Plan::new();
    for i in 0..50 {
        plan.push(Declaration::new(format!("anchor_{i}"), ()));
    }
    let source = serde_json::json!({ "id": 1, "email": "a@b.com" });
    let params = mimeo_core::Params::new();

    c.bench_function("clone_with_50_declarations", |b| {
        b.iter(|| mimeo_core::clone_record(&adapter, &source, &plan, &params).unwrap())
    });
}

criterion_group!(
    benches,
    benchmark_resolve_100_bindings,
    benchmark_clone_with_50_declarations
);
criterion_main!(benches);
