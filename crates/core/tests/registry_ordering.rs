// Chain-order contracts for the base configuration and variant extension.

mod common;

use std::sync::Arc;

use mimeo_core::{base_registry, Adapter, BaseAdapter, Position, Registry};

use common::{seen_log, Probe};

#[test]
fn base_chain_order_is_fixed() {
    let adapter = BaseAdapter::new();
    assert_eq!(
        adapter.chain().names(),
        ["init_as", "nullify", "finalize", "after_persist"]
    );
}

#[test]
fn audit_registered_after_finalize_lands_between_finalize_and_after_persist() {
    let seen = seen_log();
    let mut registry = Registry::inheriting(&base_registry());
    registry.register_at(
        "audit",
        Arc::new(Probe::new("audit", seen)),
        Position::After("finalize".into()),
    );

    let chain = registry.resolve().unwrap();
    assert_eq!(
        chain.names(),
        ["init_as", "nullify", "finalize", "audit", "after_persist"]
    );
}

#[test]
fn variant_prepend_joins_the_prepend_section_in_declaration_order() {
    let seen = seen_log();
    let mut registry = Registry::inheriting(&base_registry());
    registry.register_at("setup", Arc::new(Probe::new("setup", seen)), Position::Prepend);

    let chain = registry.resolve().unwrap();
    assert_eq!(
        chain.names(),
        ["init_as", "setup", "nullify", "finalize", "after_persist"]
    );
}

#[test]
fn overriding_a_built_in_keeps_its_chain_position() {
    let seen = seen_log();
    let mut registry = Registry::inheriting(&base_registry());
    registry.register("finalize", Arc::new(Probe::new("finalize", seen)));

    let chain = registry.resolve().unwrap();
    assert_eq!(
        chain.names(),
        ["init_as", "nullify", "finalize", "after_persist"]
    );
}

#[test]
fn after_constraint_is_never_inverted() {
    let seen = seen_log();
    let mut registry = Registry::inheriting(&base_registry());
    registry.register_at(
        "audit",
        Arc::new(Probe::new("audit", seen)),
        Position::After("nullify".into()),
    );

    let names = registry.resolve().unwrap().names().join(",");
    let nullify_at = names.find("nullify").unwrap();
    let audit_at = names.find("audit").unwrap();
    assert!(nullify_at < audit_at);
}
