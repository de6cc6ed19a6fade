//! Cloning orchestration.
//!
//! An adapter variant owns a resolved chain plus the duplication hooks; the
//! free functions here execute one full cloning pass against a plan. The base
//! variant is ORM-independent: its raw duplicate is a shallow structural copy
//! and its chain is `init_as -> nullify -> finalize -> after_persist`.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::operation::Operation;
use crate::plan::Plan;
use crate::record::{content_key, Params, Record, RecordKey};
use crate::registry::{Position, Registry, ResolverChain};
use crate::resolvers::{
    AfterPersistResolver, FinalizeResolver, InitAsResolver, NullifyResolver, ResolverContext,
    AFTER_PERSIST, FINALIZE, INIT_AS, NULLIFY,
};

/// One adapter variant: a resolved chain and the overridable duplication
/// hooks. Variants targeting a concrete data layer override `raw_dup_record`
/// or `init_record` to build properly-typed instances, and `record_key` to
/// key identity by something other than record content.
pub trait Adapter: Send + Sync {
    /// The variant's resolved execution order.
    fn chain(&self) -> &ResolverChain;

    /// Shallow structural copy by default.
    fn raw_dup_record(&self, source: &Record) -> Record {
        source.clone()
    }

    /// Transform or replace the initial duplicate before resolvers run.
    /// Identity by default.
    fn init_record(&self, duplicate: Record, _operation: &mut Operation) -> Result<Record> {
        Ok(duplicate)
    }

    /// Identity key used for the operation's mapping table.
    fn record_key(&self, record: &Record) -> RecordKey {
        content_key(record)
    }
}

/// The base registry: built-in resolvers in their fixed relative order.
/// Variants extend it via `Registry::inheriting`.
pub fn base_registry() -> Registry {
    let mut registry = Registry::new();
    registry.register_at(INIT_AS, Arc::new(InitAsResolver), Position::Prepend);
    registry.register(NULLIFY, Arc::new(NullifyResolver));
    registry.register_at(FINALIZE, Arc::new(FinalizeResolver), Position::After(NULLIFY.into()));
    registry.register_at(
        AFTER_PERSIST,
        Arc::new(AfterPersistResolver),
        Position::After(FINALIZE.into()),
    );
    registry
}

/// ORM-independent adapter over the base chain.
#[derive(Debug, Clone)]
pub struct BaseAdapter {
    chain: ResolverChain,
}

impl BaseAdapter {
    pub fn new() -> Self {
        // The base registry's constraints are internally consistent.
        let chain = base_registry()
            .resolve()
            .expect("base resolver chain resolves");
        Self { chain }
    }

    /// Build a variant over an extended registry; resolution happens once
    /// here, and the chain is immutable afterwards.
    pub fn with_registry(registry: &Registry) -> Result<Self> {
        Ok(Self {
            chain: registry.resolve()?,
        })
    }
}

impl Default for BaseAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Adapter for BaseAdapter {
    fn chain(&self) -> &ResolverChain {
        &self.chain
    }
}

/// Result of one cloning run: the final clone plus the operation that ran it,
/// surfaced so the caller can drive the after-persist queue and inspect the
/// identity mappings.
#[derive(Debug)]
pub struct CloneOutcome {
    pub record: Record,
    pub operation: Operation,
}

impl CloneOutcome {
    /// Run the deferred post-persistence callbacks against the clone.
    pub fn run_after_persist(&mut self, params: &Params) -> Result<()> {
        self.operation.run_after_persist(&mut self.record, params)
    }
}

/// Execute one full cloning pass with a fresh operation.
pub fn clone_record(
    adapter: &dyn Adapter,
    source: &Record,
    plan: &Plan,
    params: &Params,
) -> Result<CloneOutcome> {
    let mut operation = Operation::new();
    let record = clone_with_operation(adapter, &mut operation, source, plan, params)?;
    Ok(CloneOutcome { record, operation })
}

/// Execute one cloning pass within an existing operation. This is the entry
/// point for resolvers that clone nested records recursively: the shared
/// operation carries the identity mappings across the whole run, so an
/// already-cloned source is detectable via `mapping_for`.
pub fn clone_with_operation(
    adapter: &dyn Adapter,
    operation: &mut Operation,
    source: &Record,
    plan: &Plan,
    params: &Params,
) -> Result<Record> {
    let chain = adapter.chain();

    // Reject plans naming unknown resolvers before any resolver runs; a
    // failing run must produce no clone.
    for declaration in plan.declarations() {
        chain.find(declaration.resolver())?;
    }

    let key = adapter.record_key(source);
    let duplicate = adapter.raw_dup_record(source);
    operation.insert_mapping(key, duplicate.clone());
    let mut record = adapter.init_record(duplicate, operation)?;

    for entry in chain.iter() {
        for declaration in plan
            .declarations()
            .iter()
            .filter(|declaration| declaration.resolver() == entry.name())
        {
            debug!(resolver = entry.name(), "applying resolver");
            let mut ctx = ResolverContext {
                operation: &mut *operation,
                params,
                adapter,
            };
            record = entry.resolver().apply(source, record, declaration, &mut ctx)?;
        }
    }

    // The fold may have replaced the duplicate outright (init_as); point the
    // mapping at the final accumulated clone.
    operation.insert_mapping(key, record.clone());
    Ok(record)
}
