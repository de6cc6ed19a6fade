//! Defers a callback until the caller has persisted the clone. Nothing runs
//! during the clone pass; the callback is queued on the operation and the
//! caller drives the queue via `Operation::run_after_persist` (or
//! `CloneOutcome::run_after_persist`). Declared `after: finalize` in the base
//! chain.

use crate::error::{ConfigurationError, Result};
use crate::operation::AfterPersistFn;
use crate::plan::Declaration;
use crate::record::{Params, Record};
use crate::resolvers::{Resolver, ResolverContext, AFTER_PERSIST};

use std::sync::Arc;

/// Declaration payload: `(persisted clone, params)` callback.
#[derive(Clone)]
pub struct AfterPersist(pub AfterPersistFn);

impl AfterPersist {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&mut Record, &Params) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }
}

pub struct AfterPersistResolver;

impl Resolver for AfterPersistResolver {
    fn apply(
        &self,
        _source: &Record,
        clone: Record,
        declaration: &Declaration,
        ctx: &mut ResolverContext<'_>,
    ) -> Result<Record> {
        let AfterPersist(callback) = declaration.payload::<AfterPersist>().ok_or_else(|| {
            ConfigurationError::InvalidDeclaration {
                resolver: AFTER_PERSIST.to_string(),
            }
        })?;
        ctx.operation.defer_after_persist(Arc::clone(callback));
        Ok(clone)
    }
}
