//! Runs a caller-supplied mutation over the clone. Declared `after: nullify`
//! in the base chain so finalizers observe nullified fields.

use std::sync::Arc;

use crate::error::{CloneError, ConfigurationError, Result};
use crate::plan::Declaration;
use crate::record::{Params, Record};
use crate::resolvers::{Resolver, ResolverContext, FINALIZE};

pub type FinalizeFn = Arc<dyn Fn(&Record, &mut Record, &Params) -> anyhow::Result<()> + Send + Sync>;

/// Declaration payload: `(source, clone, params)` mutation callback.
#[derive(Clone)]
pub struct Finalize(pub FinalizeFn);

impl Finalize {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Record, &mut Record, &Params) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }
}

pub struct FinalizeResolver;

impl Resolver for FinalizeResolver {
    fn apply(
        &self,
        source: &Record,
        mut clone: Record,
        declaration: &Declaration,
        ctx: &mut ResolverContext<'_>,
    ) -> Result<Record> {
        let Finalize(callback) = declaration.payload::<Finalize>().ok_or_else(|| {
            ConfigurationError::InvalidDeclaration {
                resolver: FINALIZE.to_string(),
            }
        })?;
        callback(source, &mut clone, ctx.params).map_err(CloneError::Resolver)?;
        Ok(clone)
    }
}
