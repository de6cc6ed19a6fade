//! Replaces the raw duplicate with a caller-built record before any other
//! resolver runs. Prepended in the base chain.

use std::sync::Arc;

use crate::error::{CloneError, ConfigurationError, Result};
use crate::plan::Declaration;
use crate::record::{Params, Record};
use crate::resolvers::{Resolver, ResolverContext, INIT_AS};

pub type InitAsFn = Arc<dyn Fn(&Record, Record, &Params) -> anyhow::Result<Record> + Send + Sync>;

/// Declaration payload: `(source, duplicate, params) -> replacement`.
#[derive(Clone)]
pub struct InitAs(pub InitAsFn);

impl InitAs {
    pub fn new<F>(build: F) -> Self
    where
        F: Fn(&Record, Record, &Params) -> anyhow::Result<Record> + Send + Sync + 'static,
    {
        Self(Arc::new(build))
    }
}

pub struct InitAsResolver;

impl Resolver for InitAsResolver {
    fn apply(
        &self,
        source: &Record,
        clone: Record,
        declaration: &Declaration,
        ctx: &mut ResolverContext<'_>,
    ) -> Result<Record> {
        let InitAs(build) = declaration.payload::<InitAs>().ok_or_else(|| {
            ConfigurationError::InvalidDeclaration {
                resolver: INIT_AS.to_string(),
            }
        })?;
        build(source, clone, ctx.params).map_err(CloneError::Resolver)
    }
}
