//! Resolver contract and the built-in resolver set.
//!
//! A resolver is a stateless transformation step: it receives the source, the
//! in-progress clone, its declaration payload, and the run context, and
//! returns the clone for the next step. New resolver kinds are added by
//! implementing [`Resolver`] and registering under a name, not by subclassing
//! anything.

pub mod after_persist;
pub mod finalize;
pub mod init_as;
pub mod nullify;

pub use after_persist::{AfterPersist, AfterPersistResolver};
pub use finalize::{Finalize, FinalizeResolver};
pub use init_as::{InitAs, InitAsResolver};
pub use nullify::{Nullify, NullifyResolver};

use crate::adapter::Adapter;
use crate::error::Result;
use crate::operation::Operation;
use crate::plan::Declaration;
use crate::record::{Params, Record};

pub const INIT_AS: &str = "init_as";
pub const NULLIFY: &str = "nullify";
pub const FINALIZE: &str = "finalize";
pub const AFTER_PERSIST: &str = "after_persist";

/// Run state handed to every resolver invocation: the per-run operation,
/// the caller's params, and the orchestrating adapter (for recursive cloning
/// of nested records within the same run).
pub struct ResolverContext<'a> {
    pub operation: &'a mut Operation,
    pub params: &'a Params,
    pub adapter: &'a dyn Adapter,
}

impl std::fmt::Debug for dyn Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Resolver")
    }
}

pub trait Resolver: Send + Sync {
    /// Transform the in-progress clone. The returned value feeds the next
    /// resolver in the chain; implementations may mutate or replace it.
    fn apply(
        &self,
        source: &Record,
        clone: Record,
        declaration: &Declaration,
        ctx: &mut ResolverContext<'_>,
    ) -> Result<Record>;
}
