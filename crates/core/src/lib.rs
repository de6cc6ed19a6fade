pub mod adapter;
pub mod error;
pub mod operation;
pub mod plan;
pub mod record;
pub mod registry;
pub mod resolvers;

pub use adapter::{
    base_registry, clone_record, clone_with_operation, Adapter, BaseAdapter, CloneOutcome,
};
pub use error::{CloneError, ConfigurationError, Result};
pub use operation::{AfterPersistFn, Operation};
pub use plan::{Declaration, Plan};
pub use record::{content_key, Params, Record, RecordKey};
pub use registry::{ChainEntry, Position, Registry, ResolverChain};
pub use resolvers::{Resolver, ResolverContext};
