//! Named resolver bindings and the ordering solver.
//!
//! A registry collects `(name, resolver, position)` bindings in declaration
//! order and resolves them into a deterministic execution chain. Inheritance
//! is explicit: an adapter variant starts from `Registry::inheriting(&parent)`
//! and merges its own bindings on top. The resolved chain is immutable; an
//! extended registry is re-resolved when the variant is constructed.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::resolvers::Resolver;

/// Relative placement constraint for one binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Default: after every previously appended binding.
    Append,
    /// Before all non-prepend bindings, prepends keeping their own order.
    Prepend,
    /// Immediately before the named binding.
    Before(String),
    /// Immediately after the named binding.
    After(String),
}

#[derive(Clone)]
struct Binding {
    name: String,
    resolver: Arc<dyn Resolver>,
    position: Position,
}

#[derive(Clone, Default)]
pub struct Registry {
    bindings: Vec<Binding>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a variant registry from a copy of the parent's bindings. With no
    /// further registrations it resolves to the parent's order unchanged.
    pub fn inheriting(parent: &Registry) -> Self {
        parent.clone()
    }

    /// Register under `name`, appended at the end of the order. Re-registering
    /// an existing name replaces the implementation and keeps the binding's
    /// prior position.
    pub fn register(&mut self, name: impl Into<String>, resolver: Arc<dyn Resolver>) {
        let name = name.into();
        match self.binding_mut(&name) {
            Some(binding) => binding.resolver = resolver,
            None => self.bindings.push(Binding {
                name,
                resolver,
                position: Position::Append,
            }),
        }
    }

    /// Register under `name` with an explicit position. Re-registering an
    /// existing name replaces both the implementation and the position.
    pub fn register_at(
        &mut self,
        name: impl Into<String>,
        resolver: Arc<dyn Resolver>,
        position: Position,
    ) {
        let name = name.into();
        match self.binding_mut(&name) {
            Some(binding) => {
                binding.resolver = resolver;
                binding.position = position;
            }
            None => self.bindings.push(Binding {
                name,
                resolver,
                position,
            }),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.iter().any(|binding| binding.name == name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Resolve the bindings into a total execution order.
    ///
    /// Bindings are placed in declaration order; a binding whose anchor is not
    /// placed yet is deferred to the next pass, so forward references resolve
    /// as long as the anchor exists. `After` inserts immediately after the
    /// last placed binding with the anchor name, `Before` immediately before
    /// the first. When a pass makes no progress the remaining constraints are
    /// unsatisfiable: an anchor missing from the registry entirely is an
    /// `UnknownAnchor`, anything else an `UnresolvableOrder`.
    pub fn resolve(&self) -> Result<ResolverChain, ConfigurationError> {
        let mut placed: Vec<usize> = Vec::with_capacity(self.bindings.len());
        let mut prepend_len = 0usize;
        let mut pending: Vec<usize> = (0..self.bindings.len()).collect();

        while !pending.is_empty() {
            let mut deferred = Vec::new();

            for &index in &pending {
                let binding = &self.bindings[index];
                match &binding.position {
                    Position::Append => placed.push(index),
                    Position::Prepend => {
                        placed.insert(prepend_len, index);
                        prepend_len += 1;
                    }
                    Position::After(anchor) => {
                        match self.rposition_of(&placed, anchor) {
                            Some(at) => placed.insert(at + 1, index),
                            None => deferred.push(index),
                        }
                    }
                    Position::Before(anchor) => match self.position_of(&placed, anchor) {
                        Some(at) => placed.insert(at, index),
                        None => deferred.push(index),
                    },
                }
            }

            if deferred.len() == pending.len() {
                return Err(self.stuck_error(&deferred));
            }
            pending = deferred;
        }

        Ok(ResolverChain {
            entries: placed
                .into_iter()
                .map(|index| {
                    let binding = &self.bindings[index];
                    ChainEntry {
                        name: binding.name.clone(),
                        resolver: Arc::clone(&binding.resolver),
                    }
                })
                .collect(),
        })
    }

    fn binding_mut(&mut self, name: &str) -> Option<&mut Binding> {
        self.bindings.iter_mut().find(|binding| binding.name == name)
    }

    fn position_of(&self, placed: &[usize], name: &str) -> Option<usize> {
        placed
            .iter()
            .position(|&index| self.bindings[index].name == name)
    }

    fn rposition_of(&self, placed: &[usize], name: &str) -> Option<usize> {
        placed
            .iter()
            .rposition(|&index| self.bindings[index].name == name)
    }

    fn stuck_error(&self, deferred: &[usize]) -> ConfigurationError {
        for &index in deferred {
            let binding = &self.bindings[index];
            let anchor = match &binding.position {
                Position::After(anchor) | Position::Before(anchor) => anchor,
                Position::Append | Position::Prepend => continue,
            };
            if !self.contains(anchor) {
                return ConfigurationError::UnknownAnchor {
                    binding: binding.name.clone(),
                    anchor: anchor.clone(),
                };
            }
        }
        ConfigurationError::UnresolvableOrder {
            names: deferred
                .iter()
                .map(|&index| self.bindings[index].name.clone())
                .collect(),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.bindings.iter().map(|b| b.name.as_str()).collect();
        f.debug_struct("Registry").field("bindings", &names).finish()
    }
}

/// A resolved, immutable execution order.
#[derive(Clone)]
pub struct ResolverChain {
    entries: Vec<ChainEntry>,
}

#[derive(Clone)]
pub struct ChainEntry {
    name: String,
    resolver: Arc<dyn Resolver>,
}

impl ChainEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resolver(&self) -> &Arc<dyn Resolver> {
        &self.resolver
    }
}

impl ResolverChain {
    pub fn iter(&self) -> impl Iterator<Item = &ChainEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name()).collect()
    }

    pub fn find(&self, name: &str) -> Result<&Arc<dyn Resolver>, ConfigurationError> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.resolver)
            .ok_or_else(|| ConfigurationError::UnknownResolver {
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverChain")
            .field("order", &self.names())
            .finish()
    }
}
