//! Declarations and plans.
//!
//! A plan is the caller-built, ordered list of cloning rules; the declaration
//! payload is resolver-specific and opaque here. The DSL layer that produces
//! plans is an external collaborator.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// One `(resolver name, payload)` pair. Immutable once built.
#[derive(Clone)]
pub struct Declaration {
    resolver: String,
    payload: Arc<dyn Any + Send + Sync>,
}

impl Declaration {
    pub fn new<P>(resolver: impl Into<String>, payload: P) -> Self
    where
        P: Any + Send + Sync,
    {
        Self {
            resolver: resolver.into(),
            payload: Arc::new(payload),
        }
    }

    pub fn resolver(&self) -> &str {
        &self.resolver
    }

    /// Downcast the payload to the type the target resolver expects.
    pub fn payload<P: Any>(&self) -> Option<&P> {
        self.payload.downcast_ref()
    }
}

impl fmt::Debug for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Declaration")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

/// Ordered sequence of declarations, read-only to the adapter.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    declarations: Vec<Declaration>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style declaration append.
    pub fn declare<P>(mut self, resolver: impl Into<String>, payload: P) -> Self
    where
        P: Any + Send + Sync,
    {
        self.push(Declaration::new(resolver, payload));
        self
    }

    pub fn push(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl FromIterator<Declaration> for Plan {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        Self {
            declarations: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_downcasts_to_declared_type() {
        let declaration = Declaration::new("nullify", vec!["email".to_string()]);
        assert_eq!(
            declaration.payload::<Vec<String>>(),
            Some(&vec!["email".to_string()])
        );
        assert!(declaration.payload::<String>().is_none());
    }

    #[test]
    fn plan_preserves_declaration_order() {
        let plan = Plan::new().declare("nullify", ()).declare("finalize", ());
        let names: Vec<_> = plan.declarations().iter().map(|d| d.resolver()).collect();
        assert_eq!(names, ["nullify", "finalize"]);
    }
}
