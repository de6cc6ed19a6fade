//! Sets named fields of the clone to `null`. Fields absent from the record
//! are skipped; the source is never touched.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigurationError, Result};
use crate::plan::Declaration;
use crate::record::Record;
use crate::resolvers::{Resolver, ResolverContext, NULLIFY};

/// Declaration payload: field names to nullify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nullify(pub Vec<String>);

impl Nullify {
    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(fields.into_iter().map(Into::into).collect())
    }
}

pub struct NullifyResolver;

impl Resolver for NullifyResolver {
    fn apply(
        &self,
        _source: &Record,
        mut clone: Record,
        declaration: &Declaration,
        _ctx: &mut ResolverContext<'_>,
    ) -> Result<Record> {
        let Nullify(fields) = declaration.payload::<Nullify>().ok_or_else(|| {
            ConfigurationError::InvalidDeclaration {
                resolver: NULLIFY.to_string(),
            }
        })?;

        match clone {
            Value::Object(ref mut object) => {
                for field in fields {
                    if let Some(slot) = object.get_mut(field) {
                        *slot = Value::Null;
                    }
                }
            }
            ref other => {
                return Err(anyhow!("nullify expects an object record, got {other}").into())
            }
        }
        Ok(clone)
    }
}
