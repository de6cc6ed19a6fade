//! Record representation and identity keys.
//!
//! Sources and clones are arbitrary JSON values; a shallow structural copy is
//! `Value::clone`. Identity for the operation's mapping table defaults to a
//! structural content hash, so two structurally equal sources share one
//! mapping entry within a run. Adapter variants that key records differently
//! (e.g. by primary-key field) override `Adapter::record_key`.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde_json::Value;

pub type Record = Value;

/// Free-form caller options, opaque to the core, passed through to every
/// resolver.
pub type Params = serde_json::Map<String, Value>;

/// Identity key for one record within a cloning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordKey(u64);

impl RecordKey {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Default identity: deterministic structural hash of the record.
pub fn content_key(record: &Record) -> RecordKey {
    let mut hasher = DefaultHasher::new();
    hash_value(record, &mut hasher);
    RecordKey(hasher.finish())
}

fn hash_value(value: &Value, hasher: &mut DefaultHasher) {
    match value {
        Value::Null => 0u8.hash(hasher),
        Value::Bool(flag) => {
            1u8.hash(hasher);
            flag.hash(hasher);
        }
        Value::Number(number) => {
            2u8.hash(hasher);
            if let Some(int) = number.as_i64() {
                int.hash(hasher);
            } else if let Some(uint) = number.as_u64() {
                uint.hash(hasher);
            } else if let Some(float) = number.as_f64() {
                float.to_bits().hash(hasher);
            }
        }
        Value::String(text) => {
            3u8.hash(hasher);
            text.hash(hasher);
        }
        Value::Array(items) => {
            4u8.hash(hasher);
            items.len().hash(hasher);
            for item in items {
                hash_value(item, hasher);
            }
        }
        Value::Object(fields) => {
            5u8.hash(hasher);
            fields.len().hash(hasher);
            for (name, field) in fields {
                name.hash(hasher);
                hash_value(field, hasher);
            }
        }
    }
}
