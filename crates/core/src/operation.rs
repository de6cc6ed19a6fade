//! Per-run cloning context.
//!
//! An `Operation` lives for exactly one top-level clone call. It owns the
//! source-to-clone identity mapping (cycle safety for graph-shaped sources)
//! and the queue of deferred post-persistence callbacks. It is created by the
//! clone entry point and threaded explicitly through every resolver
//! invocation; concurrent runs each own an independent instance.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::record::{content_key, Params, Record, RecordKey};

/// Callback deferred until the caller has persisted the clone.
pub type AfterPersistFn = Arc<dyn Fn(&mut Record, &Params) -> anyhow::Result<()> + Send + Sync>;

#[derive(Default)]
pub struct Operation {
    mappings: HashMap<RecordKey, Record>,
    after_persist: Vec<AfterPersistFn>,
}

impl Operation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or overwrite the correspondence for `source`, keyed by content
    /// identity. Idempotent per key; last write wins.
    pub fn add_mapping(&mut self, source: &Record, clone: Record) {
        self.insert_mapping(content_key(source), clone);
    }

    /// Keyed variant for adapters that derive identity differently.
    pub fn insert_mapping(&mut self, key: RecordKey, clone: Record) {
        self.mappings.insert(key, clone);
    }

    /// Absence is a normal outcome: the source has not been cloned in this
    /// run yet.
    pub fn mapping_for(&self, source: &Record) -> Option<&Record> {
        self.mapping_for_key(content_key(source))
    }

    pub fn mapping_for_key(&self, key: RecordKey) -> Option<&Record> {
        self.mappings.get(&key)
    }

    pub fn mapping_count(&self) -> usize {
        self.mappings.len()
    }

    /// Queue a callback to run once the caller has persisted the clone.
    pub fn defer_after_persist(&mut self, callback: AfterPersistFn) {
        self.after_persist.push(callback);
    }

    pub fn pending_after_persist(&self) -> usize {
        self.after_persist.len()
    }

    /// Run the deferred callbacks in declaration order against the persisted
    /// record. The queue is cleared up front; the first failing callback
    /// aborts the remainder and propagates.
    pub fn run_after_persist(&mut self, record: &mut Record, params: &Params) -> Result<()> {
        for callback in std::mem::take(&mut self.after_persist) {
            callback(record, params)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("mappings", &self.mappings.len())
            .field("after_persist", &self.after_persist.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn add_mapping_is_idempotent_per_source() {
        let mut operation = Operation::new();
        let source = json!({ "id": 7 });
        let clone = json!({ "id": null });

        operation.add_mapping(&source, clone.clone());
        operation.add_mapping(&source, clone.clone());

        assert_eq!(operation.mapping_count(), 1);
        assert_eq!(operation.mapping_for(&source), Some(&clone));
    }

    #[test]
    fn remapping_same_source_is_last_write_wins() {
        let mut operation = Operation::new();
        let source = json!({ "id": 7 });

        operation.add_mapping(&source, json!({ "v": 1 }));
        operation.add_mapping(&source, json!({ "v": 2 }));

        assert_eq!(operation.mapping_for(&source), Some(&json!({ "v": 2 })));
    }

    #[test]
    fn mapping_for_unseen_source_is_none() {
        let operation = Operation::new();
        assert_eq!(operation.mapping_for(&json!({ "id": 1 })), None);
    }

    #[test]
    fn after_persist_runs_in_declaration_order_then_clears() {
        let mut operation = Operation::new();
        operation.defer_after_persist(Arc::new(|record, _| {
            record["trail"] = json!("first");
            Ok(())
        }));
        operation.defer_after_persist(Arc::new(|record, _| {
            let prior = record["trail"].as_str().unwrap_or_default().to_string();
            record["trail"] = json!(format!("{prior},second"));
            Ok(())
        }));

        let mut record = json!({});
        operation
            .run_after_persist(&mut record, &Params::new())
            .unwrap();

        assert_eq!(record["trail"], json!("first,second"));
        assert_eq!(operation.pending_after_persist(), 0);
    }
}
