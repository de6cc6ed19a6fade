use std::sync::{Arc, Mutex};

use mimeo_core::{Declaration, Record, Resolver, ResolverContext, Result};
use serde_json::json;

/// Test resolver that records its invocations into a shared log and can be
/// made to fail.
pub struct Probe {
    name: String,
    seen: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl Probe {
    #[allow(dead_code)]
    pub fn new(name: &str, seen: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name: name.to_string(),
            seen,
            fail: false,
        }
    }

    #[allow(dead_code)]
    pub fn failing(name: &str, seen: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name: name.to_string(),
            seen,
            fail: true,
        }
    }
}

impl Resolver for Probe {
    fn apply(
        &self,
        _source: &Record,
        clone: Record,
        _declaration: &Declaration,
        _ctx: &mut ResolverContext<'_>,
    ) -> Result<Record> {
        self.seen.lock().unwrap().push(self.name.clone());
        if self.fail {
            return Err(anyhow::anyhow!("probe '{}' failed", self.name).into());
        }
        Ok(clone)
    }
}

#[allow(dead_code)]
pub fn seen_log() -> Arc<Mutex<Vec<String>>> {
    Arc::new(Mutex::new(Vec::new()))
}

#[allow(dead_code)]
pub fn user_record() -> Record {
    json!({ "email": "a@b.com", "active": true })
}
