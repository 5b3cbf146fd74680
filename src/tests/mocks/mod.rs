//! Hand-written search backends
//!
//! `MockSearchBackend` (mockall) covers strict call expectations inside the
//! library modules. The backend here is for pipeline tests that need canned
//! responses per stage, artificial latency, and call counting across clones.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::nethys::{LookupError, MatchMode, ResultSet, SearchBackend, SearchQuery};

// ============================================================================
// Scripted Backend
// ============================================================================

/// Backend answering each stage with a fixed result set.
pub struct ScriptedBackend {
    exact: Mutex<ResultSet>,
    fuzzy: Mutex<ResultSet>,
    /// Fail every call with a 503 when set.
    should_fail: AtomicBool,
    /// Sleep before answering.
    response_delay_ms: AtomicU32,
    exact_call_count: AtomicU32,
    fuzzy_call_count: AtomicU32,
    /// Every query seen, serialized, in call order.
    seen: Mutex<Vec<serde_json::Value>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            exact: Mutex::new(ResultSet::empty()),
            fuzzy: Mutex::new(ResultSet::empty()),
            should_fail: AtomicBool::new(false),
            response_delay_ms: AtomicU32::new(0),
            exact_call_count: AtomicU32::new(0),
            fuzzy_call_count: AtomicU32::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn with_exact(self, results: ResultSet) -> Self {
        *self.exact.lock().unwrap() = results;
        self
    }

    pub fn with_fuzzy(self, results: ResultSet) -> Self {
        *self.fuzzy.lock().unwrap() = results;
        self
    }

    pub fn failing(self) -> Self {
        self.should_fail.store(true, Ordering::SeqCst);
        self
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        self.response_delay_ms
            .store(delay.as_millis() as u32, Ordering::SeqCst);
        self
    }

    pub fn exact_calls(&self) -> u32 {
        self.exact_call_count.load(Ordering::SeqCst)
    }

    pub fn fuzzy_calls(&self) -> u32 {
        self.fuzzy_call_count.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> u32 {
        self.exact_calls() + self.fuzzy_calls()
    }

    pub fn seen_queries(&self) -> Vec<serde_json::Value> {
        self.seen.lock().unwrap().clone()
    }
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchBackend for ScriptedBackend {
    async fn execute(&self, query: &SearchQuery) -> crate::core::nethys::Result<ResultSet> {
        match query.mode() {
            MatchMode::Exact => self.exact_call_count.fetch_add(1, Ordering::SeqCst),
            MatchMode::Fuzzy => self.fuzzy_call_count.fetch_add(1, Ordering::SeqCst),
        };
        self.seen
            .lock()
            .unwrap()
            .push(serde_json::to_value(query).unwrap());

        let delay = self.response_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(u64::from(delay))).await;
        }

        if self.should_fail.load(Ordering::SeqCst) {
            return Err(LookupError::status(503, "Service Unavailable"));
        }

        let results = match query.mode() {
            MatchMode::Exact => self.exact.lock().unwrap().clone(),
            MatchMode::Fuzzy => self.fuzzy.lock().unwrap().clone(),
        };
        Ok(results)
    }
}
