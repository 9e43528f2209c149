//! Mock store for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use actprep_core::traits::{SaveRecord, SaveSink};

/// A mock save-sink that records every save without real I/O.
///
/// Can be told to fail, for exercising the non-fatal error path.
pub struct MockStore {
    saved: Mutex<Vec<SaveRecord>>,
    call_count: AtomicU32,
    fail: bool,
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            call_count: AtomicU32::new(0),
            fail: false,
        }
    }

    /// A mock whose every save fails.
    pub fn failing() -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            call_count: AtomicU32::new(0),
            fail: true,
        }
    }

    /// Number of save calls made, successful or not.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Copies of every successfully saved record, in order.
    pub fn saved(&self) -> Vec<SaveRecord> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl SaveSink for MockStore {
    fn name(&self) -> &str {
        "mock"
    }

    async fn save(&self, record: &SaveRecord) -> anyhow::Result<()> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if self.fail {
            anyhow::bail!("mock store configured to fail");
        }
        self.saved.lock().unwrap().push(record.clone());
        Ok(())
    }
}
