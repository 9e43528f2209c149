//! Fire-and-forget delivery to a save-sink.
//!
//! The session core commits attempts locally first; durable copies are
//! pushed from here on a best-effort, at-least-once basis. A failed save
//! is logged and dropped — it never blocks, rolls back, or invalidates
//! the in-memory session.

use std::sync::Arc;

use actprep_core::traits::{SaveRecord, SaveSink};

/// Hands records to a sink on background tasks.
#[derive(Clone)]
pub struct Recorder {
    sink: Arc<dyn SaveSink>,
}

impl Recorder {
    pub fn new(sink: Arc<dyn SaveSink>) -> Self {
        Self { sink }
    }

    /// Queue one record for delivery and return immediately.
    pub fn record(&self, record: SaveRecord) {
        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            if let Err(e) = sink.save(&record).await {
                tracing::warn!(
                    kind = record.kind(),
                    sink = sink.name(),
                    "save failed: {e:#}"
                );
            }
        });
    }

}
