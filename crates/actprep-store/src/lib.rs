//! actprep-store — External persistence backends.
//!
//! Implements the `SaveSink` seam: a REST store speaking a Supabase-style
//! table API, a mock store for tests, and a fire-and-forget recorder that
//! keeps persistence off the session's critical path.

pub mod config;
pub mod error;
pub mod mock;
pub mod recorder;
pub mod rest;

pub use config::{load_config, StoreConfig};
pub use error::StoreError;
pub use mock::MockStore;
pub use recorder::Recorder;
pub use rest::RestStore;
