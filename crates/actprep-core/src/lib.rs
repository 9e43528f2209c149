//! actprep-core — Session state machine, scoring, and domain model.
//!
//! This crate defines the fundamental data model, the test-session state
//! machine, the scoring rules, and the external seams (save-sink, content
//! source) that the rest of the actprep system builds on.

pub mod error;
pub mod model;
pub mod notify;
pub mod scoring;
pub mod session;
pub mod statistics;
pub mod timer;
pub mod traits;

pub use error::SessionError;
pub use session::SessionEngine;
