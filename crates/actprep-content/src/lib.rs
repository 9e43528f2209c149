//! actprep-content — Passage content sources.
//!
//! Implements the `ContentSource` seam twice: a built-in static bundle of
//! practice passages, and an in-memory catalog for authored content with
//! passage/question management.

pub mod bundle;
pub mod catalog;

pub use bundle::StaticBundle;
pub use catalog::{Catalog, PassagePatch, QuestionPatch};
