//! Dataset module
//!
//! Loads the record file served by `/sensor-data` into an immutable snapshot.
//!
//! Handlers never mutate a dataset. Reloading builds a fresh [`Dataset`] and
//! swaps the shared `Arc`, so a request keeps the snapshot it started with.

mod store;
mod types;

pub use store::{DatasetStore, ReloadPolicy};
pub use types::{Dataset, Record};
