// SleepLog - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library, chrono, serde, csv.
// Must NOT depend on: ui, platform, app, or the filesystem directly.

pub mod export;
pub mod filter;
pub mod importer;
pub mod model;
pub mod store;
pub mod summary;
