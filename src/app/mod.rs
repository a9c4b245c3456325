// SleepLog - app/mod.rs
//
// Application layer: event handling, import orchestration, state.
// Dependencies: core layer, platform layer.
// Must NOT depend on: ui.

pub mod event;
pub mod import;
pub mod state;
