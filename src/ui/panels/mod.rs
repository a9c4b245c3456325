// SleepLog - ui/panels/mod.rs

pub mod chat;
pub mod dashboard;
pub mod import_report;
pub mod nav;
