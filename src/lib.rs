//! Core library for opsboard: task-assignment lifecycle, performance
//! metrics, daily archival and JSON persistence for a small operations team.

pub mod archive;
pub mod commands;
pub mod defaults;
pub mod export;
pub mod lifecycle;
pub mod models;
pub mod performance;
pub mod storage;
pub mod store;
pub mod timeutil;
pub mod tui;
