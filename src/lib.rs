// The binary entry point is main.rs; this file exposes the module tree so
// integration tests and criterion benchmarks can reach it via `wordmem::*`.

pub mod app;
pub mod catalog;
pub mod config;
pub mod event;
pub mod session;
pub mod speech;
pub mod store;
pub mod ui;
pub mod view;
