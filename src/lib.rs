//! Library crate for port-scan-rs exposing the scan engine modules.
pub mod probe;
pub mod scanner;
pub mod services;
pub mod summary;
pub mod types;
