// ABOUTME: Library root for deployhelp - exposes the deploy engine for the binary and tests.
// ABOUTME: The main binary is in main.rs.

pub mod compose;
pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod input;
pub mod output;
pub mod plan;
pub mod runner;
pub mod types;
