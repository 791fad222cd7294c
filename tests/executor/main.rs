//! Executor Layer Tests
//!
//! Tests for the qatrack-executor crate which provides:
//! - Command enum - the instruction set
//! - Output enum - typed results
//! - Executor - stateless command dispatch
//! - Tracker - high-level typed wrapper API

mod common;

mod command_dispatch;
mod error_handling;
mod serialization;
mod tracker_api;
