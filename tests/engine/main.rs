//! Engine Layer Tests
//!
//! Integration tests for qatrack-engine: database lifecycle and
//! persistence, plan quota, cascading delete, dashboard aggregation and
//! concurrent writers.


mod cascade;
mod concurrency;
mod quota;
mod records;
