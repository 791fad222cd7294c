//! Storage layer for qatrack
//!
//! This crate implements the embedded document backend:
//! - ShardedStore: DashMap of per-collection shards, BTreeMap within
//! - Atomic conditional insert for admission checks
//! - Version management with AtomicU64
//! - Snapshot files: write-fsync-rename JSON persistence

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod sharded;
pub mod snapshot;

pub use sharded::{Shard, ShardedStore};
pub use snapshot::{read_snapshot, write_snapshot};
