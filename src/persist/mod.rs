//! Persistence adapters
//!
//! Durable key-value boundary used by the coverage ledger and schema store.
//! State is stored as one JSON blob per key; the backing store is swappable
//! through the [`StateStore`] trait.
//!
//! # Overview
//!
//! - `StateStore` - Object-safe load/save/remove contract
//! - `FileStore` - One file per key with atomic temp-then-rename writes
//! - `MemoryStore` - In-process map, for tests and ephemeral sessions

mod adapter;

pub use adapter::{FileStore, MemoryStore, StateStore};
