//! Persistence adapter abstractions and implementations.
//!
//! # Responsibility
//! - Define the key-value storage contract used by the document store.
//! - Isolate SQLite details from service orchestration.
//!
//! # Invariants
//! - Adapters perform no logic beyond durable get/set of serialized blobs.
//! - Key absence means "first run"; adapters never synthesize defaults.

pub mod kv_store;
