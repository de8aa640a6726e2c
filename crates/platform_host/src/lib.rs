//! Typed host-domain storage contracts shared by the catalog runtime and browser adapters.
//!
//! This crate is the API-first boundary for client persistence. It exposes the synchronous
//! [`KeyValueStore`] port with in-memory, no-op, and (on native targets) file-backed
//! implementations, typed JSON helpers, and the clock helpers used for id allocation. The
//! `localStorage` adapter lives in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;
pub mod time;

#[cfg(not(target_arch = "wasm32"))]
pub use storage::{FileKeyValueStore, STORE_FILE_NAME};
pub use storage::{
    load_json_with, save_json_with, KeyValueStore, MemoryKeyValueStore, NoopKeyValueStore,
};
pub use time::{next_monotonic_timestamp_ms, next_timestamp_id, unix_time_ms_now};
