//! Browser (`wasm32`) implementations of [`platform_host`] storage contracts.
//!
//! On non-`wasm32` targets the browser adapter compiles to an inert stub so that host-agnostic
//! crates and their tests build everywhere.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod storage;

pub use adapters::{
    host_strategy_name, key_value_store, key_value_store_for, selected_host_strategy, HostStrategy,
    KeyValueStoreAdapter,
};
pub use storage::local_store::WebKeyValueStore;
