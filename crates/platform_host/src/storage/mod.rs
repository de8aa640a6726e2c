//! Storage-domain contracts and adapters.

#[cfg(not(target_arch = "wasm32"))]
mod file;
mod kv;

#[cfg(not(target_arch = "wasm32"))]
pub use file::{FileKeyValueStore, STORE_FILE_NAME};
pub use kv::{load_json_with, save_json_with, KeyValueStore, MemoryKeyValueStore, NoopKeyValueStore};
