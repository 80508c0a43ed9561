//! Purpose: Define the stable public API surface for the backend family.
//! Exports: The backend contract, read pipeline types, and the RAM backend.
//! Role: Public, additive-only boundary; core modules stay behind this surface.
//! Invariants: This module is the only public path to backend implementations.

mod backend;
mod ram;

pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::query::{Fetch, fetch, resolve_target};
pub use crate::core::record::Record;
pub use crate::core::store::RecordStore;
pub use backend::{
    BackendStatus, Chunks, DEFAULT_READ_CHUNK_SIZE, DataBackend, ReadOptions, ReadOutput,
    ReadStream, RecordIter,
};
pub use ram::{RamBackend, RamBackendSettings};
