//! Purpose: Volatile in-memory data backend; reference implementation of the contract.
//! Exports: `RamBackend`, `RamBackendSettings`.
//! Role: Process-local store for demos and tests; nothing survives the instance.
//! Invariants: The store is seeded at construction only and discarded on close.
//! Invariants: Reads validate the target collection before yielding anything.

use tracing::debug;

use crate::api::backend::{BackendStatus, DEFAULT_READ_CHUNK_SIZE, DataBackend, RecordIter};
use crate::core::error::Error;
use crate::core::query;
use crate::core::store::RecordStore;

#[derive(Clone, Debug)]
pub struct RamBackendSettings {
    /// Collection read when the caller gives no explicit target.
    pub default_collection: String,
    /// Seed the two fixed demonstration collections at construction.
    pub include_demo_records: bool,
    pub read_chunk_size: usize,
}

impl RamBackendSettings {
    pub fn new() -> Self {
        Self {
            default_collection: "users".to_string(),
            include_demo_records: true,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
        }
    }
}

impl Default for RamBackendSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory data backend.
///
/// Owns its store exclusively; reads borrow, close takes `&mut self`, so
/// callers sharing an instance must synchronize externally.
#[derive(Clone, Debug)]
pub struct RamBackend {
    settings: RamBackendSettings,
    store: RecordStore,
}

impl RamBackend {
    pub fn new(settings: RamBackendSettings) -> Self {
        let store = if settings.include_demo_records {
            RecordStore::with_demo_records()
        } else {
            RecordStore::empty()
        };
        Self { settings, store }
    }

    pub fn settings(&self) -> &RamBackendSettings {
        &self.settings
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }
}

impl Default for RamBackend {
    fn default() -> Self {
        Self::new(RamBackendSettings::new())
    }
}

impl DataBackend for RamBackend {
    fn name(&self) -> &'static str {
        "ram"
    }

    fn status(&self) -> BackendStatus {
        // Process memory is always reachable.
        BackendStatus::Ok
    }

    fn read_records<'a>(
        &'a self,
        query: Option<&str>,
        target: Option<&str>,
    ) -> Result<RecordIter<'a>, Error> {
        let target = query::resolve_target(target, &self.settings.default_collection);
        let fetch = query::fetch(&self.store, target, query)?;
        Ok(Box::new(fetch))
    }

    fn close(&mut self) {
        debug!(backend = self.name(), "discarding in-memory store");
        self.store.discard();
    }

    fn read_chunk_size(&self) -> usize {
        self.settings.read_chunk_size
    }
}
