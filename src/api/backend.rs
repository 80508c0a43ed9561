//! Purpose: Define the shared data backend contract and its generic read pipeline.
//! Exports: `DataBackend`, `BackendStatus`, `ReadOptions`, `ReadOutput`, `ReadStream`, `Chunks`.
//! Role: Stable boundary every backend in the family implements; callers swap backends freely.
//! Invariants: `read_records` validates the target before the first record can be pulled.
//! Invariants: The pipeline is lazy and pull-based; no work happens ahead of demand.

use tracing::warn;

use crate::core::error::{Error, ErrorKind};
use crate::core::record::Record;

/// Records grouped per transport batch when no explicit chunk size is given.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 500;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BackendStatus {
    Ok,
    Error,
}

/// Options for the generic read pipeline.
///
/// `max_statements` of `None` or `Some(0)` means unbounded. `chunk_size` and
/// `ignore_errors` never influence which records the backend itself yields;
/// they only shape the transport-facing stream.
#[derive(Clone, Copy, Debug)]
pub struct ReadOptions {
    pub chunk_size: Option<usize>,
    pub raw_output: bool,
    pub ignore_errors: bool,
    pub max_statements: Option<u64>,
}

impl ReadOptions {
    pub fn new() -> Self {
        Self {
            chunk_size: None,
            raw_output: false,
            ignore_errors: false,
            max_statements: None,
        }
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::new()
    }
}

pub type RecordIter<'a> = Box<dyn Iterator<Item = &'a Record> + 'a>;

/// The contract shared by every data backend in the family.
///
/// Implementations supply the raw record-matching primitive
/// (`read_records`); the provided `read` wraps it with statement limiting,
/// raw byte conversion, and error tolerance so all backends present the
/// same stream semantics to callers.
pub trait DataBackend {
    fn name(&self) -> &'static str;

    fn status(&self) -> BackendStatus;

    /// The untransformed record sequence for one read: resolve the target,
    /// fail fast when it does not exist, then lazily yield matching records.
    fn read_records<'a>(
        &'a self,
        query: Option<&str>,
        target: Option<&str>,
    ) -> Result<RecordIter<'a>, Error>;

    /// Release whatever the backend holds. For volatile backends this
    /// discards all records.
    fn close(&mut self);

    /// Records grouped per batch when the caller does not pick a chunk size.
    fn read_chunk_size(&self) -> usize {
        DEFAULT_READ_CHUNK_SIZE
    }

    /// Read records through the generic pipeline.
    fn read<'a>(
        &'a self,
        query: Option<&str>,
        target: Option<&str>,
        options: ReadOptions,
    ) -> Result<ReadStream<'a>, Error> {
        let records = self.read_records(query, target)?;
        let chunk_size = options.chunk_size.unwrap_or_else(|| self.read_chunk_size());
        Ok(ReadStream::new(records, options, chunk_size))
    }
}

/// One element of a read stream: a borrowed record, or its serialized bytes
/// when raw output was requested.
#[derive(Debug, PartialEq)]
pub enum ReadOutput<'a> {
    Record(&'a Record),
    Raw(Vec<u8>),
}

/// Lazy stream over one backend read, with limiting and raw conversion applied.
///
/// Single-use: a conversion error that is not ignored fuses the stream.
pub struct ReadStream<'a> {
    records: RecordIter<'a>,
    options: ReadOptions,
    chunk_size: usize,
    yielded: u64,
    failed: bool,
}

impl std::fmt::Debug for ReadStream<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadStream")
            .field("options", &self.options)
            .field("chunk_size", &self.chunk_size)
            .field("yielded", &self.yielded)
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}

impl<'a> ReadStream<'a> {
    fn new(records: RecordIter<'a>, options: ReadOptions, chunk_size: usize) -> Self {
        Self {
            records,
            options,
            chunk_size: chunk_size.max(1),
            yielded: 0,
            failed: false,
        }
    }

    /// Group the remaining stream into transport batches of the configured
    /// chunk size; the final batch may be partial.
    pub fn chunks(self) -> Chunks<'a> {
        Chunks { stream: self }
    }
}

impl<'a> Iterator for ReadStream<'a> {
    type Item = Result<ReadOutput<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if let Some(max) = self.options.max_statements {
            if max > 0 && self.yielded >= max {
                return None;
            }
        }
        loop {
            let record = self.records.next()?;
            if !self.options.raw_output {
                self.yielded += 1;
                return Some(Ok(ReadOutput::Record(record)));
            }
            match to_raw(record) {
                Ok(bytes) => {
                    self.yielded += 1;
                    return Some(Ok(ReadOutput::Raw(bytes)));
                }
                Err(err) if self.options.ignore_errors => {
                    warn!(error = %err, "skipping record that failed raw conversion");
                    continue;
                }
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

/// Batched view over a read stream. An unignored conversion error aborts the
/// batch in progress.
pub struct Chunks<'a> {
    stream: ReadStream<'a>,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Result<Vec<ReadOutput<'a>>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let size = self.stream.chunk_size;
        let mut batch = Vec::new();
        while batch.len() < size {
            match self.stream.next() {
                Some(Ok(item)) => batch.push(item),
                Some(Err(err)) => return Some(Err(err)),
                None => break,
            }
        }
        if batch.is_empty() { None } else { Some(Ok(batch)) }
    }
}

fn to_raw(record: &Record) -> Result<Vec<u8>, Error> {
    let mut bytes = serde_json::to_vec(record).map_err(|err| {
        Error::new(ErrorKind::Serialization)
            .with_message("record serialization failed")
            .with_source(err)
    })?;
    bytes.push(b'\n');
    Ok(bytes)
}
