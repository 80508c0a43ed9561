// Target resolution and the lazy fetch iterator over one collection.
use tracing::debug;

use crate::core::error::{Error, ErrorKind};
use crate::core::record::Record;
use crate::core::store::RecordStore;

/// Resolve the collection a read targets: the requested name when given,
/// the configured default otherwise.
pub fn resolve_target<'a>(requested: Option<&'a str>, default: &'a str) -> &'a str {
    requested.unwrap_or(default)
}

/// Start a lazy scan of `target`, optionally filtered by record identity.
///
/// The target-existence check happens here, before the first record can be
/// pulled; a missing collection is a parameter error, never a deferred one.
pub fn fetch<'a>(
    store: &'a RecordStore,
    target: &str,
    id: Option<&str>,
) -> Result<Fetch<'a>, Error> {
    let records = store.collection(target).ok_or_else(|| {
        Error::new(ErrorKind::Parameter)
            .with_message("target collection does not exist")
            .with_target(target)
    })?;
    debug!(collection = target, records = records.len(), "fetch");
    Ok(Fetch {
        records: records.iter(),
        id: id.map(str::to_string),
    })
}

/// Lazy, single-use traversal over one collection's records.
///
/// Holds only a position into the already-resident collection; dropping it
/// early releases nothing because nothing is held.
#[derive(Debug)]
pub struct Fetch<'a> {
    records: std::slice::Iter<'a, Record>,
    id: Option<String>,
}

impl<'a> Iterator for Fetch<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        match &self.id {
            None => self.records.next(),
            Some(id) => self
                .records
                .by_ref()
                .find(|record| record.id() == Some(id.as_str())),
        }
    }
}
