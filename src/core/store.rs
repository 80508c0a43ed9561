// In-process record store: collection name -> ordered record sequence.
use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::core::record::Record;

/// A volatile mapping from collection name to an ordered sequence of records.
///
/// The store is seeded at construction and mutable only as a whole: there are
/// no per-record insert, update, or delete operations. `discard` empties it.
#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    collections: HashMap<String, Vec<Record>>,
}

impl RecordStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Seed a store from pre-built collections.
    pub fn new(collections: HashMap<String, Vec<Record>>) -> Self {
        Self { collections }
    }

    /// A store pre-populated with the two fixed demonstration collections.
    pub fn with_demo_records() -> Self {
        let mut collections = HashMap::new();
        collections.insert(
            "users".to_string(),
            vec![
                demo_record(&[("id", "1"), ("first_name", "John"), ("last_name", "Doe")]),
                demo_record(&[("id", "2"), ("first_name", "Jane"), ("last_name", "Doe")]),
            ],
        );
        collections.insert(
            "activities".to_string(),
            vec![
                demo_record(&[("id", "1"), ("user", "1"), ("activity", "reading")]),
                demo_record(&[("id", "2"), ("user", "2"), ("activity", "walking")]),
            ],
        );
        Self { collections }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    pub fn collection(&self, name: &str) -> Option<&[Record]> {
        self.collections.get(name).map(Vec::as_slice)
    }

    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Replace the store's contents with an empty mapping. Idempotent.
    pub fn discard(&mut self) {
        self.collections = HashMap::new();
    }
}

fn demo_record(pairs: &[(&str, &str)]) -> Record {
    let mut fields = Map::new();
    for (name, value) in pairs {
        fields.insert((*name).to_string(), Value::String((*value).to_string()));
    }
    Record::new(fields)
}
