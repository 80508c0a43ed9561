// End-to-end coverage of the RAM backend through the public API.
use serde_json::{Value, json};
use silo::api::{
    BackendStatus, DataBackend, ErrorKind, RamBackend, RamBackendSettings, ReadOptions, ReadOutput,
};

fn read_values(backend: &RamBackend, query: Option<&str>, target: Option<&str>) -> Vec<Value> {
    backend
        .read(query, target, ReadOptions::new())
        .expect("read")
        .map(|item| match item.expect("item") {
            ReadOutput::Record(record) => serde_json::to_value(record).expect("json"),
            ReadOutput::Raw(_) => panic!("expected structured output"),
        })
        .collect()
}

#[test]
fn default_instantiation_seeds_the_demo_collections() {
    let backend = RamBackend::default();
    assert_eq!(backend.name(), "ram");
    assert_eq!(backend.settings().default_collection, "users");
    assert!(backend.settings().include_demo_records);
    assert_eq!(backend.settings().read_chunk_size, 500);

    let store = backend.store();
    assert_eq!(store.collection_count(), 2);
    assert!(store.contains("users"));
    assert!(store.contains("activities"));
}

#[test]
fn instantiation_without_demo_records_is_empty() {
    let settings = RamBackendSettings {
        default_collection: "activities".to_string(),
        include_demo_records: false,
        read_chunk_size: 1,
    };
    let backend = RamBackend::new(settings);
    assert!(backend.store().is_empty());
    assert_eq!(backend.settings().default_collection, "activities");
    assert_eq!(backend.read_chunk_size(), 1);
}

#[test]
fn status_is_always_ok() {
    assert_eq!(RamBackend::default().status(), BackendStatus::Ok);

    let mut backend = RamBackend::default();
    backend.close();
    assert_eq!(backend.status(), BackendStatus::Ok);
}

#[test]
fn read_with_target_yields_that_collection_in_order() {
    let backend = RamBackend::default();
    assert_eq!(
        read_values(&backend, None, Some("activities")),
        vec![
            json!({"id": "1", "user": "1", "activity": "reading"}),
            json!({"id": "2", "user": "2", "activity": "walking"}),
        ]
    );
}

#[test]
fn read_without_target_uses_the_default_collection() {
    let backend = RamBackend::default();
    assert_eq!(
        read_values(&backend, None, None),
        vec![
            json!({"id": "1", "first_name": "John", "last_name": "Doe"}),
            json!({"id": "2", "first_name": "Jane", "last_name": "Doe"}),
        ]
    );
}

#[test]
fn read_with_query_filters_by_identity() {
    let backend = RamBackend::default();
    assert_eq!(
        read_values(&backend, Some("1"), None),
        vec![json!({"id": "1", "first_name": "John", "last_name": "Doe"})]
    );
    assert_eq!(
        read_values(&backend, Some("2"), None),
        vec![json!({"id": "2", "first_name": "Jane", "last_name": "Doe"})]
    );
    // No match is an empty sequence, not an error.
    assert!(read_values(&backend, Some("3"), None).is_empty());
}

#[test]
fn read_with_invalid_target_fails_before_yielding() {
    let backend = RamBackend::default();
    let err = backend
        .read(None, Some("not_users"), ReadOptions::new())
        .expect_err("err");
    assert_eq!(err.kind(), ErrorKind::Parameter);
    assert_eq!(err.target(), Some("not_users"));
}

#[test]
fn unseeded_backend_rejects_every_target() {
    let settings = RamBackendSettings {
        include_demo_records: false,
        ..RamBackendSettings::new()
    };
    let backend = RamBackend::new(settings);
    for target in [None, Some("users"), Some("activities")] {
        let err = backend
            .read(None, target, ReadOptions::new())
            .expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Parameter);
    }
}

#[test]
fn close_discards_the_store() {
    let mut backend = RamBackend::default();
    backend.close();
    assert!(backend.store().is_empty());

    let err = backend
        .read(None, Some("users"), ReadOptions::new())
        .expect_err("err");
    assert_eq!(err.kind(), ErrorKind::Parameter);

    // Idempotent.
    backend.close();
    assert!(backend.store().is_empty());
}

#[test]
fn repeated_reads_rescan_independently() {
    let backend = RamBackend::default();
    let first = read_values(&backend, None, Some("users"));
    let second = read_values(&backend, None, Some("users"));
    assert_eq!(first, second);
}

#[test]
fn dropping_a_read_early_is_safe() {
    let backend = RamBackend::default();
    let mut stream = backend
        .read(None, Some("users"), ReadOptions::new())
        .expect("read");
    assert!(stream.next().is_some());
    drop(stream);

    assert_eq!(read_values(&backend, None, Some("users")).len(), 2);
}

#[test]
fn max_statements_bounds_the_stream() {
    let backend = RamBackend::default();
    let mut options = ReadOptions::new();
    options.max_statements = Some(1);
    let items: Vec<_> = backend
        .read(None, Some("users"), options)
        .expect("read")
        .collect();
    assert_eq!(items.len(), 1);
}

#[test]
fn raw_output_yields_newline_delimited_json() {
    let backend = RamBackend::default();
    let mut options = ReadOptions::new();
    options.raw_output = true;
    let lines: Vec<Vec<u8>> = backend
        .read(None, Some("activities"), options)
        .expect("read")
        .map(|item| match item.expect("item") {
            ReadOutput::Raw(bytes) => bytes,
            ReadOutput::Record(_) => panic!("expected raw output"),
        })
        .collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|line| line.ends_with(b"\n")));

    let first: Value = serde_json::from_slice(&lines[0]).expect("json");
    assert_eq!(first, json!({"id": "1", "user": "1", "activity": "reading"}));
}

#[test]
fn chunked_reads_honor_the_backend_chunk_size() {
    let settings = RamBackendSettings {
        read_chunk_size: 1,
        ..RamBackendSettings::new()
    };
    let backend = RamBackend::new(settings);
    let batches: Vec<usize> = backend
        .read(None, Some("users"), ReadOptions::new())
        .expect("read")
        .chunks()
        .map(|batch| batch.expect("batch").len())
        .collect();
    assert_eq!(batches, [1, 1]);
}

#[test]
fn explicit_chunk_size_overrides_the_backend_default() {
    let backend = RamBackend::default();
    let mut options = ReadOptions::new();
    options.chunk_size = Some(2);
    let batches: Vec<usize> = backend
        .read(None, Some("users"), options)
        .expect("read")
        .chunks()
        .map(|batch| batch.expect("batch").len())
        .collect();
    assert_eq!(batches, [2]);
}
