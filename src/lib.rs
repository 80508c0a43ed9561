//! Purpose: Shared library crate for the `silo` data backend family.
//! Exports: `api` (backend contract + RAM backend) and `core` (records, store, queries, errors).
//! Role: Reference in-memory backend plus the contract every other backend implements.
//! Invariants: Backends are interchangeable behind `api::DataBackend`.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
pub mod core;
