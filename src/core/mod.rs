// Core modules implementing the record model, store, query engine, and error modeling.
pub mod error;
pub mod query;
pub mod record;
pub mod store;
