//! Local persistence layer

mod local;

pub use local::{JsonFileStore, LocalStore};
