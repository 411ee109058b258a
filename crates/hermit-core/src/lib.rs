//! hermit-core - Core library for Hermit
//!
//! This crate contains the shared models, persistence layers, and the
//! cross-device synchronization engine used by all Hermit interfaces.

pub mod cloud;
pub mod companion;
pub mod error;
pub mod events;
pub mod models;
pub mod store;
pub mod sync;
pub mod text;

pub use error::{Error, Result};
pub use models::{Note, NoteId, Settings, SyncStatus};
