//! Cross-device synchronization

mod engine;
mod status;

pub use engine::{RemoteChangeNotifier, SyncEngine};
pub use status::SyncStatusTracker;
