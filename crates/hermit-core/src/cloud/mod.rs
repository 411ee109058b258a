//! Remote persistence in a cloud-synchronized container

mod container;

pub use container::{CloudContainer, RemoteStore};
