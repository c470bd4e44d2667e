// Adapters layer: concrete implementations for external systems.

pub mod local;

pub use local::LocalFileStore;
