//! Tracing/logging setup shared by anything embedding the pipeline.

pub mod tracing;

pub use self::tracing::{init, init_compact};
