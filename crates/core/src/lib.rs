//! `invoiceflow-core` — shared foundation for the invoice pipeline.
//!
//! This crate contains the collaborator error taxonomy, run identifiers, and
//! the monetary comparison tolerance. No pipeline logic lives here.

pub mod error;
pub mod id;
pub mod money;

pub use error::{ExtractionError, IngestError, NotificationError};
pub use id::RunId;
pub use money::{TOLERANCE, approx_eq};
