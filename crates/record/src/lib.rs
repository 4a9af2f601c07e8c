//! `invoiceflow-record` — the per-run invoice state and its patch reducer.
//!
//! One [`InvoiceRecord`] is created per document, owned by the workflow
//! engine for the duration of a run, and evolved additively by applying one
//! [`StagePatch`] per stage.

pub mod data;
pub mod record;

pub use data::InvoiceData;
pub use record::{InvoiceRecord, InvoiceStatus, LineItem, StagePatch};
