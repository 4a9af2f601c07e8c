//! `invoiceflow-engine` — the five-stage workflow and its collaborators.
//!
//! The engine runs ingest → extract → validate-calculations →
//! validate-business-rules → notify in fixed order, threading one
//! [`invoiceflow_record::InvoiceRecord`] through every stage and merging
//! each stage's patch with the record's single reducer. No stage is
//! retried, no stage is skipped, and collaborator failures become error
//! log entries rather than aborts.

pub mod collaborators;
pub mod notify;
pub mod stages;
pub mod workflow;

pub use collaborators::{InvoiceExtractor, Notifier, TextExtractor};
pub use workflow::WorkflowEngine;
