//! The workflow engine: fixed stage order, one record per run.

use std::sync::Arc;

use invoiceflow_core::RunId;
use invoiceflow_record::InvoiceRecord;
use invoiceflow_rules::{BusinessRulesValidator, DuplicateLedger};

use crate::collaborators::{InvoiceExtractor, Notifier, TextExtractor};
use crate::stages;

/// Orchestrates the five stages over one [`InvoiceRecord`].
///
/// The engine owns its collaborators and shares the duplicate ledger across
/// runs. Runs are strictly sequential inside; independent records may run
/// concurrently, racing only on the ledger's critical section.
pub struct WorkflowEngine<T, X, N>
where
    T: TextExtractor,
    X: InvoiceExtractor,
    N: Notifier,
{
    text_extractor: T,
    invoice_extractor: X,
    notifier: N,
    business_rules: BusinessRulesValidator,
}

impl<T, X, N> WorkflowEngine<T, X, N>
where
    T: TextExtractor,
    X: InvoiceExtractor,
    N: Notifier,
{
    pub fn new(
        text_extractor: T,
        invoice_extractor: X,
        notifier: N,
        ledger: Arc<DuplicateLedger>,
    ) -> Self {
        Self {
            text_extractor,
            invoice_extractor,
            notifier,
            business_rules: BusinessRulesValidator::new(ledger),
        }
    }

    /// Replace the business-rules validator (e.g. to pin its reference date).
    pub fn with_business_rules(mut self, business_rules: BusinessRulesValidator) -> Self {
        self.business_rules = business_rules;
        self
    }

    /// Process one document through all five stages, in order, skipping
    /// none. Returns the terminal record; the caller formats it for display
    /// or persistence, then discards it.
    pub fn run(&self, document_ref: impl Into<String>) -> InvoiceRecord {
        let run_id = RunId::new();
        let mut record = InvoiceRecord::new(document_ref);

        tracing::info!("run {run_id}: processing {}", record.document_ref);

        self.apply_stage(&mut record, run_id, "ingest", |r| {
            stages::ingest(&self.text_extractor, r)
        });
        self.apply_stage(&mut record, run_id, "extract", |r| {
            stages::extract(&self.invoice_extractor, r)
        });
        self.apply_stage(&mut record, run_id, "validate_calculations", |r| {
            stages::validate_calculations(r)
        });
        self.apply_stage(&mut record, run_id, "validate_business_rules", |r| {
            stages::validate_business_rules(&self.business_rules, r)
        });
        self.apply_stage(&mut record, run_id, "notify", |r| {
            stages::notify(&self.notifier, r)
        });

        tracing::info!(
            "run {run_id}: finished with status {:?} ({} errors)",
            record.status,
            record.errors.len()
        );

        record
    }

    /// Run one stage and merge its patch through the record's reducer.
    fn apply_stage<F>(&self, record: &mut InvoiceRecord, run_id: RunId, stage: &str, f: F)
    where
        F: FnOnce(&InvoiceRecord) -> invoiceflow_record::StagePatch,
    {
        let patch = f(record);

        if patch.errors.is_empty() {
            tracing::info!("run {run_id}: stage {stage} complete");
        } else {
            tracing::warn!(
                "run {run_id}: stage {stage} appended {} error(s): {:?}",
                patch.errors.len(),
                patch.errors
            );
        }

        record.apply(patch);
    }
}
