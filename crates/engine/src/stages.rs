//! The five pipeline stages.
//!
//! Each stage reads the current record, calls exactly one collaborator or
//! validator, and returns a [`StagePatch`]. Stages never fail: a
//! collaborator `Err` becomes a stage-qualified entry in the error log and
//! the pipeline moves on. Later stages must tolerate whatever fields an
//! earlier failure left absent.

use invoiceflow_record::{InvoiceRecord, InvoiceStatus, StagePatch};
use invoiceflow_rules::{ArithmeticValidator, BusinessRulesValidator, DecisionEngine};

use crate::collaborators::{InvoiceExtractor, Notifier, TextExtractor};
use crate::notify::{compose_approval, compose_rejection};

/// Stage 1: extract raw text from the referenced document.
pub fn ingest(extractor: &dyn TextExtractor, record: &InvoiceRecord) -> StagePatch {
    match extractor.extract_text(&record.document_ref) {
        Ok(text) => StagePatch {
            source_text: Some(text),
            ..StagePatch::default()
        },
        Err(e) => StagePatch::error(format!("Ingestion Error: {e}")),
    }
}

/// Stage 2: extract structured invoice data from the raw text.
///
/// Runs even after a failed ingest; the absent text is reported as an
/// error string, not a hard failure.
pub fn extract(extractor: &dyn InvoiceExtractor, record: &InvoiceRecord) -> StagePatch {
    let Some(text) = record.source_text.as_deref().filter(|t| !t.is_empty()) else {
        return StagePatch::error(
            "Extraction Error: No document text available. Ingestion may have failed.",
        );
    };

    match extractor.extract_invoice(text) {
        Ok(data) => data.into_patch(),
        Err(e) => StagePatch::error(format!("Extraction Error: {e}")),
    }
}

/// Stage 3: arithmetic consistency of the extracted figures.
pub fn validate_calculations(record: &InvoiceRecord) -> StagePatch {
    ArithmeticValidator::validate(record)
}

/// Stage 4: organizational policy, including the duplicate ledger.
pub fn validate_business_rules(
    validator: &BusinessRulesValidator,
    record: &InvoiceRecord,
) -> StagePatch {
    validator.validate(record)
}

/// Stage 5: decide, compose, and send the outcome notification.
///
/// The verdict is fixed before the send; a delivery failure is recorded as
/// `notification_error` and never changes the decided status.
pub fn notify(notifier: &dyn Notifier, record: &InvoiceRecord) -> StagePatch {
    let mut patch = DecisionEngine::decide(record);

    let (subject, body) = if patch.status == Some(InvoiceStatus::Approved) {
        compose_approval(record)
    } else {
        compose_rejection(record)
    };

    match notifier.send(&subject, &body, None) {
        Ok(()) => {
            patch.notification_sent = Some(true);
        }
        Err(e) => {
            patch.notification_sent = Some(false);
            patch.notification_error = Some(e.to_string());
        }
    }

    patch
}
