use invoiceflow_record::{InvoiceRecord, InvoiceStatus, StagePatch};

/// Combines validator outcomes into the final verdict.
pub struct DecisionEngine;

impl DecisionEngine {
    /// Whether the record qualifies for approval.
    ///
    /// The empty-error-log conjunct is deliberate belt-and-braces: an error
    /// appended by any upstream stage (ingestion, extraction) forces
    /// rejection even though neither validator flagged it.
    pub fn is_approved(record: &InvoiceRecord) -> bool {
        record.calculations_valid && record.business_rules_valid && record.errors.is_empty()
    }

    /// Compute the verdict, exactly once, strictly after both validators.
    ///
    /// On rejection the patch carries a copy of the full accumulated error
    /// list as the rejection reasons.
    pub fn decide(record: &InvoiceRecord) -> StagePatch {
        if Self::is_approved(record) {
            StagePatch {
                status: Some(InvoiceStatus::Approved),
                ..StagePatch::default()
            }
        } else {
            StagePatch {
                status: Some(InvoiceStatus::Rejected),
                rejection_reasons: Some(record.errors.clone()),
                ..StagePatch::default()
            }
        }
    }
}
