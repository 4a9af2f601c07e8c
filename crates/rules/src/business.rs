use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};

use invoiceflow_record::{InvoiceRecord, StagePatch};

use crate::ledger::DuplicateLedger;

/// Maximum invoice amount that can be auto-approved.
pub const MAX_AUTO_APPROVE_AMOUNT: f64 = 10_000.00;

/// Minimum invoice amount (catches suspicious zero-value invoices).
pub const MIN_INVOICE_AMOUNT: f64 = 0.01;

/// Maximum days the invoice date may lie in the future.
pub const MAX_FUTURE_DAYS: i64 = 7;

/// Maximum days the invoice date may lie in the past.
pub const MAX_PAST_DAYS: i64 = 365;

/// Checks extracted data against organizational policy.
///
/// Four independent checks, all evaluated (no short-circuit): required
/// fields, amount limits, date range, duplicate submission. The duplicate
/// check is the only one with a side effect: a fresh key is registered in
/// the injected [`DuplicateLedger`].
pub struct BusinessRulesValidator {
    ledger: Arc<DuplicateLedger>,
    /// Reference date for the range check; `None` means "today".
    today: Option<NaiveDate>,
}

impl BusinessRulesValidator {
    pub fn new(ledger: Arc<DuplicateLedger>) -> Self {
        Self {
            ledger,
            today: None,
        }
    }

    /// Pin the reference date instead of reading the wall clock.
    /// Prefer this in tests for determinism.
    pub fn with_reference_date(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Validate the record against all business rules.
    ///
    /// Returns a patch setting `business_rules_valid` and appending one
    /// error per violated rule.
    pub fn validate(&self, record: &InvoiceRecord) -> StagePatch {
        let mut errors: Vec<String> = Vec::new();

        let missing = self.missing_required_fields(record);
        if !missing.is_empty() {
            errors.push(format!("Missing required fields: {}", missing.join(", ")));
        }

        if let Some(total) = record.total {
            errors.extend(self.check_amount_limits(total));
        }

        if let Some(invoice_date) = record.invoice_date.as_deref() {
            errors.extend(self.check_invoice_date(invoice_date));
        }

        if let (Some(invoice_number), Some(vendor_name)) = (
            record.invoice_number.as_deref().filter(|s| !s.is_empty()),
            record.vendor_name.as_deref().filter(|s| !s.is_empty()),
        ) {
            if self.ledger.check_and_register(vendor_name, invoice_number) {
                errors.push(format!(
                    "Duplicate invoice detected: {invoice_number} from {vendor_name}"
                ));
            }
        }

        StagePatch {
            business_rules_valid: Some(errors.is_empty()),
            errors,
            ..StagePatch::default()
        }
    }

    /// All required fields that are absent or empty, in declaration order,
    /// reported together in a single error.
    fn missing_required_fields(&self, record: &InvoiceRecord) -> Vec<&'static str> {
        fn filled(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|s| !s.is_empty())
        }

        let required = [
            ("invoice_number", filled(&record.invoice_number)),
            ("vendor_name", filled(&record.vendor_name)),
            ("invoice_date", filled(&record.invoice_date)),
            ("total", record.total.is_some()),
        ];

        required
            .into_iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| name)
            .collect()
    }

    fn check_amount_limits(&self, total: f64) -> Vec<String> {
        let mut errors = Vec::new();

        if total < MIN_INVOICE_AMOUNT {
            errors.push(format!(
                "Invoice amount ${total:.2} is below minimum (${MIN_INVOICE_AMOUNT:.2})"
            ));
        }

        if total > MAX_AUTO_APPROVE_AMOUNT {
            errors.push(format!(
                "Invoice amount ${total:.2} exceeds auto-approval limit \
                 (${MAX_AUTO_APPROVE_AMOUNT:.2}). Manual review required."
            ));
        }

        errors
    }

    fn check_invoice_date(&self, invoice_date: &str) -> Vec<String> {
        let mut errors = Vec::new();

        match NaiveDate::parse_from_str(invoice_date, "%Y-%m-%d") {
            Ok(parsed) => {
                let today = self.today.unwrap_or_else(|| Utc::now().date_naive());

                if parsed > today + Duration::days(MAX_FUTURE_DAYS) {
                    errors.push(format!(
                        "Invoice date {invoice_date} is too far in the future \
                         (max {MAX_FUTURE_DAYS} days ahead)"
                    ));
                }

                if parsed < today - Duration::days(MAX_PAST_DAYS) {
                    errors.push(format!(
                        "Invoice date {invoice_date} is too old \
                         (max {MAX_PAST_DAYS} days in the past)"
                    ));
                }
            }
            Err(_) => {
                errors.push(format!(
                    "Invalid date format: {invoice_date}. Expected YYYY-MM-DD."
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoiceflow_record::LineItem;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn validator() -> BusinessRulesValidator {
        BusinessRulesValidator::new(Arc::new(DuplicateLedger::new())).with_reference_date(today())
    }

    fn complete_record() -> InvoiceRecord {
        let mut record = InvoiceRecord::new("doc");
        record.invoice_number = Some("INV-2024-001".to_string());
        record.vendor_name = Some("Acme Corp".to_string());
        record.invoice_date = Some("2024-06-01".to_string());
        record.line_items = vec![LineItem {
            description: "Widgets".to_string(),
            quantity: 2.0,
            unit_price: 10.0,
            total: 20.0,
        }];
        record.subtotal = Some(20.0);
        record.tax_amount = Some(2.0);
        record.total = Some(22.0);
        record
    }

    #[test]
    fn complete_record_passes_all_rules() {
        let patch = validator().validate(&complete_record());
        assert_eq!(patch.business_rules_valid, Some(true));
        assert!(patch.errors.is_empty());
    }

    #[test]
    fn missing_fields_are_aggregated_into_one_error() {
        let mut record = complete_record();
        record.invoice_number = None;
        record.total = None;

        let patch = validator().validate(&record);
        assert_eq!(patch.business_rules_valid, Some(false));
        assert!(
            patch
                .errors
                .contains(&"Missing required fields: invoice_number, total".to_string())
        );
        // Exactly one aggregated missing-fields entry.
        assert_eq!(
            patch
                .errors
                .iter()
                .filter(|e| e.starts_with("Missing required fields"))
                .count(),
            1
        );
    }

    #[test]
    fn all_missing_fields_report_in_declaration_order() {
        let record = InvoiceRecord::new("doc");
        let patch = validator().validate(&record);
        assert!(patch.errors.contains(
            &"Missing required fields: invoice_number, vendor_name, invoice_date, total"
                .to_string()
        ));
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let mut record = complete_record();
        record.vendor_name = Some(String::new());

        let patch = validator().validate(&record);
        assert!(
            patch
                .errors
                .iter()
                .any(|e| e.contains("Missing required fields: vendor_name"))
        );
    }

    #[test]
    fn below_minimum_amount_is_rejected() {
        let mut record = complete_record();
        record.total = Some(0.0);

        let patch = validator().validate(&record);
        assert!(
            patch
                .errors
                .iter()
                .any(|e| e.contains("below minimum ($0.01)"))
        );
    }

    #[test]
    fn above_auto_approval_limit_requires_manual_review() {
        let mut record = complete_record();
        record.total = Some(10_000.01);

        let patch = validator().validate(&record);
        assert_eq!(patch.business_rules_valid, Some(false));
        assert!(
            patch
                .errors
                .iter()
                .any(|e| e.contains("exceeds auto-approval limit ($10000.00)")
                    && e.contains("Manual review required"))
        );
    }

    #[test]
    fn amount_at_limit_is_accepted() {
        let mut record = complete_record();
        record.total = Some(10_000.00);

        let patch = validator().validate(&record);
        assert_eq!(patch.business_rules_valid, Some(true));
    }

    #[test]
    fn date_far_in_the_past_yields_exactly_one_too_old_error() {
        let mut record = complete_record();
        // 400 days before the reference date.
        record.invoice_date = Some("2023-05-12".to_string());

        let patch = validator().validate(&record);
        let date_errors: Vec<_> = patch
            .errors
            .iter()
            .filter(|e| e.contains("Invoice date"))
            .collect();
        assert_eq!(date_errors.len(), 1);
        assert!(date_errors[0].contains("too old (max 365 days in the past)"));
    }

    #[test]
    fn date_too_far_in_the_future_is_rejected() {
        let mut record = complete_record();
        record.invoice_date = Some("2024-06-30".to_string());

        let patch = validator().validate(&record);
        assert!(
            patch
                .errors
                .iter()
                .any(|e| e.contains("too far in the future (max 7 days ahead)"))
        );
    }

    #[test]
    fn date_within_both_bounds_is_accepted() {
        let mut record = complete_record();
        record.invoice_date = Some("2024-06-22".to_string());

        let patch = validator().validate(&record);
        assert_eq!(patch.business_rules_valid, Some(true));
    }

    #[test]
    fn unparsable_date_yields_format_error() {
        let mut record = complete_record();
        record.invoice_date = Some("06/01/2024".to_string());

        let patch = validator().validate(&record);
        assert!(
            patch
                .errors
                .contains(&"Invalid date format: 06/01/2024. Expected YYYY-MM-DD.".to_string())
        );
    }

    #[test]
    fn second_submission_with_same_key_is_a_duplicate() {
        let ledger = Arc::new(DuplicateLedger::new());
        let validator = BusinessRulesValidator::new(Arc::clone(&ledger))
            .with_reference_date(today());

        let first = validator.validate(&complete_record());
        assert_eq!(first.business_rules_valid, Some(true));

        let second = validator.validate(&complete_record());
        assert_eq!(second.business_rules_valid, Some(false));
        assert!(
            second
                .errors
                .contains(&"Duplicate invoice detected: INV-2024-001 from Acme Corp".to_string())
        );

        // A distinct key never triggers the duplicate check.
        let mut other = complete_record();
        other.invoice_number = Some("INV-2024-002".to_string());
        let third = validator.validate(&other);
        assert_eq!(third.business_rules_valid, Some(true));
    }

    #[test]
    fn duplicate_is_not_reregistered() {
        let ledger = Arc::new(DuplicateLedger::new());
        let validator = BusinessRulesValidator::new(Arc::clone(&ledger))
            .with_reference_date(today());

        validator.validate(&complete_record());
        validator.validate(&complete_record());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn missing_identity_skips_duplicate_check() {
        let ledger = Arc::new(DuplicateLedger::new());
        let validator = BusinessRulesValidator::new(Arc::clone(&ledger))
            .with_reference_date(today());

        let mut record = complete_record();
        record.vendor_name = None;
        let patch = validator.validate(&record);

        assert!(ledger.is_empty());
        // The missing field is still reported through the required check.
        assert!(
            patch
                .errors
                .iter()
                .any(|e| e.contains("vendor_name"))
        );
    }

    #[test]
    fn all_checks_run_even_when_several_fail() {
        let ledger = Arc::new(DuplicateLedger::new());
        let validator = BusinessRulesValidator::new(Arc::clone(&ledger))
            .with_reference_date(today());
        // Seed the ledger so the duplicate check also fires.
        ledger.check_and_register("Acme Corp", "INV-2024-001");

        let mut record = complete_record();
        record.total = Some(20_000.0);
        record.invoice_date = Some("2022-01-01".to_string());

        let patch = validator.validate(&record);
        assert!(patch.errors.iter().any(|e| e.contains("auto-approval")));
        assert!(patch.errors.iter().any(|e| e.contains("too old")));
        assert!(patch.errors.iter().any(|e| e.contains("Duplicate invoice")));
        assert_eq!(patch.business_rules_valid, Some(false));
    }
}
