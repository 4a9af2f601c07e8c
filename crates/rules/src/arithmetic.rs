use invoiceflow_core::approx_eq;
use invoiceflow_record::{InvoiceRecord, StagePatch};

/// Checks internal numeric consistency of extracted invoice data.
///
/// Every comparison uses the fixed absolute tolerance from
/// `invoiceflow_core::TOLERANCE`. Checks are independent and additive:
/// absence of an optional field silently skips its check rather than
/// failing it. That leniency is policy, not an oversight — partially
/// extracted invoices still get every check their data supports.
pub struct ArithmeticValidator;

impl ArithmeticValidator {
    /// Validate all invoice calculations.
    ///
    /// 1. Each line item: quantity * unit_price = total.
    /// 2. Subtotal = sum of line item totals.
    /// 3. Tax = subtotal * tax_rate (when a rate is present).
    /// 4. Total = subtotal + tax_amount.
    ///
    /// Returns a patch setting `calculations_valid` and appending one error
    /// per failed check. Pure: the same record always yields the same patch.
    pub fn validate(record: &InvoiceRecord) -> StagePatch {
        let mut errors: Vec<String> = Vec::new();

        // Without line items no arithmetic can be checked at all.
        if record.line_items.is_empty() {
            errors.push("Validation Error: No line items found in invoice".to_string());
            return StagePatch {
                calculations_valid: Some(false),
                errors,
                ..StagePatch::default()
            };
        }

        // Per-item totals, accumulating the stated totals into a subtotal
        // regardless of per-item mismatches.
        let mut computed_subtotal = 0.0;
        for (i, item) in record.line_items.iter().enumerate() {
            let index = i + 1;
            let expected = item.quantity * item.unit_price;

            if !approx_eq(expected, item.total) {
                errors.push(format!(
                    "Line item {index}: Expected total {expected:.2} (qty {} x ${:.2}), but got {:.2}",
                    item.quantity, item.unit_price, item.total
                ));
            }

            computed_subtotal += item.total;
        }

        if let Some(subtotal) = record.subtotal {
            if !approx_eq(computed_subtotal, subtotal) {
                errors.push(format!(
                    "Subtotal mismatch: Sum of line items is {computed_subtotal:.2}, \
                     but subtotal shows {subtotal:.2}"
                ));
            }
        }

        if let (Some(tax_rate), Some(subtotal), Some(tax_amount)) =
            (record.tax_rate, record.subtotal, record.tax_amount)
        {
            let expected_tax = subtotal * tax_rate;
            if !approx_eq(expected_tax, tax_amount) {
                errors.push(format!(
                    "Tax calculation error: Expected {expected_tax:.2} ({subtotal:.2} x {:.1}%), \
                     but got {tax_amount:.2}",
                    tax_rate * 100.0
                ));
            }
        }

        if let (Some(subtotal), Some(tax_amount), Some(total)) =
            (record.subtotal, record.tax_amount, record.total)
        {
            let expected_total = subtotal + tax_amount;
            if !approx_eq(expected_total, total) {
                errors.push(format!(
                    "Total mismatch: Expected {expected_total:.2} \
                     (subtotal {subtotal:.2} + tax {tax_amount:.2}), but got {total:.2}"
                ));
            }
        }

        StagePatch {
            calculations_valid: Some(errors.is_empty()),
            errors,
            ..StagePatch::default()
        }
    }
}
