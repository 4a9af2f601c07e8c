use serde::{Deserialize, Serialize};

/// Final verdict for one processed invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Approved,
    Rejected,
}

/// A single line item on an invoice.
///
/// Line items have no identity beyond their position in the sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    /// Quantity of items (can be fractional for hours etc.).
    pub quantity: f64,
    pub unit_price: f64,
    /// Total for this line (quantity * unit_price as stated on the invoice).
    pub total: f64,
}

/// The shared per-run state, threaded through every stage.
///
/// Owned exclusively by the workflow engine for the duration of one run and
/// never shared across concurrent runs. Mutation happens only through
/// [`InvoiceRecord::apply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Reference to the uploaded document (path or identifier).
    pub document_ref: String,

    /// Raw text extracted from the document; absent if ingestion failed.
    pub source_text: Option<String>,

    pub invoice_number: Option<String>,
    pub vendor_name: Option<String>,
    pub vendor_address: Option<String>,
    pub customer_name: Option<String>,
    pub customer_address: Option<String>,

    /// Calendar dates kept in `YYYY-MM-DD` textual form.
    pub invoice_date: Option<String>,
    pub due_date: Option<String>,

    pub line_items: Vec<LineItem>,
    pub subtotal: Option<f64>,
    /// Tax rate as a fraction (0.10 for 10%).
    pub tax_rate: Option<f64>,
    pub tax_amount: Option<f64>,
    pub total: Option<f64>,
    pub currency: String,

    /// Set once by the arithmetic validator.
    pub calculations_valid: bool,
    /// Set once by the business-rules validator.
    pub business_rules_valid: bool,

    /// Append-only error log; never truncated or reset within a run.
    pub errors: Vec<String>,

    /// Computed exactly once, strictly after both validators have run.
    pub status: Option<InvoiceStatus>,
    /// Copy of the error log at decision time, populated on rejection.
    pub rejection_reasons: Option<Vec<String>>,

    pub notification_sent: bool,
    pub notification_error: Option<String>,
}

impl InvoiceRecord {
    /// Fresh record with only the document reference populated.
    pub fn new(document_ref: impl Into<String>) -> Self {
        Self {
            document_ref: document_ref.into(),
            source_text: None,
            invoice_number: None,
            vendor_name: None,
            vendor_address: None,
            customer_name: None,
            customer_address: None,
            invoice_date: None,
            due_date: None,
            line_items: Vec::new(),
            subtotal: None,
            tax_rate: None,
            tax_amount: None,
            total: None,
            currency: "USD".to_string(),
            calculations_valid: false,
            business_rules_valid: false,
            errors: Vec::new(),
            status: None,
            rejection_reasons: None,
            notification_sent: false,
            notification_error: None,
        }
    }

    /// Merge one stage's output into the record.
    ///
    /// Scalar fields overwrite when the patch carries a value; the `errors`
    /// field is concatenated onto the existing log, never replaced. This is
    /// the only reducer in the pipeline.
    pub fn apply(&mut self, patch: StagePatch) {
        if let Some(v) = patch.source_text {
            self.source_text = Some(v);
        }
        if let Some(v) = patch.invoice_number {
            self.invoice_number = Some(v);
        }
        if let Some(v) = patch.vendor_name {
            self.vendor_name = Some(v);
        }
        if let Some(v) = patch.vendor_address {
            self.vendor_address = Some(v);
        }
        if let Some(v) = patch.customer_name {
            self.customer_name = Some(v);
        }
        if let Some(v) = patch.customer_address {
            self.customer_address = Some(v);
        }
        if let Some(v) = patch.invoice_date {
            self.invoice_date = Some(v);
        }
        if let Some(v) = patch.due_date {
            self.due_date = Some(v);
        }
        if let Some(v) = patch.line_items {
            self.line_items = v;
        }
        if let Some(v) = patch.subtotal {
            self.subtotal = Some(v);
        }
        if let Some(v) = patch.tax_rate {
            self.tax_rate = Some(v);
        }
        if let Some(v) = patch.tax_amount {
            self.tax_amount = Some(v);
        }
        if let Some(v) = patch.total {
            self.total = Some(v);
        }
        if let Some(v) = patch.currency {
            self.currency = v;
        }
        if let Some(v) = patch.calculations_valid {
            self.calculations_valid = v;
        }
        if let Some(v) = patch.business_rules_valid {
            self.business_rules_valid = v;
        }
        if let Some(v) = patch.status {
            self.status = Some(v);
        }
        if let Some(v) = patch.rejection_reasons {
            self.rejection_reasons = Some(v);
        }
        if let Some(v) = patch.notification_sent {
            self.notification_sent = v;
        }
        if let Some(v) = patch.notification_error {
            self.notification_error = Some(v);
        }

        self.errors.extend(patch.errors);
    }
}

/// Typed partial update produced by one stage.
///
/// `None` means "leave the field alone"; `errors` is always appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StagePatch {
    pub source_text: Option<String>,
    pub invoice_number: Option<String>,
    pub vendor_name: Option<String>,
    pub vendor_address: Option<String>,
    pub customer_name: Option<String>,
    pub customer_address: Option<String>,
    pub invoice_date: Option<String>,
    pub due_date: Option<String>,
    pub line_items: Option<Vec<LineItem>>,
    pub subtotal: Option<f64>,
    pub tax_rate: Option<f64>,
    pub tax_amount: Option<f64>,
    pub total: Option<f64>,
    pub currency: Option<String>,
    pub calculations_valid: Option<bool>,
    pub business_rules_valid: Option<bool>,
    pub status: Option<InvoiceStatus>,
    pub rejection_reasons: Option<Vec<String>>,
    pub notification_sent: Option<bool>,
    pub notification_error: Option<String>,
    pub errors: Vec<String>,
}

impl StagePatch {
    /// Patch carrying only one appended error.
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            errors: vec![msg.into()],
            ..Self::default()
        }
    }

    /// Patch carrying only appended errors.
    pub fn errors(errors: Vec<String>) -> Self {
        Self {
            errors,
            ..Self::default()
        }
    }
}
