use serde::{Deserialize, Serialize};

use crate::record::{LineItem, StagePatch};

fn default_currency() -> String {
    "USD".to_string()
}

/// Fully-typed result of structured extraction.
///
/// This is the shape the extraction collaborator must return: required
/// identification, dates and totals, optional everything else. It converts
/// into a [`StagePatch`] so the extract stage can merge it through the
/// normal reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceData {
    /// Unique invoice identifier (e.g. INV-2024-001).
    pub invoice_number: String,
    pub vendor_name: String,
    #[serde(default)]
    pub vendor_address: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_address: Option<String>,

    /// Issue date in `YYYY-MM-DD` form.
    pub invoice_date: String,
    #[serde(default)]
    pub due_date: Option<String>,

    pub line_items: Vec<LineItem>,
    pub subtotal: f64,
    /// Tax rate as a fraction (0.10 for 10%).
    #[serde(default)]
    pub tax_rate: Option<f64>,
    pub tax_amount: f64,
    pub total: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl InvoiceData {
    /// Convert extracted data into a patch for the merge reducer.
    pub fn into_patch(self) -> StagePatch {
        StagePatch {
            invoice_number: Some(self.invoice_number),
            vendor_name: Some(self.vendor_name),
            vendor_address: self.vendor_address,
            customer_name: self.customer_name,
            customer_address: self.customer_address,
            invoice_date: Some(self.invoice_date),
            due_date: self.due_date,
            line_items: Some(self.line_items),
            subtotal: Some(self.subtotal),
            tax_rate: self.tax_rate,
            tax_amount: Some(self.tax_amount),
            total: Some(self.total),
            currency: Some(self.currency),
            ..StagePatch::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::InvoiceRecord;

    #[test]
    fn deserializes_from_extractor_json() {
        let json = r#"{
            "invoice_number": "INV-2024-001",
            "vendor_name": "Acme Corp",
            "invoice_date": "2024-06-01",
            "line_items": [
                {"description": "Widgets", "quantity": 2.0, "unit_price": 10.0, "total": 20.0}
            ],
            "subtotal": 20.0,
            "tax_rate": 0.1,
            "tax_amount": 2.0,
            "total": 22.0
        }"#;

        let data: InvoiceData = serde_json::from_str(json).unwrap();
        assert_eq!(data.invoice_number, "INV-2024-001");
        assert_eq!(data.currency, "USD");
        assert!(data.due_date.is_none());
        assert_eq!(data.line_items.len(), 1);
    }

    #[test]
    fn into_patch_carries_every_extracted_field() {
        let data = InvoiceData {
            invoice_number: "INV-7".to_string(),
            vendor_name: "Acme Corp".to_string(),
            vendor_address: Some("1 Acme Way".to_string()),
            customer_name: Some("Globex".to_string()),
            customer_address: None,
            invoice_date: "2024-06-01".to_string(),
            due_date: Some("2024-07-01".to_string()),
            line_items: vec![LineItem {
                description: "Widgets".to_string(),
                quantity: 2.0,
                unit_price: 10.0,
                total: 20.0,
            }],
            subtotal: 20.0,
            tax_rate: Some(0.1),
            tax_amount: 2.0,
            total: 22.0,
            currency: "EUR".to_string(),
        };

        let mut record = InvoiceRecord::new("doc");
        record.apply(data.into_patch());

        assert_eq!(record.invoice_number.as_deref(), Some("INV-7"));
        assert_eq!(record.vendor_name.as_deref(), Some("Acme Corp"));
        assert_eq!(record.invoice_date.as_deref(), Some("2024-06-01"));
        assert_eq!(record.due_date.as_deref(), Some("2024-07-01"));
        assert_eq!(record.line_items.len(), 1);
        assert_eq!(record.subtotal, Some(20.0));
        assert_eq!(record.tax_rate, Some(0.1));
        assert_eq!(record.tax_amount, Some(2.0));
        assert_eq!(record.total, Some(22.0));
        assert_eq!(record.currency, "EUR");
        assert!(record.errors.is_empty());
    }
}
