//! Pure notification composers.
//!
//! These build the `(subject, html_body)` pair the notify stage hands to
//! the [`crate::Notifier`]. They do no IO and tolerate missing fields:
//! absent identity renders as "Unknown", an absent total as 0.

use invoiceflow_record::InvoiceRecord;

/// Group the integer part of a monetary amount with thousands separators
/// ("12,345.67").
fn format_amount(value: f64) -> String {
    let formatted = format!("{value:.2}");
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}{grouped}.{frac_part}")
}

fn invoice_number(record: &InvoiceRecord) -> &str {
    record.invoice_number.as_deref().unwrap_or("Unknown")
}

fn vendor_name(record: &InvoiceRecord) -> &str {
    record.vendor_name.as_deref().unwrap_or("Unknown")
}

fn summary_table(record: &InvoiceRecord, status_label: &str, status_color: &str) -> String {
    format!(
        r#"<table style="border-collapse: collapse; width: 100%; max-width: 500px;">
            <tr>
                <td style="padding: 10px; border-bottom: 1px solid #ddd;"><strong>Invoice Number:</strong></td>
                <td style="padding: 10px; border-bottom: 1px solid #ddd;">{number}</td>
            </tr>
            <tr>
                <td style="padding: 10px; border-bottom: 1px solid #ddd;"><strong>Vendor:</strong></td>
                <td style="padding: 10px; border-bottom: 1px solid #ddd;">{vendor}</td>
            </tr>
            <tr>
                <td style="padding: 10px; border-bottom: 1px solid #ddd;"><strong>Total Amount:</strong></td>
                <td style="padding: 10px; border-bottom: 1px solid #ddd;">{currency} {total}</td>
            </tr>
            <tr>
                <td style="padding: 10px;"><strong>Status:</strong></td>
                <td style="padding: 10px; color: {status_color}; font-weight: bold;">{status_label}</td>
            </tr>
        </table>"#,
        number = invoice_number(record),
        vendor = vendor_name(record),
        currency = record.currency,
        total = format_amount(record.total.unwrap_or(0.0)),
    )
}

/// Compose the approval message: `(subject, html_body)`.
pub fn compose_approval(record: &InvoiceRecord) -> (String, String) {
    let subject = format!(
        "Invoice Approved: {} from {}",
        invoice_number(record),
        vendor_name(record)
    );

    let body = format!(
        r#"<html>
    <body style="font-family: Arial, sans-serif; padding: 20px;">
        <h2 style="color: #28a745;">Invoice Approved</h2>
        {table}
        <p style="margin-top: 20px; color: #666;">
            This invoice has passed all validation checks and business rules.
        </p>
    </body>
    </html>"#,
        table = summary_table(record, "APPROVED", "#28a745"),
    );

    (subject, body)
}

/// Compose the rejection message: `(subject, html_body)`.
///
/// Lists every accumulated error as a rejection reason.
pub fn compose_rejection(record: &InvoiceRecord) -> (String, String) {
    let subject = format!(
        "Invoice Rejected: {} from {}",
        invoice_number(record),
        vendor_name(record)
    );

    let reasons: String = record
        .errors
        .iter()
        .map(|error| format!("<li style='margin: 5px 0;'>{error}</li>"))
        .collect();

    let body = format!(
        r#"<html>
    <body style="font-family: Arial, sans-serif; padding: 20px;">
        <h2 style="color: #dc3545;">Invoice Rejected</h2>
        {table}
        <h3 style="margin-top: 20px; color: #dc3545;">Rejection Reasons:</h3>
        <ul style="background-color: #f8d7da; padding: 15px 30px; border-radius: 5px;">
            {reasons}
        </ul>
        <p style="margin-top: 20px; color: #666;">
            Please review the issues above and resubmit the invoice after corrections.
        </p>
    </body>
    </html>"#,
        table = summary_table(record, "REJECTED", "#dc3545"),
    );

    (subject, body)
}
