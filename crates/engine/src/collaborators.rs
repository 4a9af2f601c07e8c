//! Narrow interfaces to the external collaborators.
//!
//! Implementations live outside this workspace (document parsing, model
//! inference, mail transport). The pipeline only ever sees these traits;
//! their calls are synchronous and blocking from the engine's point of
//! view, and timeout policy belongs to the collaborator.

use invoiceflow_core::{ExtractionError, IngestError, NotificationError};
use invoiceflow_record::InvoiceData;

/// Turns an uploaded document into raw text.
pub trait TextExtractor {
    fn extract_text(&self, document_ref: &str) -> Result<String, IngestError>;
}

/// Extracts a fully-typed invoice from raw text (model inference boundary).
pub trait InvoiceExtractor {
    fn extract_invoice(&self, text: &str) -> Result<InvoiceData, ExtractionError>;
}

/// Delivers a composed notification.
///
/// `recipient` of `None` means "use the configured default recipient".
pub trait Notifier {
    fn send(
        &self,
        subject: &str,
        html_body: &str,
        recipient: Option<&str>,
    ) -> Result<(), NotificationError>;
}
