mod invoice_service;
mod invoice_settings_service;

pub use invoice_service::{build_invoice_document, format_invoice_number, InvoiceService};
pub use invoice_settings_service::{InvoiceSettingsService, DEFAULT_PAYMENT_TERMS_DAYS};
