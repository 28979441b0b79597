mod invoice;
mod invoice_settings;

pub use invoice::{CreateInvoice, Invoice, InvoiceStatus, INVOICE_COLUMNS};
pub use invoice_settings::{InvoiceSettings, INVOICE_SETTINGS_COLUMNS};
