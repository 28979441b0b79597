mod invoice_handler;
mod invoice_settings_handler;

pub use invoice_handler::*;
pub use invoice_settings_handler::*;
