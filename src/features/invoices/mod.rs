pub mod dtos;
pub mod handlers;
pub mod models;
pub mod pdf;
pub mod routes;
pub mod services;

pub use services::{InvoiceService, InvoiceSettingsService};
