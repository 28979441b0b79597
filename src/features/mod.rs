pub mod ads;
pub mod articles;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod invoices;
pub mod pricing;
pub mod seo;
pub mod slots;
pub mod uploads;
