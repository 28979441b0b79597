use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

pub const INVOICE_SETTINGS_COLUMNS: &str = "id, company_name, company_code, vat_code, address, \
     bank_name, bank_account, email, phone, default_payment_terms_days, created_at, updated_at";

/// Seller details printed on every invoice. Only the oldest row is used.
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceSettings {
    pub id: Uuid,
    pub company_name: String,
    pub company_code: String,
    pub vat_code: Option<String>,
    pub address: Option<String>,
    pub bank_name: Option<String>,
    pub bank_account: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub default_payment_terms_days: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
