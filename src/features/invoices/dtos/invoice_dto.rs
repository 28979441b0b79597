use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::invoices::models::{Invoice, InvoiceSettings, InvoiceStatus};

/// Response DTO for invoice
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceResponseDto {
    pub id: Uuid,
    pub number: String,
    pub ad_id: Option<Uuid>,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub currency: String,
    pub client_name: Option<String>,
    pub client_code: Option<String>,
    pub client_vat_code: Option<String>,
    pub client_address: Option<String>,
    pub client_email: Option<String>,
    pub description: Option<String>,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_without_vat: Decimal,
    pub vat_rate: Decimal,
    pub vat_amount: Decimal,
    pub total_with_vat: Decimal,
    pub status: InvoiceStatus,
    /// Lithuanian status label
    pub status_label: String,
    pub pdf_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceResponseDto {
    fn from(i: Invoice) -> Self {
        Self {
            id: i.id,
            number: i.number,
            ad_id: i.ad_id,
            issue_date: i.issue_date,
            due_date: i.due_date,
            currency: i.currency,
            client_name: i.client_name,
            client_code: i.client_code,
            client_vat_code: i.client_vat_code,
            client_address: i.client_address,
            client_email: i.client_email,
            description: i.description,
            quantity: i.quantity,
            unit_price: i.unit_price,
            total_without_vat: i.total_without_vat,
            vat_rate: i.vat_rate,
            vat_amount: i.vat_amount,
            total_with_vat: i.total_with_vat,
            status_label: i.status.label().to_string(),
            status: i.status,
            pdf_url: i.pdf_url,
            created_at: i.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct InvoiceListQuery {
    /// Only invoices with this status
    pub status: Option<InvoiceStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateInvoiceStatusDto {
    pub status: InvoiceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoicePdfResponseDto {
    pub invoice_id: Uuid,
    pub pdf_url: String,
}

/// Seller details as shown in the settings form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceSettingsDto {
    pub company_name: String,
    pub company_code: String,
    pub vat_code: Option<String>,
    pub address: Option<String>,
    pub bank_name: Option<String>,
    pub bank_account: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub default_payment_terms_days: i32,
    /// False until the settings are saved once
    pub configured: bool,
}

impl From<InvoiceSettings> for InvoiceSettingsDto {
    fn from(s: InvoiceSettings) -> Self {
        Self {
            company_name: s.company_name,
            company_code: s.company_code,
            vat_code: s.vat_code,
            address: s.address,
            bank_name: s.bank_name,
            bank_account: s.bank_account,
            email: s.email,
            phone: s.phone,
            default_payment_terms_days: s.default_payment_terms_days,
            configured: true,
        }
    }
}

/// DTO for saving seller details.
///
/// Payment terms that are missing or not positive are stored as 14 days.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateInvoiceSettingsDto {
    #[validate(length(max = 255))]
    pub company_name: String,
    #[validate(length(max = 64))]
    pub company_code: String,
    #[validate(length(max = 64))]
    pub vat_code: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(length(max = 255))]
    pub bank_name: Option<String>,
    #[validate(length(max = 64))]
    pub bank_account: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 64))]
    pub phone: Option<String>,
    pub default_payment_terms_days: Option<i32>,
}
