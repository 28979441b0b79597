use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

pub const INVOICE_COLUMNS: &str = "id, number, ad_id, issue_date, due_date, currency, \
     client_name, client_code, client_vat_code, client_address, client_email, description, \
     quantity, unit_price, total_without_vat, vat_rate, vat_amount, total_with_vat, status, \
     pdf_url, created_at";

/// Invoice status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "invoice_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Issued,
    Cancelled,
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Draft => write!(f, "draft"),
            InvoiceStatus::Issued => write!(f, "issued"),
            InvoiceStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl InvoiceStatus {
    /// Drafts can be issued or cancelled, issued invoices only cancelled.
    /// Cancelled is final.
    pub fn can_transition_to(self, next: InvoiceStatus) -> bool {
        use InvoiceStatus::*;
        matches!(
            (self, next),
            (Draft, Draft)
                | (Draft, Issued)
                | (Draft, Cancelled)
                | (Issued, Issued)
                | (Issued, Cancelled)
                | (Cancelled, Cancelled)
        )
    }

    /// Label shown on the dashboard
    pub fn label(self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "Juodraštis",
            InvoiceStatus::Issued => "Išrašyta",
            InvoiceStatus::Cancelled => "Atšaukta",
        }
    }
}

/// Database model for invoice
#[derive(Debug, Clone, FromRow)]
pub struct Invoice {
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
    pub pdf_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for a new invoice; the number is assigned on insert
#[derive(Debug, Clone)]
pub struct CreateInvoice {
    pub ad_id: Option<Uuid>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub currency: String,
    pub client_name: Option<String>,
    pub client_code: Option<String>,
    pub client_vat_code: Option<String>,
    pub client_address: Option<String>,
    pub client_email: Option<String>,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_without_vat: Decimal,
    pub vat_rate: Decimal,
    pub vat_amount: Decimal,
    pub total_with_vat: Decimal,
    pub status: InvoiceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        assert!(InvoiceStatus::Draft.can_transition_to(InvoiceStatus::Issued));
        assert!(InvoiceStatus::Issued.can_transition_to(InvoiceStatus::Cancelled));
        assert!(!InvoiceStatus::Issued.can_transition_to(InvoiceStatus::Draft));
        assert!(!InvoiceStatus::Cancelled.can_transition_to(InvoiceStatus::Issued));
    }
}
