use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::config::CatalogConfig;
use crate::core::error::{AppError, Result};
use crate::features::ads::dtos::InvoiceClientDto;
use crate::features::ads::models::Ad;
use crate::features::invoices::dtos::{InvoicePdfResponseDto, InvoiceResponseDto};
use crate::features::invoices::models::{
    CreateInvoice, Invoice, InvoiceSettings, InvoiceStatus, INVOICE_COLUMNS,
};
use crate::features::invoices::pdf::{
    render_invoice_pdf, BuyerBlock, InvoiceDocument, SellerBlock,
};
use crate::features::invoices::services::invoice_settings_service::{
    InvoiceSettingsService, DEFAULT_PAYMENT_TERMS_DAYS,
};
use crate::modules::storage::ObjectStorage;
use crate::shared::constants::{DEFAULT_INVOICE_DESCRIPTION, STORAGE_INVOICE_PDFS};
use crate::shared::types::PaginationQuery;

const PDF_FAILED: &str = "pdf_failed";
const DEFAULT_SELLER_NAME: &str = "Pardavėjas";

/// Service for invoice issuing, listing and PDF generation
pub struct InvoiceService {
    pool: PgPool,
    storage: Arc<dyn ObjectStorage>,
    settings: Arc<InvoiceSettingsService>,
    catalog: CatalogConfig,
}

impl InvoiceService {
    pub fn new(
        pool: PgPool,
        storage: Arc<dyn ObjectStorage>,
        settings: Arc<InvoiceSettingsService>,
        catalog: CatalogConfig,
    ) -> Self {
        Self {
            pool,
            storage,
            settings,
            catalog,
        }
    }

    async fn next_number(&self, year: i32) -> Result<String> {
        let seq: i64 = sqlx::query_scalar("SELECT nextval('invoice_number_seq')")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to allocate invoice number: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(format_invoice_number(
            &self.catalog.invoice_number_prefix,
            year,
            seq,
        ))
    }

    pub async fn create(&self, input: CreateInvoice) -> Result<Invoice> {
        let number = self.next_number(input.issue_date.year()).await?;

        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            r#"
            INSERT INTO invoices (id, number, ad_id, issue_date, due_date, currency,
                client_name, client_code, client_vat_code, client_address, client_email,
                description, quantity, unit_price, total_without_vat, vat_rate, vat_amount,
                total_with_vat, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING {}
            "#,
            INVOICE_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&number)
        .bind(input.ad_id)
        .bind(input.issue_date)
        .bind(input.due_date)
        .bind(&input.currency)
        .bind(&input.client_name)
        .bind(&input.client_code)
        .bind(&input.client_vat_code)
        .bind(&input.client_address)
        .bind(&input.client_email)
        .bind(&input.description)
        .bind(input.quantity)
        .bind(input.unit_price)
        .bind(input.total_without_vat)
        .bind(input.vat_rate)
        .bind(input.vat_amount)
        .bind(input.total_with_vat)
        .bind(input.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create invoice: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Invoice issued: {} ({})", invoice.number, invoice.id);

        Ok(invoice)
    }

    /// Issue the invoice for a freshly placed ad
    pub async fn create_for_ad(&self, ad: &Ad, client: InvoiceClientDto) -> Result<Invoice> {
        let today = Utc::now().date_naive();
        let input = ad_invoice(
            ad,
            client,
            today,
            self.catalog.invoice_due_days,
            &self.catalog.currency,
        );
        self.create(input).await
    }

    /// One page of invoices, newest first, with the total matching `status`
    pub async fn list(
        &self,
        status: Option<InvoiceStatus>,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<InvoiceResponseDto>, i64)> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM invoices WHERE ($1::invoice_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count invoices: {:?}", e);
            AppError::Database(e)
        })?;

        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            r#"
            SELECT {} FROM invoices
            WHERE ($1::invoice_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            INVOICE_COLUMNS
        ))
        .bind(status)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list invoices: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((
            invoices.into_iter().map(InvoiceResponseDto::from).collect(),
            total,
        ))
    }

    async fn find(&self, id: Uuid) -> std::result::Result<Option<Invoice>, sqlx::Error> {
        sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {} FROM invoices WHERE id = $1",
            INVOICE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn get(&self, id: Uuid) -> Result<InvoiceResponseDto> {
        self.find(id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch invoice: {:?}", e);
                AppError::Database(e)
            })?
            .map(InvoiceResponseDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Invoice with id {} not found", id)))
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: InvoiceStatus,
    ) -> Result<InvoiceResponseDto> {
        let current = self.get(id).await?;

        if !current.status.can_transition_to(status) {
            return Err(AppError::BadRequest(format!(
                "Cannot change invoice status from {} to {}",
                current.status, status
            )));
        }

        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "UPDATE invoices SET status = $2 WHERE id = $1 RETURNING {}",
            INVOICE_COLUMNS
        ))
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update invoice status: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Invoice {} status: {} -> {}",
            invoice.number,
            current.status,
            status
        );

        Ok(invoice.into())
    }

    /// Render the PDF, upload it and store its public URL.
    ///
    /// Each stage reports its own `pdf_failed` step.
    pub async fn generate_pdf(&self, id: Uuid) -> Result<InvoicePdfResponseDto> {
        let invoice = self
            .find(id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch invoice for PDF: {:?}", e);
                AppError::step(PDF_FAILED, "invoice_fetch")
            })?
            .ok_or_else(|| AppError::NotFound(format!("Invoice with id {} not found", id)))?;

        // Missing seller details still produce a PDF
        let settings = match self.settings.find().await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Invoice settings unavailable, rendering without them: {}", e);
                None
            }
        };

        let document = build_invoice_document(&invoice, settings.as_ref());
        let bytes = render_invoice_pdf(&document).map_err(|e| {
            tracing::error!("Invoice PDF rendering failed: {}", e);
            AppError::step(PDF_FAILED, "pdf_generation")
        })?;

        let path = format!("{}/{}", STORAGE_INVOICE_PDFS, pdf_file_name(&invoice));
        let pdf_url = self
            .storage
            .put_public(&path, bytes, "application/pdf")
            .await
            .map_err(|e| {
                tracing::error!("Invoice PDF upload failed: {}", e);
                let detail = match e {
                    AppError::Storage(message) => message,
                    other => other.to_string(),
                };
                AppError::step_with_detail(PDF_FAILED, "upload_error", &detail)
            })?;

        sqlx::query("UPDATE invoices SET pdf_url = $2 WHERE id = $1")
            .bind(invoice.id)
            .bind(&pdf_url)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to store invoice PDF URL: {:?}", e);
                AppError::step(PDF_FAILED, "invoice_update")
            })?;

        tracing::info!("Invoice PDF generated: {} -> {}", invoice.number, pdf_url);

        Ok(InvoicePdfResponseDto {
            invoice_id: invoice.id,
            pdf_url,
        })
    }
}

/// `{prefix}-{year}-{sequence:05}`
pub fn format_invoice_number(prefix: &str, year: i32, seq: i64) -> String {
    format!("{}-{}-{:05}", prefix, year, seq)
}

fn pdf_file_name(invoice: &Invoice) -> String {
    let number = invoice.number.trim();
    if number.is_empty() {
        format!("inv-{}.pdf", invoice.id)
    } else {
        format!("{}.pdf", number)
    }
}

fn ad_invoice(
    ad: &Ad,
    client: InvoiceClientDto,
    today: NaiveDate,
    due_days: i64,
    currency: &str,
) -> CreateInvoice {
    CreateInvoice {
        ad_id: Some(ad.id),
        issue_date: today,
        due_date: today + Duration::days(due_days),
        currency: currency.to_string(),
        client_name: client.name,
        client_code: client.code,
        client_vat_code: client.vat_code,
        client_address: client.address,
        client_email: client.email,
        description: format!("{}. Reklama: „{}“", DEFAULT_INVOICE_DESCRIPTION, ad.title),
        quantity: Decimal::ONE,
        unit_price: ad.price,
        total_without_vat: ad.price,
        vat_rate: Decimal::ZERO,
        vat_amount: Decimal::ZERO,
        total_with_vat: ad.price,
        status: InvoiceStatus::Issued,
    }
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// Resolve stored values into what is printed on the page
pub fn build_invoice_document(
    invoice: &Invoice,
    settings: Option<&InvoiceSettings>,
) -> InvoiceDocument {
    let seller = match settings {
        Some(s) => SellerBlock {
            name: if s.company_name.trim().is_empty() {
                DEFAULT_SELLER_NAME.to_string()
            } else {
                s.company_name.clone()
            },
            code: s.company_code.clone(),
            vat_code: text(s.vat_code.as_deref()),
            address: text(s.address.as_deref()),
            bank_name: text(s.bank_name.as_deref()),
            bank_account: text(s.bank_account.as_deref()),
            email: text(s.email.as_deref()),
            phone: text(s.phone.as_deref()),
        },
        None => SellerBlock {
            name: DEFAULT_SELLER_NAME.to_string(),
            ..SellerBlock::default()
        },
    };

    let quantity = if invoice.quantity.is_zero() {
        Decimal::ONE
    } else {
        invoice.quantity
    };

    let description = invoice
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_INVOICE_DESCRIPTION)
        .to_string();

    let number = if invoice.number.trim().is_empty() {
        invoice.id.to_string()
    } else {
        invoice.number.clone()
    };

    InvoiceDocument {
        seller,
        buyer: BuyerBlock {
            name: text(invoice.client_name.as_deref()),
            code: text(invoice.client_code.as_deref()),
            vat_code: text(invoice.client_vat_code.as_deref()),
            address: text(invoice.client_address.as_deref()),
        },
        number,
        issue_date: invoice.issue_date.format("%Y-%m-%d").to_string(),
        due_date: invoice
            .due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        payment_terms_days: settings
            .map(|s| s.default_payment_terms_days)
            .unwrap_or(DEFAULT_PAYMENT_TERMS_DAYS),
        currency: if invoice.currency.trim().is_empty() {
            "EUR".to_string()
        } else {
            invoice.currency.clone()
        },
        description,
        quantity,
        unit_price: invoice.unit_price,
        total_without_vat: invoice.total_without_vat,
        vat_rate: invoice.vat_rate,
        vat_amount: invoice.vat_amount,
        total_with_vat: invoice.total_with_vat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::modules::storage::memory::MemoryStorage;
    use fake::faker::company::en::CompanyName;
    use fake::Fake;

    fn invoice() -> Invoice {
        Invoice {
            id: Uuid::new_v4(),
            number: "EV-2025-00007".to_string(),
            ad_id: None,
            issue_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2025, 3, 15),
            currency: "EUR".to_string(),
            client_name: Some(CompanyName().fake()),
            client_code: None,
            client_vat_code: None,
            client_address: None,
            client_email: None,
            description: None,
            quantity: Decimal::ZERO,
            unit_price: Decimal::from(49),
            total_without_vat: Decimal::from(49),
            vat_rate: Decimal::ZERO,
            vat_amount: Decimal::ZERO,
            total_with_vat: Decimal::from(49),
            status: InvoiceStatus::Issued,
            pdf_url: None,
            created_at: Utc::now(),
        }
    }

    fn ad() -> Ad {
        Ad {
            id: Uuid::new_v4(),
            slot_id: Some(Uuid::new_v4()),
            title: "Žalias sodas".to_string(),
            url: "https://zaliassodas.lt".to_string(),
            image_url: None,
            price: Decimal::new(34800, 2),
            duration_months: 12,
            valid_until: None,
            is_animated: false,
            created_by: "test-admin".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_invoice_number_format() {
        assert_eq!(format_invoice_number("EV", 2025, 42), "EV-2025-00042");
        assert_eq!(format_invoice_number("EV", 2026, 123456), "EV-2026-123456");
    }

    #[test]
    fn test_pdf_file_name_falls_back_to_id() {
        let mut inv = invoice();
        assert_eq!(pdf_file_name(&inv), "EV-2025-00007.pdf");
        inv.number = " ".to_string();
        assert_eq!(pdf_file_name(&inv), format!("inv-{}.pdf", inv.id));
    }

    #[test]
    fn test_ad_invoice_defaults() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 25).unwrap();
        let client = InvoiceClientDto {
            name: Some("UAB Klientas".to_string()),
            ..InvoiceClientDto::default()
        };
        let input = ad_invoice(&ad(), client, today, 14, "EUR");

        assert_eq!(input.due_date, NaiveDate::from_ymd_opt(2025, 2, 8).unwrap());
        assert_eq!(
            input.description,
            "Reklamos talpinimas kataloge. Reklama: „Žalias sodas“"
        );
        assert_eq!(input.quantity, Decimal::ONE);
        assert_eq!(input.total_with_vat, Decimal::new(34800, 2));
        assert_eq!(input.vat_amount, Decimal::ZERO);
        assert_eq!(input.status, InvoiceStatus::Issued);
        assert_eq!(input.client_name.as_deref(), Some("UAB Klientas"));
    }

    #[test]
    fn test_document_defaults_without_settings() {
        let doc = build_invoice_document(&invoice(), None);

        assert_eq!(doc.seller.name, "Pardavėjas");
        assert_eq!(doc.payment_terms_days, 14);
        assert_eq!(doc.quantity, Decimal::ONE);
        assert_eq!(doc.description, "Reklamos talpinimas kataloge");
        assert_eq!(doc.issue_date, "2025-03-01");
        assert_eq!(doc.due_date, "2025-03-15");
    }

    #[test]
    fn test_document_uses_seller_settings() {
        let settings = InvoiceSettings {
            id: Uuid::new_v4(),
            company_name: "UAB Vizijos".to_string(),
            company_code: "305000000".to_string(),
            vat_code: None,
            address: Some("Vilnius".to_string()),
            bank_name: None,
            bank_account: Some("LT000000000000000000".to_string()),
            email: None,
            phone: None,
            default_payment_terms_days: 30,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let doc = build_invoice_document(&invoice(), Some(&settings));

        assert_eq!(doc.seller.name, "UAB Vizijos");
        assert_eq!(doc.seller.bank_account, "LT000000000000000000");
        assert_eq!(doc.payment_terms_days, 30);
    }

    #[tokio::test]
    async fn test_generate_pdf_reports_fetch_step_when_database_is_down() {
        let pool = lazy_test_pool();
        let service = InvoiceService::new(
            pool.clone(),
            Arc::new(MemoryStorage::default()),
            Arc::new(InvoiceSettingsService::new(pool)),
            CatalogConfig::default(),
        );

        let err = service.generate_pdf(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::StepFailed {
                code: "pdf_failed",
                step: "invoice_fetch",
                ..
            }
        ));
    }
}
