use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::invoices::dtos::{InvoiceSettingsDto, UpdateInvoiceSettingsDto};
use crate::features::invoices::models::{InvoiceSettings, INVOICE_SETTINGS_COLUMNS};

pub const DEFAULT_PAYMENT_TERMS_DAYS: i32 = 14;

/// Service for the seller details printed on invoices
pub struct InvoiceSettingsService {
    pool: PgPool,
}

impl InvoiceSettingsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self) -> Result<Option<InvoiceSettings>> {
        sqlx::query_as::<_, InvoiceSettings>(&format!(
            "SELECT {} FROM invoice_settings ORDER BY created_at ASC LIMIT 1",
            INVOICE_SETTINGS_COLUMNS
        ))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch invoice settings: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Stored settings, or an empty form with default terms
    pub async fn get(&self) -> Result<InvoiceSettingsDto> {
        Ok(self
            .find()
            .await?
            .map(InvoiceSettingsDto::from)
            .unwrap_or_else(empty_settings))
    }

    pub async fn save(&self, dto: UpdateInvoiceSettingsDto) -> Result<InvoiceSettingsDto> {
        let input = normalize(dto)?;
        let existing = self.find().await?;

        let query = match existing {
            Some(_) => format!(
                r#"
                UPDATE invoice_settings
                SET company_name = $2, company_code = $3, vat_code = $4, address = $5,
                    bank_name = $6, bank_account = $7, email = $8, phone = $9,
                    default_payment_terms_days = $10, updated_at = NOW()
                WHERE id = $1
                RETURNING {}
                "#,
                INVOICE_SETTINGS_COLUMNS
            ),
            None => format!(
                r#"
                INSERT INTO invoice_settings (id, company_name, company_code, vat_code, address,
                    bank_name, bank_account, email, phone, default_payment_terms_days)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING {}
                "#,
                INVOICE_SETTINGS_COLUMNS
            ),
        };

        let saved = sqlx::query_as::<_, InvoiceSettings>(&query)
            .bind(existing.map(|s| s.id).unwrap_or_else(Uuid::new_v4))
            .bind(&input.company_name)
            .bind(&input.company_code)
            .bind(&input.vat_code)
            .bind(&input.address)
            .bind(&input.bank_name)
            .bind(&input.bank_account)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.default_payment_terms_days.unwrap_or(DEFAULT_PAYMENT_TERMS_DAYS))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to save invoice settings: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Invoice settings saved for {}", saved.company_name);

        Ok(saved.into())
    }
}

fn empty_settings() -> InvoiceSettingsDto {
    InvoiceSettingsDto {
        company_name: String::new(),
        company_code: String::new(),
        vat_code: None,
        address: None,
        bank_name: None,
        bank_account: None,
        email: None,
        phone: None,
        default_payment_terms_days: DEFAULT_PAYMENT_TERMS_DAYS,
        configured: false,
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim the form and apply the required-field and payment-terms rules
fn normalize(dto: UpdateInvoiceSettingsDto) -> Result<UpdateInvoiceSettingsDto> {
    let company_name = dto.company_name.trim().to_string();
    let company_code = dto.company_code.trim().to_string();

    if company_name.is_empty() || company_code.is_empty() {
        return Err(AppError::Validation(
            "Company name and company code are required".to_string(),
        ));
    }

    let terms = dto
        .default_payment_terms_days
        .filter(|days| *days > 0)
        .unwrap_or(DEFAULT_PAYMENT_TERMS_DAYS);

    Ok(UpdateInvoiceSettingsDto {
        company_name,
        company_code,
        vat_code: trimmed(dto.vat_code),
        address: trimmed(dto.address),
        bank_name: trimmed(dto.bank_name),
        bank_account: trimmed(dto.bank_account),
        email: trimmed(dto.email),
        phone: trimmed(dto.phone),
        default_payment_terms_days: Some(terms),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::company::en::CompanyName;
    use fake::Fake;

    fn form(name: &str, code: &str, terms: Option<i32>) -> UpdateInvoiceSettingsDto {
        UpdateInvoiceSettingsDto {
            company_name: name.to_string(),
            company_code: code.to_string(),
            vat_code: Some("  ".to_string()),
            address: Some(" Gedimino pr. 1 ".to_string()),
            bank_name: None,
            bank_account: None,
            email: None,
            phone: None,
            default_payment_terms_days: terms,
        }
    }

    #[test]
    fn test_required_fields() {
        assert!(matches!(
            normalize(form("  ", "123", None)),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            normalize(form("UAB Vizijos", "", None)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_payment_terms_fallback() {
        let name: String = CompanyName().fake();
        assert_eq!(
            normalize(form(&name, "305", Some(0))).unwrap().default_payment_terms_days,
            Some(14)
        );
        assert_eq!(
            normalize(form(&name, "305", Some(-3))).unwrap().default_payment_terms_days,
            Some(14)
        );
        assert_eq!(
            normalize(form(&name, "305", Some(30))).unwrap().default_payment_terms_days,
            Some(30)
        );
    }

    #[test]
    fn test_blank_optionals_are_cleared() {
        let normalized = normalize(form("UAB Vizijos", " 305 ", None)).unwrap();
        assert_eq!(normalized.company_code, "305");
        assert_eq!(normalized.vat_code, None);
        assert_eq!(normalized.address.as_deref(), Some("Gedimino pr. 1"));
    }
}
