use chrono::Utc;
use sqlx::PgPool;

use crate::core::config::CatalogConfig;
use crate::core::error::{AppError, Result};
use crate::features::ads::models::{Ad, AD_COLUMNS};
use crate::features::ads::stats::active_totals;
use crate::features::dashboard::dtos::DashboardSummaryDto;

/// Service for dashboard aggregates
pub struct DashboardService {
    pool: PgPool,
    currency: String,
}

impl DashboardService {
    pub fn new(pool: PgPool, catalog: &CatalogConfig) -> Self {
        Self {
            pool,
            currency: catalog.currency.clone(),
        }
    }

    pub async fn get_summary(&self) -> Result<DashboardSummaryDto> {
        let now = Utc::now();

        let ads = sqlx::query_as::<_, Ad>(&format!(
            "SELECT {} FROM ads WHERE valid_until IS NULL OR valid_until > $1",
            AD_COLUMNS
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load active ads: {:?}", e);
            AppError::Database(e)
        })?;

        let total_slots: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM slots")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count slots: {:?}", e);
                AppError::Database(e)
            })?;

        let totals = active_totals(&ads, now);

        Ok(DashboardSummaryDto {
            active_ads: totals.count,
            total_slots,
            total_active_price: totals.total_price,
            total_active_monthly: totals.monthly_total,
            currency: self.currency.clone(),
        })
    }
}
