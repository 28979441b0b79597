use sqlx::PgPool;
use uuid::Uuid;

use crate::core::config::CatalogConfig;
use crate::core::error::{AppError, Result};
use crate::features::pricing::calculator::{sanitize_price, AnnualPrices};
use crate::features::pricing::dtos::{PriceListDto, UpdateAdPricingDto};
use crate::features::pricing::models::AdPricingSettings;

/// Service for the admin-edited annual price list
pub struct PricingSettingsService {
    pool: PgPool,
    currency: String,
}

impl PricingSettingsService {
    pub fn new(pool: PgPool, catalog: &CatalogConfig) -> Self {
        Self {
            pool,
            currency: catalog.currency.clone(),
        }
    }

    pub async fn price_list(&self) -> PriceListDto {
        PriceListDto {
            prices: self.load().await,
            currency: self.currency.clone(),
        }
    }

    /// Current annual prices.
    ///
    /// Never fails: a missing row or a read error yields the defaults.
    pub async fn load(&self) -> AnnualPrices {
        let result = sqlx::query_as::<_, AdPricingSettings>(
            r#"
            SELECT id, homepage_top_price, homepage_other_price, category_price, created_at, updated_at
            FROM ad_pricing_settings
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(settings)) => settings.into(),
            Ok(None) => AnnualPrices::default(),
            Err(e) => {
                tracing::warn!("Failed to load ad pricing settings, using defaults: {:?}", e);
                AnnualPrices::default()
            }
        }
    }

    /// Store the price list, replacing invalid values with defaults
    pub async fn save(&self, dto: UpdateAdPricingDto) -> Result<PriceListDto> {
        let defaults = AnnualPrices::default();
        let prices = AnnualPrices {
            homepage_top_price: sanitize_price(dto.homepage_top_price, defaults.homepage_top_price),
            homepage_other_price: sanitize_price(
                dto.homepage_other_price,
                defaults.homepage_other_price,
            ),
            category_price: sanitize_price(dto.category_price, defaults.category_price),
        };

        let existing_id: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM ad_pricing_settings ORDER BY created_at ASC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to read ad pricing settings: {:?}", e);
            AppError::Database(e)
        })?;

        let query = match existing_id {
            Some(_) => {
                r#"
                UPDATE ad_pricing_settings
                SET homepage_top_price = $2, homepage_other_price = $3, category_price = $4,
                    updated_at = NOW()
                WHERE id = $1
                "#
            }
            None => {
                r#"
                INSERT INTO ad_pricing_settings (id, homepage_top_price, homepage_other_price, category_price)
                VALUES ($1, $2, $3, $4)
                "#
            }
        };

        sqlx::query(query)
            .bind(existing_id.unwrap_or_else(Uuid::new_v4))
            .bind(prices.homepage_top_price)
            .bind(prices.homepage_other_price)
            .bind(prices.category_price)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to save ad pricing settings: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!(
            "Ad pricing saved: top={}, other={}, category={}",
            prices.homepage_top_price,
            prices.homepage_other_price,
            prices.category_price
        );

        Ok(PriceListDto {
            prices,
            currency: self.currency.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;

    #[tokio::test]
    async fn test_load_falls_back_to_defaults_when_database_is_down() {
        let service = PricingSettingsService::new(lazy_test_pool(), &CatalogConfig::default());
        assert_eq!(service.load().await, AnnualPrices::default());

        let list = service.price_list().await;
        assert_eq!(list.currency, "EUR");
    }
}
