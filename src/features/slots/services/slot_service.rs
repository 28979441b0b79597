use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::config::CatalogConfig;
use crate::core::error::{AppError, Result};
use crate::features::ads::dtos::AdResponseDto;
use crate::features::ads::lifecycle::is_ad_active;
use crate::features::ads::models::{Ad, AD_COLUMNS};
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::categories::models::{Category, CATEGORY_COLUMNS};
use crate::features::pricing::calculator::{
    base_monthly_price, calculate_ad_price, duration_multiplier, QuoteInput,
};
use crate::features::pricing::dtos::QuoteResponseDto;
use crate::features::pricing::PricingSettingsService;
use crate::features::slots::dtos::{
    AdminSlotDto, AdminSlotViewDto, CreateSlotDto, QuoteQuery, SlotResponseDto,
};
use crate::features::slots::models::{CreateSlot, Slot, SLOT_COLUMNS};
use crate::shared::constants::DEFAULT_DURATION_MONTHS;

/// Service for slot placement, lookups and quotes
pub struct SlotService {
    pool: PgPool,
    pricing: Arc<PricingSettingsService>,
    catalog: CatalogConfig,
}

impl SlotService {
    pub fn new(pool: PgPool, pricing: Arc<PricingSettingsService>, catalog: CatalogConfig) -> Self {
        Self {
            pool,
            pricing,
            catalog,
        }
    }

    /// Slots of a category, ordered by row then position
    pub async fn list_for_category(&self, category_id: Uuid) -> Result<Vec<Slot>> {
        sqlx::query_as::<_, Slot>(&format!(
            "SELECT {} FROM slots WHERE category_id = $1 ORDER BY row_number ASC, slot_number ASC",
            SLOT_COLUMNS
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list slots: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Ads linked from the given slots, keyed by ad id
    pub async fn linked_ads(&self, slots: &[Slot]) -> Result<HashMap<Uuid, Ad>> {
        let ids: Vec<Uuid> = slots.iter().filter_map(|s| s.ad_id).collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ads = sqlx::query_as::<_, Ad>(&format!(
            "SELECT {} FROM ads WHERE id = ANY($1)",
            AD_COLUMNS
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch slot ads: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(ads.into_iter().map(|ad| (ad.id, ad)).collect())
    }

    pub async fn find(&self, id: Uuid) -> Result<Slot> {
        sqlx::query_as::<_, Slot>(&format!("SELECT {} FROM slots WHERE id = $1", SLOT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch slot: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Slot with id {} not found", id)))
    }

    async fn category_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories WHERE id = $1",
            CATEGORY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch category: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Category picked by slug, or the first one by name
    async fn dashboard_category(&self, slug: Option<&str>) -> Result<Category> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories ORDER BY name ASC",
            CATEGORY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        pick_category(categories, slug)
            .ok_or_else(|| AppError::NotFound("No categories configured".to_string()))
    }

    /// Dashboard slot table for one category
    pub async fn admin_view(&self, slug: Option<&str>) -> Result<AdminSlotViewDto> {
        let category = self.dashboard_category(slug).await?;
        let slots = self.list_for_category(category.id).await?;
        let mut ads = self.linked_ads(&slots).await?;
        let prices = self.pricing.load().await;
        let is_vip = category.is_vip(&self.catalog.vip_slug);
        let now = Utc::now();

        let slots = slots
            .into_iter()
            .map(|slot| {
                let ad = slot.ad_id.and_then(|id| ads.remove(&id));
                let taken = is_ad_active(ad.as_ref(), now);
                AdminSlotDto {
                    annual_price: prices.for_slot(slot.price, is_vip, slot.row_number),
                    taken,
                    ad: ad.map(|a| AdResponseDto::from_ad(a, now)),
                    slot: slot.into(),
                }
            })
            .collect();

        Ok(AdminSlotViewDto {
            category: CategoryResponseDto::from_category(category, &self.catalog.vip_slug),
            slots,
        })
    }

    pub async fn create(&self, dto: CreateSlotDto) -> Result<SlotResponseDto> {
        let input = CreateSlot {
            category_id: dto.category_id,
            row_number: dto.row_number.unwrap_or(1),
            slot_number: dto.slot_number.unwrap_or(1),
            price: dto.price.unwrap_or(Decimal::ZERO),
            duration_months: dto.duration_months.unwrap_or(DEFAULT_DURATION_MONTHS),
            is_animated: dto.is_animated,
        };

        if input.price < Decimal::ZERO {
            return Err(AppError::Validation("Price must not be negative".to_string()));
        }

        if self.category_by_id(input.category_id).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "Category with id {} not found",
                input.category_id
            )));
        }

        let slot = sqlx::query_as::<_, Slot>(&format!(
            r#"
            INSERT INTO slots (id, category_id, row_number, slot_number, price, duration_months, is_animated)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            SLOT_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(input.category_id)
        .bind(input.row_number)
        .bind(input.slot_number)
        .bind(input.price)
        .bind(input.duration_months)
        .bind(input.is_animated)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::Conflict(format!(
                "Row {} position {} already exists in this category",
                input.row_number, input.slot_number
            )),
            e => {
                tracing::error!("Failed to create slot: {:?}", e);
                AppError::Database(e)
            }
        })?;

        tracing::info!(
            "Slot created: {} (row {}, position {})",
            slot.id,
            slot.row_number,
            slot.slot_number
        );

        Ok(slot.into())
    }

    /// Price quote for booking a slot
    pub async fn quote(&self, slot_id: Uuid, query: QuoteQuery) -> Result<QuoteResponseDto> {
        let slot = self.find(slot_id).await?;
        let category = self
            .category_by_id(slot.category_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", slot.category_id)))?;
        let is_vip = category.is_vip(&self.catalog.vip_slug);

        Ok(build_quote(&slot, &category, is_vip, query, &self.catalog.currency))
    }
}

fn pick_category(categories: Vec<Category>, slug: Option<&str>) -> Option<Category> {
    let wanted = slug.and_then(|s| categories.iter().position(|c| c.slug == s));
    let index = wanted.unwrap_or(0);
    categories.into_iter().nth(index)
}

fn build_quote(
    slot: &Slot,
    category: &Category,
    is_vip: bool,
    query: QuoteQuery,
    currency: &str,
) -> QuoteResponseDto {
    let months = query.duration_months.filter(|m| *m > 0).unwrap_or(1);
    let total = calculate_ad_price(QuoteInput {
        slot_price: slot.price,
        is_vip,
        row_number: slot.row_number,
        duration_months: Some(months),
        is_animated: query.is_animated,
    });

    QuoteResponseDto {
        slot_id: slot.id,
        category_slug: category.slug.clone(),
        base_monthly_price: base_monthly_price(slot.price, is_vip, slot.row_number),
        duration_months: months,
        duration_multiplier: duration_multiplier(months),
        is_animated: query.is_animated,
        total,
        currency: currency.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, slug: &str) -> Category {
        Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: slug.to_string(),
            created_at: Utc::now(),
        }
    }

    fn slot(row: i32, price: Option<Decimal>) -> Slot {
        Slot {
            id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            row_number: row,
            slot_number: 1,
            price,
            duration_months: 12,
            is_animated: false,
            ad_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_pick_category_by_slug_or_first() {
        let all = || vec![category("Informacija", "informacija"), category("Transportas", "transportas")];

        assert_eq!(pick_category(all(), Some("transportas")).unwrap().slug, "transportas");
        assert_eq!(pick_category(all(), Some("nera")).unwrap().slug, "informacija");
        assert_eq!(pick_category(all(), None).unwrap().slug, "informacija");
        assert!(pick_category(vec![], None).is_none());
    }

    #[test]
    fn test_quote_for_vip_top_row() {
        let quote = build_quote(
            &slot(1, None),
            &category("VIP zona", "vip-zona"),
            true,
            QuoteQuery {
                duration_months: Some(12),
                is_animated: true,
            },
            "EUR",
        );

        // 200 × 12 × 0.7 × 1.2
        assert_eq!(quote.base_monthly_price, Decimal::from(200));
        assert_eq!(quote.duration_multiplier, Decimal::new(7, 1));
        assert_eq!(quote.total, Decimal::from(2016));
        assert_eq!(quote.currency, "EUR");
    }

    #[test]
    fn test_quote_without_duration_is_one_month() {
        let quote = build_quote(
            &slot(5, Some(Decimal::new(1550, 2))),
            &category("Transportas", "transportas"),
            false,
            QuoteQuery {
                duration_months: None,
                is_animated: false,
            },
            "EUR",
        );

        assert_eq!(quote.duration_months, 1);
        assert_eq!(quote.total, Decimal::new(1550, 2));
    }
}
