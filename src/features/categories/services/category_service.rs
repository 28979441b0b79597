use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::config::CatalogConfig;
use crate::core::error::{AppError, Result};
use crate::features::ads::dtos::PublicAdDto;
use crate::features::ads::lifecycle::is_ad_active;
use crate::features::ads::models::Ad;
use crate::features::categories::dtos::{
    CategoryGridDto, CategoryResponseDto, GridCellDto, GridRowDto, HomeDto,
};
use crate::features::categories::models::{sort_for_sidebar, Category, CATEGORY_COLUMNS};
use crate::features::categories::seo::{category_seo, vip_seo};
use crate::features::pricing::calculator::AnnualPrices;
use crate::features::pricing::PricingSettingsService;
use crate::features::slots::grid::{build_grid, DisplaySlot};
use crate::features::slots::models::Slot;
use crate::features::slots::SlotService;

/// Service for the public catalog pages
pub struct CategoryService {
    pool: PgPool,
    slots: Arc<SlotService>,
    pricing: Arc<PricingSettingsService>,
    catalog: CatalogConfig,
}

impl CategoryService {
    pub fn new(
        pool: PgPool,
        slots: Arc<SlotService>,
        pricing: Arc<PricingSettingsService>,
        catalog: CatalogConfig,
    ) -> Self {
        Self {
            pool,
            slots,
            pricing,
            catalog,
        }
    }

    async fn fetch_all(&self) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories ORDER BY name ASC",
            CATEGORY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })
    }

    /// All categories, VIP zone first
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let mut categories = self.fetch_all().await?;
        sort_for_sidebar(&mut categories, &self.catalog.vip_slug);

        Ok(categories
            .into_iter()
            .map(|c| CategoryResponseDto::from_category(c, &self.catalog.vip_slug))
            .collect())
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Category> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories WHERE slug = $1",
            CATEGORY_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch category by slug: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))
    }

    /// Category page with its padded grid
    pub async fn grid(&self, slug: &str) -> Result<CategoryGridDto> {
        let category = self.find_by_slug(slug).await?;
        let slots = self.slots.list_for_category(category.id).await?;
        let ads = self.slots.linked_ads(&slots).await?;
        let prices = self.pricing.load().await;

        Ok(assemble_grid(
            category,
            slots,
            &ads,
            &prices,
            &self.catalog,
            Utc::now(),
        ))
    }

    /// Homepage: the VIP grid and the sidebar
    pub async fn home(&self) -> Result<HomeDto> {
        let grid = self.grid(&self.catalog.vip_slug).await?;
        let categories = self.list().await?;
        Ok(HomeDto { grid, categories })
    }
}

/// Build the page model from stored rows. Only active ads are shown.
pub fn assemble_grid(
    category: Category,
    slots: Vec<Slot>,
    ads: &HashMap<Uuid, Ad>,
    prices: &AnnualPrices,
    catalog: &CatalogConfig,
    now: DateTime<Utc>,
) -> CategoryGridDto {
    let is_vip = category.is_vip(&catalog.vip_slug);

    let rows = build_grid(slots, catalog.slots_per_row)
        .into_iter()
        .map(|(row_number, cells)| GridRowDto {
            row_number,
            annual_price: prices.for_row(is_vip, row_number),
            cells: cells
                .into_iter()
                .map(|cell| match cell {
                    DisplaySlot::Stored(slot) => {
                        let ad = slot
                            .ad_id
                            .and_then(|id| ads.get(&id))
                            .filter(|ad| is_ad_active(Some(*ad), now))
                            .map(PublicAdDto::from);
                        GridCellDto {
                            id: slot.id.to_string(),
                            slot_id: Some(slot.id),
                            row_number: slot.row_number,
                            slot_number: slot.slot_number,
                            is_virtual: false,
                            is_animated: slot.is_animated,
                            annual_price: prices.for_slot(slot.price, is_vip, slot.row_number),
                            ad,
                        }
                    }
                    DisplaySlot::Virtual {
                        id,
                        row_number,
                        slot_number,
                    } => GridCellDto {
                        id,
                        slot_id: None,
                        row_number,
                        slot_number,
                        is_virtual: true,
                        is_animated: false,
                        annual_price: prices.for_row(is_vip, row_number),
                        ad: None,
                    },
                })
                .collect(),
        })
        .collect();

    let seo = if is_vip {
        vip_seo()
    } else {
        category_seo(&category.slug, &category.name)
    };

    CategoryGridDto {
        category: CategoryResponseDto::from_category(category, &catalog.vip_slug),
        seo,
        currency: catalog.currency.clone(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal::Decimal;

    fn category(slug: &str) -> Category {
        Category {
            id: Uuid::new_v4(),
            name: "Transportas".to_string(),
            slug: slug.to_string(),
            created_at: Utc::now(),
        }
    }

    fn slot(row: i32, pos: i32, ad_id: Option<Uuid>) -> Slot {
        Slot {
            id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            row_number: row,
            slot_number: pos,
            price: None,
            duration_months: 12,
            is_animated: false,
            ad_id,
            created_at: Utc::now(),
        }
    }

    fn ad(valid_until: Option<DateTime<Utc>>) -> Ad {
        Ad {
            id: Uuid::new_v4(),
            slot_id: None,
            title: "Autoservisas".to_string(),
            url: "https://autoservisas.lt".to_string(),
            image_url: None,
            price: Decimal::from(29),
            duration_months: 12,
            valid_until,
            is_animated: false,
            created_by: "test-admin".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_grid_hides_expired_ads() {
        let now = Utc::now();
        let live = ad(Some(now + Duration::days(10)));
        let expired = ad(Some(now - Duration::days(1)));
        let slots = vec![slot(1, 1, Some(live.id)), slot(1, 2, Some(expired.id))];
        let ads: HashMap<Uuid, Ad> = [live.clone(), expired]
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        let grid = assemble_grid(
            category("transportas"),
            slots,
            &ads,
            &AnnualPrices::default(),
            &CatalogConfig::default(),
            now,
        );

        assert_eq!(grid.rows.len(), 1);
        let cells = &grid.rows[0].cells;
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0].ad.as_ref().map(|a| a.id), Some(live.id));
        assert!(cells[1].ad.is_none());
        assert!(!cells[1].is_virtual);
        assert!(cells[2].is_virtual);
        assert_eq!(cells[2].id, "virtual-1-3");
    }

    #[test]
    fn test_vip_grid_prices_and_copy() {
        let grid = assemble_grid(
            category("vip-zona"),
            vec![slot(2, 1, None)],
            &HashMap::new(),
            &AnnualPrices::default(),
            &CatalogConfig::default(),
            Utc::now(),
        );

        let rows: Vec<(i32, Decimal)> = grid
            .rows
            .iter()
            .map(|r| (r.row_number, r.annual_price))
            .collect();
        assert_eq!(rows, vec![(1, Decimal::from(49)), (2, Decimal::from(39))]);
        assert_eq!(grid.seo.h1, "VIP reklamos zona");
        assert!(grid.category.is_vip);
        assert_eq!(grid.category.path, "/");
    }

    #[test]
    fn test_regular_category_uses_category_price() {
        let grid = assemble_grid(
            category("transportas"),
            vec![],
            &HashMap::new(),
            &AnnualPrices::default(),
            &CatalogConfig::default(),
            Utc::now(),
        );

        assert_eq!(grid.rows.len(), 1);
        assert!(grid.rows[0]
            .cells
            .iter()
            .all(|c| c.annual_price == Decimal::from(29)));
        assert_eq!(grid.category.path, "/transportas");
    }
}
