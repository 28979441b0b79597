use std::sync::Arc;

use chrono::{DateTime, Months, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::config::CatalogConfig;
use crate::core::error::{AppError, Result};
use crate::features::ads::dtos::{
    ActiveAdDto, ActiveAdsDto, AdCardDto, AdCategoryDto, AdResponseDto, CreateAdDto,
    CreateAdResponseDto, MonthlyAdStatDto, PublicAdDto, UpdateAdDto,
};
use crate::features::ads::lifecycle::{compute_valid_until, is_ad_active, ValidUntilInput};
use crate::features::ads::models::{Ad, AdWithPlacement, AD_COLUMNS};
use crate::features::ads::stats::{active_totals, monthly_stats};
use crate::features::invoices::InvoiceService;
use crate::features::slots::models::{Slot, SLOT_COLUMNS};
use crate::shared::constants::DEFAULT_DURATION_MONTHS;

const CREATE_FAILED: &str = "create_failed";
const UPDATE_FAILED: &str = "update_failed";
const DELETE_FAILED: &str = "delete_failed";

const PLACEMENT_SELECT: &str = r#"
    SELECT a.id, a.slot_id, a.title, a.url, a.image_url, a.price, a.duration_months,
           a.valid_until, a.is_animated, a.created_by, a.created_at,
           s.row_number, s.slot_number,
           c.id AS category_id, c.name AS category_name, c.slug AS category_slug
    FROM ads a
    LEFT JOIN slots s ON s.id = a.slot_id
    LEFT JOIN categories c ON c.id = s.category_id
"#;

/// Service for placing, editing and reporting on ads
pub struct AdService {
    pool: PgPool,
    invoices: Arc<InvoiceService>,
    catalog: CatalogConfig,
}

/// Column values an edit writes back
#[derive(Debug, Clone, PartialEq)]
struct AdChanges {
    price: Decimal,
    duration_months: i32,
    valid_until: Option<DateTime<Utc>>,
}

impl AdService {
    pub fn new(pool: PgPool, invoices: Arc<InvoiceService>, catalog: CatalogConfig) -> Self {
        Self {
            pool,
            invoices,
            catalog,
        }
    }

    async fn find(&self, id: Uuid) -> Result<Ad> {
        sqlx::query_as::<_, Ad>(&format!("SELECT {} FROM ads WHERE id = $1", AD_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch ad: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Ad with id {} not found", id)))
    }

    /// Public ad card; expired ads are returned with `active = false`
    pub async fn public_card(&self, id: Uuid) -> Result<AdCardDto> {
        let placement =
            sqlx::query_as::<_, AdWithPlacement>(&format!("{} WHERE a.id = $1", PLACEMENT_SELECT))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to fetch ad card: {:?}", e);
                    AppError::Database(e)
                })?
                .ok_or_else(|| AppError::NotFound(format!("Ad with id {} not found", id)))?;

        Ok(ad_card(placement, &self.catalog.vip_slug, Utc::now()))
    }

    pub async fn get(&self, id: Uuid) -> Result<AdResponseDto> {
        let ad = self.find(id).await?;
        Ok(AdResponseDto::from_ad(ad, Utc::now()))
    }

    /// Active ads with placement, soonest expiry first
    pub async fn active_list(&self, category: Option<&str>) -> Result<ActiveAdsDto> {
        let now = Utc::now();
        let placements = sqlx::query_as::<_, AdWithPlacement>(&format!(
            r#"{}
            WHERE (a.valid_until IS NULL OR a.valid_until > $1)
              AND ($2::text IS NULL OR c.slug = $2)
            ORDER BY a.valid_until ASC NULLS LAST, a.created_at DESC
            "#,
            PLACEMENT_SELECT
        ))
        .bind(now)
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list active ads: {:?}", e);
            AppError::Database(e)
        })?;

        let totals = active_totals(placements.iter().map(|p| &p.ad), now);
        let ads = placements
            .into_iter()
            .filter(|p| is_ad_active(Some(p), now))
            .map(|p| ActiveAdDto::from_placement(p, now))
            .collect();

        Ok(ActiveAdsDto {
            ads,
            total_price: totals.total_price,
            monthly_total: totals.monthly_total,
        })
    }

    /// Ads created during the last twelve months, per month
    pub async fn stats(&self) -> Result<Vec<MonthlyAdStatDto>> {
        let now = Utc::now();
        let since = now.checked_sub_months(Months::new(12)).unwrap_or(now);

        let ads = sqlx::query_as::<_, Ad>(&format!(
            "SELECT {} FROM ads WHERE created_at >= $1 ORDER BY created_at ASC",
            AD_COLUMNS
        ))
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load ad stats: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(monthly_stats(&ads))
    }

    /// Place an ad into a slot, optionally issuing its invoice.
    ///
    /// The slot row stays locked until the ad is linked, so two admins cannot
    /// fill the same slot. An invoice failure is logged and the ad is kept.
    pub async fn create_for_slot(
        &self,
        slot_id: Uuid,
        dto: CreateAdDto,
        created_by: &str,
    ) -> Result<CreateAdResponseDto> {
        if dto.price.is_some_and(|p| p < Decimal::ZERO) {
            return Err(AppError::Validation("Price must not be negative".to_string()));
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin ad transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let slot = sqlx::query_as::<_, Slot>(&format!(
            "SELECT {} FROM slots WHERE id = $1 FOR UPDATE",
            SLOT_COLUMNS
        ))
        .bind(slot_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to lock slot: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Slot with id {} not found", slot_id)))?;

        if let Some(current_id) = slot.ad_id {
            let current = sqlx::query_as::<_, Ad>(&format!(
                "SELECT {} FROM ads WHERE id = $1",
                AD_COLUMNS
            ))
            .bind(current_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch current slot ad: {:?}", e);
                AppError::Database(e)
            })?;

            ensure_slot_free(slot_id, current.as_ref(), now)?;
        }

        let months = if slot.duration_months > 0 {
            slot.duration_months
        } else {
            DEFAULT_DURATION_MONTHS
        };
        let valid_until = compute_valid_until(
            ValidUntilInput::new(now, Some(months)).with_explicit(dto.valid_until.as_deref()),
        );
        let price = dto.price.or(slot.price).unwrap_or(Decimal::ZERO);

        let ad = sqlx::query_as::<_, Ad>(&format!(
            r#"
            INSERT INTO ads (id, slot_id, title, url, image_url, price, duration_months,
                valid_until, is_animated, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            AD_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(slot.id)
        .bind(dto.title.trim())
        .bind(dto.url.trim())
        .bind(non_blank(dto.image_url.as_deref()))
        .bind(price)
        .bind(months)
        .bind(valid_until)
        .bind(dto.is_animated)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert ad: {:?}", e);
            AppError::step(CREATE_FAILED, "ad_insert")
        })?;

        sqlx::query("UPDATE slots SET ad_id = $2 WHERE id = $1")
            .bind(slot.id)
            .bind(ad.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to link ad to slot: {:?}", e);
                AppError::step(CREATE_FAILED, "slot_update")
            })?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit ad creation: {:?}", e);
            AppError::step(CREATE_FAILED, "commit")
        })?;

        tracing::info!("Ad created: {} in slot {} by {}", ad.id, slot.id, created_by);

        let invoice_id = if dto.generate_invoice {
            match self
                .invoices
                .create_for_ad(&ad, dto.client.unwrap_or_default())
                .await
            {
                Ok(invoice) => Some(invoice.id),
                Err(e) => {
                    tracing::warn!("Invoice for ad {} was not issued: {}", ad.id, e);
                    None
                }
            }
        } else {
            None
        };

        Ok(CreateAdResponseDto {
            ad: AdResponseDto::from_ad(ad, now),
            invoice_id,
        })
    }

    pub async fn update(&self, id: Uuid, dto: UpdateAdDto) -> Result<AdResponseDto> {
        if dto.price.is_some_and(|p| p < Decimal::ZERO) {
            return Err(AppError::Validation("Price must not be negative".to_string()));
        }

        let existing = self.find(id).await?;
        let changes = plan_update(&existing, &dto);

        let ad = sqlx::query_as::<_, Ad>(&format!(
            r#"
            UPDATE ads
            SET title = $2, url = $3, image_url = $4, is_animated = $5, price = $6,
                duration_months = $7, valid_until = $8
            WHERE id = $1
            RETURNING {}
            "#,
            AD_COLUMNS
        ))
        .bind(id)
        .bind(dto.title.trim())
        .bind(dto.url.trim())
        .bind(non_blank(dto.image_url.as_deref()))
        .bind(dto.is_animated)
        .bind(changes.price)
        .bind(changes.duration_months)
        .bind(changes.valid_until)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update ad: {:?}", e);
            AppError::step(UPDATE_FAILED, "ad_update")
        })?;

        tracing::info!("Ad updated: {}", ad.id);

        Ok(AdResponseDto::from_ad(ad, Utc::now()))
    }

    /// Delete an ad and free its slot
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin ad deletion: {:?}", e);
            AppError::Database(e)
        })?;

        sqlx::query("UPDATE slots SET ad_id = NULL WHERE ad_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to release slot: {:?}", e);
                AppError::step(DELETE_FAILED, "slot_release")
            })?;

        let result = sqlx::query("DELETE FROM ads WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete ad: {:?}", e);
                AppError::step(DELETE_FAILED, "ad_delete")
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Ad with id {} not found", id)));
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit ad deletion: {:?}", e);
            AppError::step(DELETE_FAILED, "commit")
        })?;

        tracing::info!("Ad deleted: {}", id);

        Ok(())
    }
}

/// A slot takes a new ad when it is empty or its linked ad has expired.
pub fn slot_is_free(current: Option<&Ad>, now: DateTime<Utc>) -> bool {
    !is_ad_active(current, now)
}

fn ensure_slot_free(slot_id: Uuid, current: Option<&Ad>, now: DateTime<Utc>) -> Result<()> {
    if slot_is_free(current, now) {
        Ok(())
    } else {
        Err(AppError::Conflict(format!(
            "Slot {} already holds an active ad",
            slot_id
        )))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Price and expiry after an edit.
///
/// The expiry is only recomputed (from the creation date) when the edit
/// names a new duration or an explicit date.
fn plan_update(existing: &Ad, dto: &UpdateAdDto) -> AdChanges {
    let explicit = non_blank(dto.valid_until.as_deref());
    let months = dto
        .duration_months
        .filter(|m| *m > 0)
        .or(Some(existing.duration_months).filter(|m| *m > 0))
        .unwrap_or(DEFAULT_DURATION_MONTHS);

    let valid_until = if explicit.is_some() || dto.duration_months.is_some() {
        compute_valid_until(
            ValidUntilInput::new(existing.created_at, Some(months)).with_explicit(explicit),
        )
    } else {
        existing.valid_until
    };

    AdChanges {
        price: dto.price.unwrap_or(existing.price),
        duration_months: dto.duration_months.unwrap_or(existing.duration_months),
        valid_until,
    }
}

fn ad_card(placement: AdWithPlacement, vip_slug: &str, now: DateTime<Utc>) -> AdCardDto {
    let active = is_ad_active(Some(&placement), now);
    let category = match (placement.category_name, placement.category_slug) {
        (Some(name), Some(slug)) => Some(AdCategoryDto {
            path: if slug == vip_slug {
                "/".to_string()
            } else {
                format!("/{}", slug)
            },
            name,
            slug,
        }),
        _ => None,
    };

    AdCardDto {
        ad: PublicAdDto::from(&placement.ad),
        active,
        category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn existing() -> Ad {
        Ad {
            id: Uuid::new_v4(),
            slot_id: Some(Uuid::new_v4()),
            title: "Autoservisas".to_string(),
            url: "https://autoservisas.lt".to_string(),
            image_url: None,
            price: Decimal::from(29),
            duration_months: 12,
            valid_until: Some(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()),
            is_animated: false,
            created_by: "test-admin".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap(),
        }
    }

    fn edit() -> UpdateAdDto {
        UpdateAdDto {
            title: "Autoservisas".to_string(),
            url: "https://autoservisas.lt".to_string(),
            image_url: None,
            price: None,
            is_animated: false,
            duration_months: None,
            valid_until: None,
        }
    }

    #[test]
    fn test_plain_edit_keeps_expiry_and_price() {
        let ad = existing();
        let changes = plan_update(&ad, &edit());
        assert_eq!(changes.valid_until, ad.valid_until);
        assert_eq!(changes.price, Decimal::from(29));
        assert_eq!(changes.duration_months, 12);
    }

    #[test]
    fn test_new_duration_recomputes_from_creation() {
        let changes = plan_update(
            &existing(),
            &UpdateAdDto {
                duration_months: Some(3),
                price: Some(Decimal::from(99)),
                ..edit()
            },
        );
        assert_eq!(
            changes.valid_until,
            Some(Utc.with_ymd_and_hms(2025, 4, 15, 10, 0, 0).unwrap())
        );
        assert_eq!(changes.duration_months, 3);
        assert_eq!(changes.price, Decimal::from(99));
    }

    #[test]
    fn test_empty_slot_is_free() {
        assert!(slot_is_free(None, Utc::now()));
        assert!(ensure_slot_free(Uuid::new_v4(), None, Utc::now()).is_ok());
    }

    #[test]
    fn test_slot_with_expired_ad_is_free() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let ad = existing();
        assert!(slot_is_free(Some(&ad), now));
    }

    #[test]
    fn test_slot_with_active_ad_conflicts() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let ad = existing();
        assert!(!slot_is_free(Some(&ad), now));

        let err = ensure_slot_free(Uuid::new_v4(), Some(&ad), now).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_open_ended_ad_keeps_slot_taken() {
        let ad = Ad {
            valid_until: None,
            ..existing()
        };
        assert!(!slot_is_free(Some(&ad), Utc::now()));
    }

    #[test]
    fn test_explicit_date_wins() {
        let changes = plan_update(
            &existing(),
            &UpdateAdDto {
                valid_until: Some("2027-06-01T00:00:00Z".to_string()),
                ..edit()
            },
        );
        assert_eq!(
            changes.valid_until,
            Some(Utc.with_ymd_and_hms(2027, 6, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(changes.duration_months, 12);
    }

    #[test]
    fn test_blank_date_is_ignored() {
        let ad = existing();
        let changes = plan_update(
            &ad,
            &UpdateAdDto {
                valid_until: Some("  ".to_string()),
                ..edit()
            },
        );
        assert_eq!(changes.valid_until, ad.valid_until);
    }

    fn placement(slug: Option<&str>, valid_until: Option<DateTime<Utc>>) -> AdWithPlacement {
        AdWithPlacement {
            ad: Ad {
                valid_until,
                ..existing()
            },
            row_number: Some(1),
            slot_number: Some(2),
            category_id: slug.map(|_| Uuid::new_v4()),
            category_name: slug.map(|s| s.to_uppercase()),
            category_slug: slug.map(str::to_string),
        }
    }

    #[test]
    fn test_ad_card_paths_and_activity() {
        let now = Utc::now();

        let vip = ad_card(placement(Some("vip-zona"), None), "vip-zona", now);
        assert!(vip.active);
        assert_eq!(vip.category.unwrap().path, "/");

        let expired = ad_card(
            placement(Some("transportas"), Some(now - Duration::days(1))),
            "vip-zona",
            now,
        );
        assert!(!expired.active);
        assert_eq!(expired.category.unwrap().path, "/transportas");

        let orphan = ad_card(placement(None, None), "vip-zona", now);
        assert!(orphan.category.is_none());
    }
}
