use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::ads::lifecycle::{format_vilnius_date_time, remaining_time_info, RemainingTime};
use crate::features::ads::models::{Ad, AdWithPlacement};
use crate::shared::validation::HTTP_URL_REGEX;

/// Days left under which the dashboard highlights an ad
pub const EXPIRING_SOON_DAYS: i64 = 30;

/// Ad as shown on the public grid
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicAdDto {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
    pub is_animated: bool,
    pub valid_until: Option<DateTime<Utc>>,
}

impl From<&Ad> for PublicAdDto {
    fn from(a: &Ad) -> Self {
        Self {
            id: a.id,
            title: a.title.clone(),
            url: a.url.clone(),
            image_url: a.image_url.clone(),
            is_animated: a.is_animated,
            valid_until: a.valid_until,
        }
    }
}

/// Category link on the public ad card
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdCategoryDto {
    pub name: String,
    pub slug: String,
    /// Storefront path: `/` for the VIP zone, `/{slug}` otherwise
    pub path: String,
}

/// Public ad card. Expired ads are still returned with `active = false`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdCardDto {
    #[serde(flatten)]
    pub ad: PublicAdDto,
    pub active: bool,
    pub category: Option<AdCategoryDto>,
}

/// Response DTO for ad (dashboard)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdResponseDto {
    pub id: Uuid,
    pub slot_id: Option<Uuid>,
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
    pub price: Decimal,
    pub duration_months: i32,
    pub valid_until: Option<DateTime<Utc>>,
    /// `valid_until` in Vilnius time, `YYYY-MM-DD HH:MM`
    pub valid_until_local: String,
    pub is_animated: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub remaining: RemainingTime,
    pub expiring_soon: bool,
}

impl AdResponseDto {
    pub fn from_ad(a: Ad, now: DateTime<Utc>) -> Self {
        let remaining = remaining_time_info(a.valid_until, now);
        let expiring_soon = remaining
            .total_days
            .is_some_and(|days| (0..=EXPIRING_SOON_DAYS).contains(&days));

        Self {
            id: a.id,
            slot_id: a.slot_id,
            title: a.title,
            url: a.url,
            image_url: a.image_url,
            price: a.price,
            duration_months: a.duration_months,
            valid_until_local: format_vilnius_date_time(a.valid_until),
            valid_until: a.valid_until,
            is_animated: a.is_animated,
            created_by: a.created_by,
            created_at: a.created_at,
            remaining,
            expiring_soon,
        }
    }
}

/// Active ad with its placement (dashboard list)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActiveAdDto {
    #[serde(flatten)]
    pub ad: AdResponseDto,
    pub row_number: Option<i32>,
    pub slot_number: Option<i32>,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
}

impl ActiveAdDto {
    pub fn from_placement(p: AdWithPlacement, now: DateTime<Utc>) -> Self {
        Self {
            ad: AdResponseDto::from_ad(p.ad, now),
            row_number: p.row_number,
            slot_number: p.slot_number,
            category_name: p.category_name,
            category_slug: p.category_slug,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActiveAdsDto {
    pub ads: Vec<ActiveAdDto>,
    /// Sum of full-period prices
    pub total_price: Decimal,
    /// Sum of `price / duration_months`
    pub monthly_total: Decimal,
}

/// Ads created in one calendar month
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MonthlyAdStatDto {
    /// `YYYY-MM`
    pub month: String,
    pub count: i64,
    pub sum: Decimal,
}

/// Buyer details for the invoice issued together with an ad
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct InvoiceClientDto {
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 64))]
    pub code: Option<String>,
    #[validate(length(max = 64))]
    pub vat_code: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

/// DTO for placing an ad into a slot
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateAdDto {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    #[validate(regex(path = *HTTP_URL_REGEX, message = "URL must start with http:// or https://"))]
    pub url: String,
    pub image_url: Option<String>,
    /// Defaults to the slot price, then 0
    pub price: Option<Decimal>,
    #[serde(default)]
    pub is_animated: bool,
    /// Explicit expiry; otherwise the slot duration is added to now
    pub valid_until: Option<String>,
    /// Also issue an invoice for the ad
    #[serde(default)]
    pub generate_invoice: bool,
    #[validate(nested)]
    pub client: Option<InvoiceClientDto>,
}

/// DTO for editing an ad
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateAdDto {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    #[validate(regex(path = *HTTP_URL_REGEX, message = "URL must start with http:// or https://"))]
    pub url: String,
    pub image_url: Option<String>,
    /// Left unchanged when absent
    pub price: Option<Decimal>,
    #[serde(default)]
    pub is_animated: bool,
    /// When given, expiry is recomputed from the ad's creation date
    #[validate(range(min = 1, max = 120))]
    pub duration_months: Option<i32>,
    /// When given, replaces the expiry
    pub valid_until: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAdResponseDto {
    pub ad: AdResponseDto,
    /// Set when an invoice was requested and issued
    pub invoice_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ad(valid_until: Option<DateTime<Utc>>) -> Ad {
        Ad {
            id: Uuid::new_v4(),
            slot_id: None,
            title: "Sodo prekės".to_string(),
            url: "https://sodas.lt".to_string(),
            image_url: None,
            price: Decimal::from(29),
            duration_months: 12,
            valid_until,
            is_animated: false,
            created_by: "admin".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_expiring_soon_window() {
        let now = Utc::now();
        assert!(AdResponseDto::from_ad(ad(Some(now + Duration::days(10))), now).expiring_soon);
        assert!(!AdResponseDto::from_ad(ad(Some(now + Duration::days(90))), now).expiring_soon);
        assert!(!AdResponseDto::from_ad(ad(Some(now - Duration::days(2))), now).expiring_soon);
        assert!(!AdResponseDto::from_ad(ad(None), now).expiring_soon);
    }

    #[test]
    fn test_create_dto_validation() {
        let dto = CreateAdDto {
            title: "".to_string(),
            url: "ftp://x".to_string(),
            image_url: None,
            price: None,
            is_animated: false,
            valid_until: None,
            generate_invoice: false,
            client: None,
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(errors.field_errors().contains_key("url"));
    }
}
