use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::ads::dtos::PublicAdDto;
use crate::features::categories::models::Category;
use crate::features::categories::seo::CategorySeo;

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub is_vip: bool,
    /// Storefront path: `/` for the VIP zone
    pub path: String,
}

impl CategoryResponseDto {
    pub fn from_category(c: Category, vip_slug: &str) -> Self {
        Self {
            is_vip: c.is_vip(vip_slug),
            path: c.public_path(vip_slug),
            id: c.id,
            name: c.name,
            slug: c.slug,
        }
    }
}

/// One cell of the public grid
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GridCellDto {
    /// Slot UUID, or `virtual-{row}-{position}` for an empty position
    pub id: String,
    /// Stored slot id; absent for virtual cells
    pub slot_id: Option<Uuid>,
    pub row_number: i32,
    pub slot_number: i32,
    pub is_virtual: bool,
    pub is_animated: bool,
    pub annual_price: Decimal,
    /// Only active ads are attached
    pub ad: Option<PublicAdDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GridRowDto {
    pub row_number: i32,
    /// Zone price for the row, before per-slot overrides
    pub annual_price: Decimal,
    pub cells: Vec<GridCellDto>,
}

/// Category page: copy and the padded slot grid
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryGridDto {
    pub category: CategoryResponseDto,
    pub seo: CategorySeo,
    pub currency: String,
    pub rows: Vec<GridRowDto>,
}

/// Homepage: VIP grid plus the sidebar category list
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HomeDto {
    #[serde(flatten)]
    pub grid: CategoryGridDto,
    pub categories: Vec<CategoryResponseDto>,
}
