use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::ads::{dtos as ads_dtos, handlers as ads_handlers, lifecycle};
use crate::features::articles::{dtos as articles_dtos, handlers as articles_handlers};
use crate::features::auth;
use crate::features::categories::{
    dtos as categories_dtos, handlers as categories_handlers, seo as categories_seo,
};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::invoices::{
    dtos as invoices_dtos, handlers as invoices_handlers, models as invoices_models,
};
use crate::features::pricing::{calculator, dtos as pricing_dtos, handlers as pricing_handlers};
use crate::features::seo::handlers as seo_handlers;
use crate::features::slots::{dtos as slots_dtos, handlers as slots_handlers};
use crate::features::uploads::{dtos as uploads_dtos, handlers as uploads_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handler::get_me,
        // Catalog (public)
        categories_handlers::get_home,
        categories_handlers::list_categories,
        categories_handlers::get_category,
        ads_handlers::get_ad_card,
        // Slots & pricing (public)
        slots_handlers::get_slot_quote,
        pricing_handlers::get_price_list,
        // Articles (public)
        articles_handlers::list_published_articles,
        articles_handlers::get_published_article,
        // SEO
        seo_handlers::get_sitemap,
        seo_handlers::get_robots,
        // Admin: dashboard
        dashboard_handlers::get_summary,
        // Admin: slots and ads
        slots_handlers::list_admin_slots,
        slots_handlers::create_slot,
        ads_handlers::list_active_ads,
        ads_handlers::get_ad_stats,
        ads_handlers::create_ad,
        ads_handlers::get_ad,
        ads_handlers::update_ad,
        ads_handlers::delete_ad,
        // Admin: pricing
        pricing_handlers::get_ad_pricing,
        pricing_handlers::update_ad_pricing,
        // Admin: invoices
        invoices_handlers::list_invoices,
        invoices_handlers::get_invoice,
        invoices_handlers::update_invoice_status,
        invoices_handlers::generate_invoice_pdf,
        invoices_handlers::get_invoice_settings,
        invoices_handlers::update_invoice_settings,
        // Admin: articles
        articles_handlers::list_articles,
        articles_handlers::create_article,
        articles_handlers::get_article,
        articles_handlers::update_article,
        articles_handlers::delete_article,
        articles_handlers::list_article_categories,
        // Admin: uploads
        uploads_handlers::upload_image,
        uploads_handlers::delete_upload,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::dto::MeResponseDto,
            auth::model::AuthenticatedUser,
            ApiResponse<auth::dto::MeResponseDto>,
            // Catalog
            categories_seo::CategorySeo,
            categories_dtos::CategoryResponseDto,
            categories_dtos::GridCellDto,
            categories_dtos::GridRowDto,
            categories_dtos::CategoryGridDto,
            categories_dtos::HomeDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryGridDto>,
            ApiResponse<categories_dtos::HomeDto>,
            // Slots
            slots_dtos::SlotResponseDto,
            slots_dtos::AdminSlotDto,
            slots_dtos::AdminSlotViewDto,
            slots_dtos::CreateSlotDto,
            ApiResponse<slots_dtos::SlotResponseDto>,
            ApiResponse<slots_dtos::AdminSlotViewDto>,
            // Pricing
            calculator::AnnualPrices,
            pricing_dtos::PriceListDto,
            pricing_dtos::QuoteResponseDto,
            pricing_dtos::UpdateAdPricingDto,
            ApiResponse<pricing_dtos::PriceListDto>,
            ApiResponse<pricing_dtos::QuoteResponseDto>,
            // Ads
            lifecycle::RemainingTime,
            ads_dtos::PublicAdDto,
            ads_dtos::AdCategoryDto,
            ads_dtos::AdCardDto,
            ads_dtos::AdResponseDto,
            ads_dtos::ActiveAdDto,
            ads_dtos::ActiveAdsDto,
            ads_dtos::MonthlyAdStatDto,
            ads_dtos::InvoiceClientDto,
            ads_dtos::CreateAdDto,
            ads_dtos::UpdateAdDto,
            ads_dtos::CreateAdResponseDto,
            ApiResponse<ads_dtos::AdCardDto>,
            ApiResponse<ads_dtos::AdResponseDto>,
            ApiResponse<ads_dtos::ActiveAdsDto>,
            ApiResponse<Vec<ads_dtos::MonthlyAdStatDto>>,
            ApiResponse<ads_dtos::CreateAdResponseDto>,
            // Dashboard
            dashboard_dtos::DashboardSummaryDto,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
            // Invoices
            invoices_models::InvoiceStatus,
            invoices_dtos::InvoiceResponseDto,
            invoices_dtos::UpdateInvoiceStatusDto,
            invoices_dtos::InvoicePdfResponseDto,
            invoices_dtos::InvoiceSettingsDto,
            invoices_dtos::UpdateInvoiceSettingsDto,
            ApiResponse<invoices_dtos::InvoiceResponseDto>,
            ApiResponse<Vec<invoices_dtos::InvoiceResponseDto>>,
            ApiResponse<invoices_dtos::InvoicePdfResponseDto>,
            ApiResponse<invoices_dtos::InvoiceSettingsDto>,
            // Articles
            articles_dtos::ArticleCategoryDto,
            articles_dtos::ArticleSummaryDto,
            articles_dtos::ArticleResponseDto,
            articles_dtos::ArticleFormDto,
            ApiResponse<Vec<articles_dtos::ArticleSummaryDto>>,
            ApiResponse<Vec<articles_dtos::ArticleResponseDto>>,
            ApiResponse<articles_dtos::ArticleResponseDto>,
            ApiResponse<Vec<articles_dtos::ArticleCategoryDto>>,
            // Uploads
            uploads_dtos::UploadPurpose,
            uploads_dtos::UploadFileDto,
            uploads_dtos::UploadResponseDto,
            uploads_dtos::DeleteUploadDto,
            uploads_dtos::DeleteUploadResponseDto,
            ApiResponse<uploads_dtos::UploadResponseDto>,
            ApiResponse<uploads_dtos::DeleteUploadResponseDto>,
        )
    ),
    tags(
        (name = "auth", description = "Current caller"),
        (name = "catalog", description = "Homepage, categories and ad cards (public)"),
        (name = "slots", description = "Slot price quotes (public)"),
        (name = "pricing", description = "Published price list (public)"),
        (name = "articles", description = "Articles"),
        (name = "seo", description = "sitemap.xml and robots.txt"),
        (name = "admin", description = "Dashboard endpoints (admin only)"),
        (name = "invoices", description = "Invoices and seller details (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Vizijos Catalog API",
        version = "0.1.0",
        description = "Advertising slot catalog, invoices and articles",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_admin_and_public_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/api/home",
            "/api/categories/{slug}",
            "/api/admin/slots/{slot_id}/ads",
            "/api/admin/invoices/{id}/pdf",
            "/api/admin/uploads",
            "/sitemap.xml",
        ] {
            assert!(paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
