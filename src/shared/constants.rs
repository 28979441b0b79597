/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// CATALOG
// =============================================================================

/// Ad duration used when neither the request nor the slot specify one
pub const DEFAULT_DURATION_MONTHS: i32 = 12;

/// Description printed on invoices that have none
pub const DEFAULT_INVOICE_DESCRIPTION: &str = "Reklamos talpinimas kataloge";

// =============================================================================
// STORAGE PATHS
// =============================================================================

pub const STORAGE_AD_LOGOS: &str = "ad-logos";
pub const STORAGE_ARTICLE_IMAGES: &str = "article-images";
pub const STORAGE_INVOICE_PDFS: &str = "invoice-pdfs";
