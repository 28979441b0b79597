use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::constants::{STORAGE_AD_LOGOS, STORAGE_ARTICLE_IMAGES};

/// Where an uploaded image ends up in the bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum UploadPurpose {
    AdLogos,
    ArticleImages,
}

impl UploadPurpose {
    /// Accepts the folder name as well as its singular form
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "ad-logos" | "ad-logo" => Some(UploadPurpose::AdLogos),
            "article-images" | "article-image" => Some(UploadPurpose::ArticleImages),
            _ => None,
        }
    }

    pub fn folder(self) -> &'static str {
        match self {
            UploadPurpose::AdLogos => STORAGE_AD_LOGOS,
            UploadPurpose::ArticleImages => STORAGE_ARTICLE_IMAGES,
        }
    }
}

/// Upload form for OpenAPI documentation.
/// The handler reads the multipart stream directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFileDto {
    /// The image to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// "ad-logos" (default) or "article-images"
    #[schema(example = "ad-logos")]
    pub purpose: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponseDto {
    /// Public URL of the stored image
    pub url: String,
    /// Object path inside the bucket
    pub path: String,
    pub content_type: String,
    pub file_size: i64,
    pub purpose: UploadPurpose,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteUploadDto {
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteUploadResponseDto {
    pub deleted: bool,
}

/// Image types accepted for logos and article pictures
pub const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Maximum upload size in bytes (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

pub fn is_mime_type_allowed(content_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&content_type)
}

pub fn get_extension_from_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purpose_parse() {
        assert_eq!(UploadPurpose::parse("ad-logos"), Some(UploadPurpose::AdLogos));
        assert_eq!(
            UploadPurpose::parse(" Article-Image "),
            Some(UploadPurpose::ArticleImages)
        );
        assert_eq!(UploadPurpose::parse("invoice-pdfs"), None);
    }

    #[test]
    fn test_only_images_are_allowed() {
        assert!(is_mime_type_allowed("image/webp"));
        assert!(!is_mime_type_allowed("application/pdf"));
        assert_eq!(get_extension_from_content_type("image/jpeg"), Some("jpg"));
        assert_eq!(get_extension_from_content_type("text/plain"), None);
    }
}
