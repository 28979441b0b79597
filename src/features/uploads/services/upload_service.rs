use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::{
    get_extension_from_content_type, is_mime_type_allowed, UploadPurpose, UploadResponseDto,
    ALLOWED_MIME_TYPES, MAX_FILE_SIZE,
};
use crate::modules::storage::ObjectStorage;

/// Stores ad logos and article images in the public bucket
pub struct UploadService {
    storage: Arc<dyn ObjectStorage>,
}

impl UploadService {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }

    /// Validate and store an image under `{purpose}/{uuid}.{ext}`
    pub async fn upload_image(
        &self,
        data: Vec<u8>,
        content_type: &str,
        purpose: UploadPurpose,
    ) -> Result<UploadResponseDto> {
        if data.is_empty() {
            return Err(AppError::BadRequest("File is empty".to_string()));
        }

        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::BadRequest(format!(
                "File too large. Maximum size is {} bytes ({} MB)",
                MAX_FILE_SIZE,
                MAX_FILE_SIZE / 1024 / 1024
            )));
        }

        if !is_mime_type_allowed(content_type) {
            return Err(AppError::BadRequest(format!(
                "File type '{}' is not allowed. Allowed types: {}",
                content_type,
                ALLOWED_MIME_TYPES.join(", ")
            )));
        }

        let extension = get_extension_from_content_type(content_type).unwrap_or("bin");
        let path = format!("{}/{}.{}", purpose.folder(), Uuid::new_v4(), extension);
        let file_size = data.len() as i64;

        let url = self.storage.put_public(&path, data, content_type).await?;

        info!("Image uploaded: path={}, size={}", path, file_size);

        Ok(UploadResponseDto {
            url,
            path,
            content_type: content_type.to_string(),
            file_size,
            purpose,
        })
    }

    /// Remove a previously uploaded image given its public URL
    pub async fn delete_by_url(&self, url: &str) -> Result<()> {
        let path = self
            .path_from_url(url)
            .ok_or_else(|| AppError::BadRequest("URL does not point to an upload".to_string()))?;

        self.storage.delete_public(&path).await?;
        debug!("Image deleted: {}", path);

        Ok(())
    }

    /// Bucket path for URLs inside an upload folder
    fn path_from_url(&self, url: &str) -> Option<String> {
        let prefix = self.storage.public_url("");
        let path = url.strip_prefix(&prefix)?;

        let folder = path.split('/').next()?;
        let allowed = [UploadPurpose::AdLogos, UploadPurpose::ArticleImages]
            .iter()
            .any(|p| p.folder() == folder);

        if allowed && path.len() > folder.len() + 1 && !path.contains("..") {
            Some(path.to_string())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::storage::memory::MemoryStorage;

    fn service() -> (Arc<MemoryStorage>, UploadService) {
        let storage = Arc::new(MemoryStorage::default());
        (storage.clone(), UploadService::new(storage))
    }

    #[tokio::test]
    async fn test_upload_stores_under_purpose_folder() {
        let (storage, service) = service();

        let response = service
            .upload_image(vec![1, 2, 3], "image/png", UploadPurpose::AdLogos)
            .await
            .unwrap();

        assert!(response.path.starts_with("ad-logos/"));
        assert!(response.path.ends_with(".png"));
        assert_eq!(response.file_size, 3);
        assert_eq!(response.url, storage.public_url(&response.path));

        let objects = storage.objects.lock().unwrap();
        let (data, content_type) = objects.get(&response.path).unwrap();
        assert_eq!(data, &vec![1, 2, 3]);
        assert_eq!(content_type, "image/png");
    }

    #[tokio::test]
    async fn test_upload_rejects_non_images() {
        let (storage, service) = service();

        let result = service
            .upload_image(vec![1], "application/pdf", UploadPurpose::ArticleImages)
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert!(storage.objects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_rejects_oversized_and_empty() {
        let (_, service) = service();

        let big = vec![0u8; MAX_FILE_SIZE + 1];
        let result = service
            .upload_image(big, "image/jpeg", UploadPurpose::AdLogos)
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let result = service
            .upload_image(Vec::new(), "image/jpeg", UploadPurpose::AdLogos)
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let storage = Arc::new(MemoryStorage {
            fail_with: Some("503:unavailable".to_string()),
            ..Default::default()
        });
        let service = UploadService::new(storage);

        let result = service
            .upload_image(vec![1], "image/gif", UploadPurpose::AdLogos)
            .await;
        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    #[tokio::test]
    async fn test_delete_by_url() {
        let (storage, service) = service();
        let uploaded = service
            .upload_image(vec![9], "image/webp", UploadPurpose::ArticleImages)
            .await
            .unwrap();

        service.delete_by_url(&uploaded.url).await.unwrap();
        assert!(storage.objects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_refuses_foreign_paths() {
        let (storage, service) = service();

        for url in [
            "https://elsewhere.test/ad-logos/x.png".to_string(),
            storage.public_url("invoice-pdfs/VS-0001.pdf"),
            storage.public_url("ad-logos/"),
            storage.public_url("ad-logos/../invoice-pdfs/a.pdf"),
        ] {
            let result = service.delete_by_url(&url).await;
            assert!(matches!(result, Err(AppError::BadRequest(_))), "{}", url);
        }
    }
}
