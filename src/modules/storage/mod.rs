//! Object storage for public files.
//!
//! Services talk to [`ObjectStorage`]; production wires in [`S3Storage`].

mod s3_client;

use async_trait::async_trait;

use crate::core::error::AppError;

pub use s3_client::S3Storage;

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Write (or overwrite) a publicly readable object and return its URL.
    ///
    /// Failures are reported as `AppError::Storage("{code}:{message}")`.
    async fn put_public(&self, path: &str, data: Vec<u8>, content_type: &str)
        -> Result<String, AppError>;

    async fn delete_public(&self, path: &str) -> Result<(), AppError>;

    fn public_url(&self, path: &str) -> String;
}

#[cfg(test)]
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-process storage used by tests
    #[derive(Default)]
    pub struct MemoryStorage {
        pub objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
        pub fail_with: Option<String>,
    }

    #[async_trait]
    impl ObjectStorage for MemoryStorage {
        async fn put_public(
            &self,
            path: &str,
            data: Vec<u8>,
            content_type: &str,
        ) -> Result<String, AppError> {
            if let Some(reason) = &self.fail_with {
                return Err(AppError::Storage(reason.clone()));
            }
            self.objects
                .lock()
                .unwrap()
                .insert(path.to_string(), (data, content_type.to_string()));
            Ok(self.public_url(path))
        }

        async fn delete_public(&self, path: &str) -> Result<(), AppError> {
            self.objects.lock().unwrap().remove(path);
            Ok(())
        }

        fn public_url(&self, path: &str) -> String {
            format!("https://storage.test/public/{}", path)
        }
    }
}
