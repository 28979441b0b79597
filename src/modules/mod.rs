//! Infrastructure adapters for external services.

pub mod storage;
