pub mod dtos;
pub mod handlers;
pub mod lifecycle;
pub mod models;
pub mod routes;
pub mod services;
pub mod stats;

pub use services::AdService;
