pub mod dtos;
pub mod grid;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::SlotService;
