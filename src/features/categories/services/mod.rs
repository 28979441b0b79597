mod category_service;

pub use category_service::{assemble_grid, CategoryService};
