mod category;

pub use category::{sort_for_sidebar, Category, CATEGORY_COLUMNS};
