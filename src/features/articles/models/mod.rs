mod article;
mod article_category;

pub use article::{Article, ARTICLE_COLUMNS};
pub use article_category::ArticleCategory;
