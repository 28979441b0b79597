mod article_dto;

pub use article_dto::{ArticleCategoryDto, ArticleFormDto, ArticleResponseDto, ArticleSummaryDto};
