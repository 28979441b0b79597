mod category_dto;

pub use category_dto::{CategoryGridDto, CategoryResponseDto, GridCellDto, GridRowDto, HomeDto};
