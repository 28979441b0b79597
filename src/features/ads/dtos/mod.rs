mod ad_dto;

pub use ad_dto::*;
