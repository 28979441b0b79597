mod pricing_dto;

pub use pricing_dto::{PriceListDto, QuoteResponseDto, UpdateAdPricingDto};
