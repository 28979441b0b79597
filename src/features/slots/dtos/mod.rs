mod slot_dto;

pub use slot_dto::{
    AdminSlotDto, AdminSlotQuery, AdminSlotViewDto, CreateSlotDto, QuoteQuery, SlotResponseDto,
};
