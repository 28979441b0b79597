mod slot_service;

pub use slot_service::SlotService;
