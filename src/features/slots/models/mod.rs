mod slot;

pub use slot::{CreateSlot, Slot, SLOT_COLUMNS};
