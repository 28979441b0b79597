mod ad;

pub use ad::{Ad, AdWithPlacement, AD_COLUMNS};
