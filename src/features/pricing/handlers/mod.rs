mod pricing_handler;

pub use pricing_handler::*;
