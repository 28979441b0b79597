mod seo_handler;

pub use seo_handler::*;
