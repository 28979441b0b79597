//! Text templates for machine-read site files.
//!
//! Templates live in `templates/seo/` and are compiled into the binary, so
//! rendering never touches the filesystem at request time.

mod engine;

pub use engine::{render_template, TemplateError};
