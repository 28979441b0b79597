use minijinja::{AutoEscape, Environment, Value};
use std::sync::OnceLock;
use thiserror::Error;

static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Templates bundled at compile time: (name, source)
const TEMPLATES: &[(&str, &str)] = &[
    (
        "sitemap.xml.jinja",
        include_str!("../../../templates/seo/sitemap.xml.jinja"),
    ),
    (
        "robots.txt.jinja",
        include_str!("../../../templates/seo/robots.txt.jinja"),
    ),
];

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    // Values are escaped by the callers; HTML escaping would mangle URLs
    env.set_auto_escape_callback(|_| AutoEscape::None);

    for (name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::error!("Failed to load template {}: {}", name, e);
        }
    }

    env
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a bundled template.
///
/// # Example
/// ```ignore
/// let body = render_template("robots.txt.jinja", minijinja::context! { base_url => "https://example.lt" })?;
/// ```
pub fn render_template(template_name: &str, ctx: Value) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_unknown_template() {
        let result = render_template("missing.jinja", context! {});
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_robots_template_renders() {
        let body = render_template(
            "robots.txt.jinja",
            context! { base_url => "https://example.lt", disallow => vec!["/auth"] },
        )
        .unwrap();
        assert!(body.contains("Disallow: /auth"));
        assert!(body.contains("Sitemap: https://example.lt/sitemap.xml"));
    }
}
