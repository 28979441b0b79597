//! sitemap.xml and robots.txt content.

use chrono::{DateTime, SecondsFormat, Utc};
use minijinja::context;
use serde::Serialize;

use crate::features::articles::models::Article;
use crate::features::categories::dtos::CategoryResponseDto;
use crate::shared::templates::{render_template, TemplateError};

/// Informational pages of the storefront
pub const STATIC_PATHS: [&str; 7] = [
    "/",
    "/kainos",
    "/apie-kataloga",
    "/kontaktai",
    "/taisykles",
    "/privatumas",
    "/straipsniai",
];

/// Paths crawlers are asked to skip
pub const DISALLOWED_PATHS: [&str; 4] = ["/auth", "/auth/login", "/dashboard", "/dashboard/*"];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub last_modified: Option<String>,
    pub change_frequency: Option<&'static str>,
    pub priority: Option<&'static str>,
}

/// Escape text for XML element content
pub fn xml_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn entry(
    base_url: &str,
    path: &str,
    last_modified: DateTime<Utc>,
    change_frequency: &'static str,
    priority: &'static str,
) -> SitemapEntry {
    SitemapEntry {
        loc: xml_escape(&format!("{}{}", base_url, path)),
        last_modified: Some(timestamp(last_modified)),
        change_frequency: Some(change_frequency),
        priority: Some(priority),
    }
}

/// Static pages, then non-VIP categories, then published articles
pub fn sitemap_entries(
    base_url: &str,
    categories: &[CategoryResponseDto],
    articles: &[Article],
    now: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let statics = STATIC_PATHS.iter().map(|path| {
        let priority = if *path == "/" { "1.0" } else { "0.5" };
        entry(base_url, path, now, "weekly", priority)
    });

    let category_pages = categories
        .iter()
        .filter(|c| !c.is_vip && !c.slug.is_empty())
        .map(|c| {
            entry(
                base_url,
                &format!("/{}", urlencoding::encode(&c.slug)),
                now,
                "daily",
                "0.8",
            )
        });

    let article_pages = articles
        .iter()
        .filter(|a| a.published && !a.slug.is_empty())
        .map(|a| {
            entry(
                base_url,
                &format!("/straipsniai/{}", urlencoding::encode(&a.slug)),
                a.updated_at,
                "monthly",
                "0.6",
            )
        });

    statics.chain(category_pages).chain(article_pages).collect()
}

pub fn render_sitemap(entries: &[SitemapEntry]) -> Result<String, TemplateError> {
    render_template("sitemap.xml.jinja", context! { entries => entries })
}

pub fn render_robots(base_url: &str) -> Result<String, TemplateError> {
    render_template(
        "robots.txt.jinja",
        context! { base_url => base_url, disallow => DISALLOWED_PATHS.to_vec() },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn category(slug: &str, is_vip: bool) -> CategoryResponseDto {
        CategoryResponseDto {
            id: Uuid::new_v4(),
            name: slug.to_string(),
            slug: slug.to_string(),
            is_vip,
            path: format!("/{}", slug),
        }
    }

    fn article(slug: &str, published: bool) -> Article {
        let at = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
        Article {
            id: Uuid::new_v4(),
            title: slug.to_string(),
            slug: slug.to_string(),
            body: String::new(),
            body_html: None,
            excerpt: None,
            cover_image_url: None,
            category_id: None,
            meta_title: None,
            meta_description: None,
            published,
            published_at: Some(at),
            created_by: "test-admin".to_string(),
            created_at: at,
            updated_at: at,
            category_name: None,
        }
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape("a&b<c>\"'"), "a&amp;b&lt;c&gt;&quot;&apos;");
        assert_eq!(xml_escape("grožio-salonai"), "grožio-salonai");
    }

    #[test]
    fn test_entries_skip_vip_and_drafts() {
        let entries = sitemap_entries(
            "https://example.lt",
            &[category("vip-zona", true), category("transportas", false)],
            &[article("seo-patarimai", true), article("juodrastis", false)],
            Utc::now(),
        );

        let locs: Vec<&str> = entries.iter().map(|e| e.loc.as_str()).collect();
        assert_eq!(locs.len(), STATIC_PATHS.len() + 2);
        assert_eq!(locs[0], "https://example.lt/");
        assert!(locs.contains(&"https://example.lt/transportas"));
        assert!(!locs.iter().any(|l| l.ends_with("/vip-zona")));
        assert!(!locs.iter().any(|l| l.contains("juodrastis")));

        let article_entry = entries.last().unwrap();
        assert_eq!(article_entry.loc, "https://example.lt/straipsniai/seo-patarimai");
        assert_eq!(
            article_entry.last_modified.as_deref(),
            Some("2025-05-01T08:00:00Z")
        );
    }

    #[test]
    fn test_non_ascii_slugs_are_percent_encoded() {
        let entries = sitemap_entries(
            "https://example.lt",
            &[category("grožis", false)],
            &[article("ką-žinoti", true)],
            Utc::now(),
        );

        let locs: Vec<&str> = entries.iter().map(|e| e.loc.as_str()).collect();
        assert!(locs.contains(&"https://example.lt/gro%C5%BEis"));
        assert!(locs.contains(&"https://example.lt/straipsniai/k%C4%85-%C5%BEinoti"));
    }

    #[test]
    fn test_rendered_sitemap_is_xml() {
        let entries = sitemap_entries("https://example.lt?a=1&b=2", &[], &[], Utc::now());
        let xml = render_sitemap(&entries).unwrap();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<loc>https://example.lt?a=1&amp;b=2/</loc>"));
        assert!(!xml.contains("&b=2"));
    }

    #[test]
    fn test_robots_lists_private_paths() {
        let body = render_robots("https://example.lt").unwrap();
        assert!(body.contains("Disallow: /dashboard/*"));
        assert!(body.contains("Sitemap: https://example.lt/sitemap.xml"));
    }
}
