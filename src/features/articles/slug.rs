use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(r"[\s_]+").unwrap();
    static ref DISALLOWED: Regex = Regex::new(r"[^a-z0-9ąčęėįšųūž-]").unwrap();
    static ref HYPHEN_RUNS: Regex = Regex::new(r"-+").unwrap();
}

/// URL slug from a title or a typed slug.
///
/// Lowercases, turns whitespace and underscores into hyphens, drops anything
/// outside `a-z`, digits and Lithuanian letters, then collapses and trims
/// hyphens. May return an empty string.
pub fn slugify(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let separated = SEPARATORS.replace_all(&lowered, "-");
    let filtered = DISALLOWED.replace_all(&separated, "");
    let collapsed = HYPHEN_RUNS.replace_all(&filtered, "-");
    collapsed.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::SLUG_REGEX;

    #[test]
    fn test_lithuanian_title() {
        assert_eq!(
            slugify("Kaip išsirinkti  grožio_saloną?"),
            "kaip-išsirinkti-grožio-saloną"
        );
        assert_eq!(slugify("ŽALIAS Sodas"), "žalias-sodas");
    }

    #[test]
    fn test_punctuation_and_hyphens() {
        assert_eq!(slugify("  -- 2025 m. naujienos!! -- "), "2025-m-naujienos");
        assert_eq!(slugify("a - b"), "a-b");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_output_is_a_valid_slug() {
        for title in ["Straipsnis apie SEO", "Ąžuolų   alėja", "x_y_z", "Café 24/7"] {
            let slug = slugify(title);
            assert!(SLUG_REGEX.is_match(&slug), "{} -> {}", title, slug);
        }
    }
}
