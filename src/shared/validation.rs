use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// URL slug made of lowercase ASCII, digits and Lithuanian letters, separated by single hyphens
    /// - Valid: "kavines", "grožio-salonai", "straipsnis-2025"
    /// - Invalid: "-kavines", "kavines-", "a--b", "Kavines", "a_b"
    pub static ref SLUG_REGEX: Regex =
        Regex::new(r"^[a-z0-9ąčęėįšųūž]+(?:-[a-z0-9ąčęėįšųūž]+)*$").unwrap();

    /// Absolute http(s) link, as entered for an ad target
    pub static ref HTTP_URL_REGEX: Regex = Regex::new(r"^https?://[^\s/$.?#][^\s]*$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("kavines"));
        assert!(SLUG_REGEX.is_match("grožio-salonai"));
        assert!(SLUG_REGEX.is_match("straipsnis-2025"));
        assert!(SLUG_REGEX.is_match("vip-zona"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-kavines"));
        assert!(!SLUG_REGEX.is_match("kavines-"));
        assert!(!SLUG_REGEX.is_match("a--b"));
        assert!(!SLUG_REGEX.is_match("Kavines"));
        assert!(!SLUG_REGEX.is_match("a_b"));
        assert!(!SLUG_REGEX.is_match(""));
    }

    #[test]
    fn test_http_url_regex() {
        assert!(HTTP_URL_REGEX.is_match("https://example.lt"));
        assert!(HTTP_URL_REGEX.is_match("http://shop.example.lt/path?q=1"));
        assert!(!HTTP_URL_REGEX.is_match("ftp://example.lt"));
        assert!(!HTTP_URL_REGEX.is_match("example.lt"));
        assert!(!HTTP_URL_REGEX.is_match("https://exa mple.lt"));
    }
}
