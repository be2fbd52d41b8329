//! Origin classification of probe URLs against the hosting page

use crate::types::OriginKind;
use url::Url;

/// Decide whether `url` shares the page's origin
///
/// Relative URLs are resolved against the page location first. Origins are
/// compared by their serialized form, so two opaque origins (`"null"`) match
/// the same way they do for a page loaded in a browser. A URL that cannot be
/// resolved is treated as same-origin, which keeps its status code visible.
pub fn classify_origin(url: &str, page_location: &Url) -> OriginKind {
    let page_origin = page_location.origin().ascii_serialization();

    match page_location.join(url) {
        Ok(resolved) if resolved.origin().ascii_serialization() != page_origin => {
            OriginKind::CrossOrigin
        }
        _ => OriginKind::SameOrigin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("http://127.0.0.1:9090/release/index.html").unwrap()
    }

    #[test]
    fn test_relative_urls_are_same_origin() {
        assert_eq!(classify_origin("/api/status", &page()), OriginKind::SameOrigin);
        assert_eq!(classify_origin("status.json", &page()), OriginKind::SameOrigin);
        assert_eq!(classify_origin("../api?x=1", &page()), OriginKind::SameOrigin);
    }

    #[test]
    fn test_absolute_same_origin() {
        assert_eq!(
            classify_origin("http://127.0.0.1:9090/api/status", &page()),
            OriginKind::SameOrigin
        );
    }

    #[test]
    fn test_port_difference_is_cross_origin() {
        assert_eq!(
            classify_origin("http://127.0.0.1:8563/ping", &page()),
            OriginKind::CrossOrigin
        );
    }

    #[test]
    fn test_scheme_and_host_differences_are_cross_origin() {
        assert_eq!(
            classify_origin("https://127.0.0.1:9090/", &page()),
            OriginKind::CrossOrigin
        );
        assert_eq!(
            classify_origin("http://otherhost:9090/", &page()),
            OriginKind::CrossOrigin
        );
        assert_eq!(
            classify_origin("//otherhost:8563/ping", &page()),
            OriginKind::CrossOrigin
        );
    }

    #[test]
    fn test_default_port_matches_explicit_port() {
        let page = Url::parse("https://status.example.com/").unwrap();
        assert_eq!(
            classify_origin("https://status.example.com:443/api", &page),
            OriginKind::SameOrigin
        );
    }

    #[test]
    fn test_unresolvable_url_defaults_to_same_origin() {
        assert_eq!(classify_origin("http://[::1", &page()), OriginKind::SameOrigin);
        assert_eq!(classify_origin("http://exa mple.com/", &page()), OriginKind::SameOrigin);
    }
}
