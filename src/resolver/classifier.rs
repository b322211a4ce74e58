//! Input classification.
//!
//! # Responsibilities
//! - Decide whether user input is an absolute URL or a site-relative path
//! - Separate absolute URLs on this site from truly external ones
//! - Extract the path component that will be matched against routes
//!
//! # Design Decisions
//! - "Absolute" and "external" are different questions: a same-host
//!   absolute URL is classified `LocalUrl`, never `ExternalUrl`
//! - Locality compares host and base path; http vs https on the same
//!   host is still the same site
//! - The site base URL is passed in, never read from ambient state

use url::Url;

/// The site the resolver answers for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    base: Url,
    /// Base path without trailing slash ("" when installed at the root).
    base_path: String,
}

impl Site {
    /// Build a site from its public base URL, e.g. `https://example.org/portal`.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let base = Url::parse(base_url.trim())?;
        if base.host_str().is_none() {
            return Err(url::ParseError::EmptyHost);
        }
        let base_path = base.path().trim_end_matches('/').to_string();
        Ok(Self { base, base_path })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Returns true if the absolute URL points into this site.
    pub fn is_local(&self, url: &Url) -> bool {
        let same_host = match (url.host_str(), self.base.host_str()) {
            (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
            _ => false,
        };
        same_host && self.strip_base_path(url.path()).is_some()
    }

    /// Remove the site's base path from an absolute path.
    /// Returns None when the path lies outside the site.
    pub fn strip_base_path<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.base_path.is_empty() {
            return Some(path);
        }
        match path.strip_prefix(self.base_path.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => Some(rest),
            _ => None,
        }
    }

    /// Build an absolute URL for a site-relative path.
    pub fn absolute(&self, path: &str) -> String {
        let origin = self.base.origin().ascii_serialization();
        format!("{}{}/{}", origin, self.base_path, path.trim_start_matches('/'))
    }
}

/// How a piece of user input should be interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// An absolute URL that does not belong to this site.
    ExternalUrl(Url),

    /// An absolute URL on this site; `path` is relative to the site base.
    LocalUrl { path: String },

    /// Anything else, including bare strings and absolute paths.
    RelativePath { path: String },
}

impl InputKind {
    pub fn label(&self) -> &'static str {
        match self {
            InputKind::ExternalUrl(_) => "external_url",
            InputKind::LocalUrl { .. } => "local_url",
            InputKind::RelativePath { .. } => "relative_path",
        }
    }
}

/// Classify already-trimmed input against the site.
pub fn classify(input: &str, site: &Site) -> InputKind {
    match parse_absolute(input, site) {
        Some(url) if site.is_local(&url) => {
            let path = site.strip_base_path(url.path()).unwrap_or_default();
            InputKind::LocalUrl {
                path: path.to_string(),
            }
        }
        Some(url) => InputKind::ExternalUrl(url),
        None => InputKind::RelativePath {
            path: strip_query_and_fragment(input).to_string(),
        },
    }
}

/// Parse input as an absolute URL. Protocol-relative input (`//host/x`)
/// inherits the site's scheme.
fn parse_absolute(input: &str, site: &Site) -> Option<Url> {
    if input.starts_with("//") {
        return Url::parse(&format!("{}:{}", site.base.scheme(), input)).ok();
    }

    // A colon after a '/', '?' or '#' is part of a relative path, not a scheme.
    let colon = input.find(':')?;
    if input[..colon].contains(['/', '?', '#']) {
        return None;
    }
    Url::parse(input).ok()
}

fn strip_query_and_fragment(input: &str) -> &str {
    match input.find(['?', '#']) {
        Some(idx) => &input[..idx],
        None => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> Site {
        Site::new("http://joinup.example.eu").unwrap()
    }

    #[test]
    fn test_bare_string_is_relative() {
        assert_eq!(
            classify("abc123", &site()),
            InputKind::RelativePath {
                path: "abc123".to_string()
            }
        );
    }

    #[test]
    fn test_foreign_host_is_external() {
        let kind = classify("http://example.org/some/random/path", &site());
        assert!(matches!(kind, InputKind::ExternalUrl(url) if url.host_str() == Some("example.org")));
    }

    #[test]
    fn test_same_host_absolute_url_is_local() {
        let kind = classify("http://joinup.example.eu/rdf_entity/xyz?x=1#top", &site());
        assert_eq!(
            kind,
            InputKind::LocalUrl {
                path: "/rdf_entity/xyz".to_string()
            }
        );
    }

    #[test]
    fn test_same_host_other_format_is_local() {
        for input in [
            "https://joinup.example.eu/rdf_entity/xyz",
            "HTTP://JOINUP.EXAMPLE.EU/rdf_entity/xyz",
            "//joinup.example.eu/rdf_entity/xyz",
        ] {
            assert!(
                matches!(classify(input, &site()), InputKind::LocalUrl { .. }),
                "{input} should be local"
            );
        }
    }

    #[test]
    fn test_non_http_scheme_is_external() {
        assert!(matches!(
            classify("urn:uuid:6e8bc430-9c3a-11d9-9669-0800200c9a66", &site()),
            InputKind::ExternalUrl(_)
        ));
    }

    #[test]
    fn test_colon_inside_path_is_relative() {
        assert_eq!(
            classify("/rdf_entity/a:b", &site()),
            InputKind::RelativePath {
                path: "/rdf_entity/a:b".to_string()
            }
        );
    }

    #[test]
    fn test_base_path_prefix() {
        let site = Site::new("https://example.org/portal/").unwrap();

        assert_eq!(
            classify("https://example.org/portal/rdf_entity/xyz", &site),
            InputKind::LocalUrl {
                path: "/rdf_entity/xyz".to_string()
            }
        );
        // Same host, outside the installation path
        assert!(matches!(
            classify("https://example.org/portalx/rdf_entity/xyz", &site),
            InputKind::ExternalUrl(_)
        ));
        assert!(matches!(
            classify("https://example.org/other", &site),
            InputKind::ExternalUrl(_)
        ));
    }

    #[test]
    fn test_site_absolute() {
        assert_eq!(
            Site::new("https://example.org/portal/").unwrap().absolute("/rdf_entity/x"),
            "https://example.org/portal/rdf_entity/x"
        );
        assert_eq!(
            Site::new("http://localhost:8080").unwrap().absolute("rdf_entity/x"),
            "http://localhost:8080/rdf_entity/x"
        );
    }

    #[test]
    fn test_site_requires_host() {
        assert!(Site::new("mailto:someone@example.org").is_err());
        assert!(Site::new("nonsense").is_err());
    }
}
