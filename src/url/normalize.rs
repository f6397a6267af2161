use crate::{UrlError, UrlResult};
use url::Url;

/// Parses and validates a seed address
///
/// A seed must be an absolute HTTP or HTTPS URL with a host.
///
/// # Examples
///
/// ```
/// use linkcrawl::url::parse_seed;
///
/// let seed = parse_seed("https://example.com/start").unwrap();
/// assert_eq!(seed.host_str(), Some("example.com"));
/// assert!(parse_seed("ftp://example.com/").is_err());
/// ```
pub fn parse_seed(address: &str) -> UrlResult<Url> {
    let url = Url::parse(address.trim())?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(address.to_string()));
    }

    Ok(url)
}

/// Resolves an href found on `base` into a full address
///
/// # Normalization Steps
///
/// 1. Resolve `href` relative to `base`
/// 2. Remove the fragment (`#top`) unless `keep_fragment`
/// 3. Remove the query (`?foo=bar`) unless `keep_query`
///
/// # Examples
///
/// ```
/// use linkcrawl::url::unify_url;
///
/// let url = unify_url("../about?lang=fr#team", "https://example.com/blog/post", false, false).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/about");
/// ```
pub fn unify_url(href: &str, base: &str, keep_fragment: bool, keep_query: bool) -> UrlResult<Url> {
    let base = Url::parse(base)?;
    let mut url = base.join(href.trim())?;

    if !keep_fragment {
        url.set_fragment(None);
    }

    if !keep_query {
        url.set_query(None);
    }

    Ok(url)
}
