use crate::url::unify_url;
use crate::UrlResult;
use url::{ParseError, Url};

/// Rules deciding which links found on a page are followed, and how they
/// are turned into addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkPolicy {
    /// Keep the fragment part of a URL, e.g. `#top`
    pub keep_fragment: bool,

    /// Keep the query part of a URL, e.g. `?foo=bar`
    pub keep_query: bool,

    /// Only follow links pointing at the host of the page they were found on
    pub stay_on_domain: bool,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self {
            keep_fragment: false,
            keep_query: false,
            stay_on_domain: true,
        }
    }
}

impl LinkPolicy {
    /// Determines whether an href found on `base` should be crawled
    ///
    /// | href | stay on domain | result |
    /// |------|----------------|--------|
    /// | malformed | any | false |
    /// | relative (`/a`, `b.html`) | yes | true |
    /// | any, base malformed | any | false |
    /// | absolute or `//host/...` | yes | same host and port as base |
    /// | anything else | no | true |
    pub fn should_crawl(&self, base: &str, href: &str) -> bool {
        let href = href.trim();

        let candidate = match Url::parse(href) {
            Ok(url) => Some(url),
            Err(ParseError::RelativeUrlWithoutBase) => None,
            Err(_) => return false,
        };

        // Scheme-relative hrefs (`//host/path`) still name a host.
        let relative = match &candidate {
            Some(url) => is_relative_link(url),
            None => !href.starts_with("//"),
        };

        if self.stay_on_domain && relative {
            return true;
        }

        let base_url = match Url::parse(base) {
            Ok(url) => url,
            Err(_) => return false,
        };

        if !self.stay_on_domain {
            return true;
        }

        let target = match candidate {
            Some(url) => url,
            None => match base_url.join(href) {
                Ok(url) => url,
                Err(_) => return false,
            },
        };

        same_authority(&target, &base_url)
    }

    /// Turns an approved href into the address the crawler will claim
    pub fn unify(&self, href: &str, base: &str) -> UrlResult<Url> {
        unify_url(href, base, self.keep_fragment, self.keep_query)
    }
}

/// Checks if a URL carries no host and an HTTP-ish (or no) scheme
///
/// `mailto:foo@example.com` has no host but is not relative.
pub fn is_relative_link(url: &Url) -> bool {
    !url.has_host() && (url.scheme().is_empty() || url.scheme().starts_with("http"))
}

fn same_authority(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port_or_known_default() == b.port_or_known_default()
}
