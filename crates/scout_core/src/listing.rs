use url::Url;

/// Origin that relative job links on the results page are resolved against.
pub const SITE_ORIGIN: &str = "https://www.upwork.com";

/// One job card as read from the results page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobListing {
    pub title: String,
    pub url: String,
    pub description: String,
    pub rate: String,
    pub experience: String,
    pub duration: String,
    pub tags: Vec<String>,
}

/// Resolves a card's `href` against [`SITE_ORIGIN`].
///
/// Returns `None` for empty references and for anything that does not end up
/// as an `http`/`https` link (`javascript:`, `mailto:`, ...).
pub fn absolute_job_url(href: &str) -> Option<String> {
    let trimmed = href.trim();
    if trimmed.is_empty() {
        return None;
    }
    let resolved = match Url::parse(trimmed) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(SITE_ORIGIN).ok()?.join(trimmed).ok()?
        }
        Err(_) => return None,
    };
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.into())
}
