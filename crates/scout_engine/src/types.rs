use std::time::Duration;

use scout_core::JobListing;
use thiserror::Error;

/// Failure reported by a browser backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrowserError {
    #[error("browser launch failed: {0}")]
    Launch(String),
    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },
    #[error("timed out after {waited:?} waiting for {target}")]
    Timeout { target: String, waited: Duration },
    #[error("invalid selector `{0}`")]
    InvalidSelector(String),
    #[error("browser protocol error: {0}")]
    Protocol(String),
}

/// Batch-fatal failure: no listings are returned.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not start the browser: {0}")]
    Launch(#[source] BrowserError),
    #[error("could not load {url}: {source}")]
    Navigation {
        url: String,
        #[source]
        source: BrowserError,
    },
    #[error("timed out after {waited:?} waiting for {target}")]
    NavigationTimeout { target: String, waited: Duration },
    #[error("could not list job cards: {0}")]
    CardQuery(#[source] BrowserError),
}

/// Card-local failure: the card is skipped, the batch continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("card has no title element")]
    MissingTitle,
    #[error("title element has no usable href")]
    MissingLink,
    #[error(transparent)]
    Browser(#[from] BrowserError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCard {
    /// Zero-based position of the card in page order.
    pub index: usize,
    pub error: CardError,
}

/// Result of one extraction pass over a results page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extraction {
    /// Parsed cards in page order.
    pub listings: Vec<JobListing>,
    pub skipped: Vec<SkippedCard>,
}
