//! Scout engine: browser backends and job-card extraction.
mod browser;
mod chrome;
mod extract;
mod selectors;
mod static_page;
mod types;

pub use browser::{BrowserLauncher, BrowserSession, ElementHandle, LaunchSettings};
pub use chrome::ChromeLauncher;
pub use extract::{ExtractSettings, ListingExtractor};
pub use selectors::ListingSelectors;
pub use static_page::{StaticPageLauncher, StaticPageSession};
pub use types::{BrowserError, CardError, ExtractError, Extraction, SkippedCard};
