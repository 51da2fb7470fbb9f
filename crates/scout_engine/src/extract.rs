use std::ops::{Deref, DerefMut};
use std::time::Duration;

use scout_core::{absolute_job_url, JobListing};
use scout_logging::{scout_debug, scout_error, scout_info, scout_trace, scout_warn};

use crate::browser::{BrowserLauncher, BrowserSession, ElementHandle, LaunchSettings};
use crate::selectors::ListingSelectors;
use crate::types::{BrowserError, CardError, ExtractError, Extraction, SkippedCard};

#[derive(Debug, Clone)]
pub struct ExtractSettings {
    pub launch: LaunchSettings,
    pub navigation_timeout: Duration,
    pub card_wait_timeout: Duration,
    pub selectors: ListingSelectors,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            launch: LaunchSettings::default(),
            navigation_timeout: Duration::from_secs(60),
            card_wait_timeout: Duration::from_secs(30),
            selectors: ListingSelectors::default(),
        }
    }
}

/// Loads a results page and reads every job card on it.
pub struct ListingExtractor {
    launcher: Box<dyn BrowserLauncher>,
    settings: ExtractSettings,
}

impl ListingExtractor {
    pub fn new(launcher: Box<dyn BrowserLauncher>, settings: ExtractSettings) -> Self {
        Self { launcher, settings }
    }

    /// Runs one extraction pass against `url`.
    ///
    /// Launch, navigation and card-wait failures abort the pass. A card that
    /// cannot be read is logged, recorded in [`Extraction::skipped`] and left
    /// out of the listings. The browser is closed before this returns,
    /// whichever way it returns.
    pub fn extract(&self, url: &str) -> Result<Extraction, ExtractError> {
        let session = self
            .launcher
            .launch(&self.settings.launch)
            .map_err(ExtractError::Launch)?;
        let mut session = SessionGuard(session);

        scout_info!("Navigating to {}", url);
        session
            .navigate(url, self.settings.navigation_timeout)
            .map_err(|err| match err {
                BrowserError::Timeout { target, waited } => {
                    ExtractError::NavigationTimeout { target, waited }
                }
                other => ExtractError::Navigation {
                    url: url.to_string(),
                    source: other,
                },
            })?;

        let selectors = &self.settings.selectors;
        session
            .wait_for_selector(&selectors.card, self.settings.card_wait_timeout)
            .map_err(|err| match err {
                BrowserError::Timeout { target, waited } => {
                    ExtractError::NavigationTimeout { target, waited }
                }
                other => ExtractError::CardQuery(other),
            })?;

        let cards = session
            .query_all(&selectors.card)
            .map_err(ExtractError::CardQuery)?;
        scout_debug!("Found {} job cards", cards.len());

        let mut extraction = Extraction::default();
        for (index, card) in cards.iter().enumerate() {
            match read_card(card.as_ref(), selectors) {
                Ok(listing) => {
                    scout_trace!("Card {}: {}", index, listing.url);
                    extraction.listings.push(listing);
                }
                Err(error) => {
                    scout_warn!("Skipping job card {}: {}", index, error);
                    extraction.skipped.push(SkippedCard { index, error });
                }
            }
        }

        scout_info!(
            "Extracted {} listings, skipped {}",
            extraction.listings.len(),
            extraction.skipped.len()
        );
        Ok(extraction)
    }
}

/// Reads one card. Only the title element and its link are required.
fn read_card(card: &dyn ElementHandle, selectors: &ListingSelectors) -> Result<JobListing, CardError> {
    let title_el = card.query(&selectors.title)?.ok_or(CardError::MissingTitle)?;
    let title = title_el.text()?.trim().to_string();
    let url = title_el
        .attribute("href")?
        .and_then(|href| absolute_job_url(&href))
        .ok_or(CardError::MissingLink)?;

    Ok(JobListing {
        title,
        url,
        description: optional_text(card, &selectors.description)?,
        rate: optional_text(card, &selectors.rate)?,
        experience: optional_text(card, &selectors.experience)?,
        duration: optional_text(card, &selectors.duration)?,
        tags: card
            .query_all(&selectors.tags)?
            .iter()
            .map(|tag| tag.text().map(|text| text.trim().to_string()))
            .collect::<Result<_, _>>()?,
    })
}

fn optional_text(card: &dyn ElementHandle, selector: &str) -> Result<String, BrowserError> {
    match card.query(selector)? {
        Some(element) => Ok(element.text()?.trim().to_string()),
        None => Ok(String::new()),
    }
}

/// Closes the wrapped session when dropped.
struct SessionGuard(Box<dyn BrowserSession>);

impl Deref for SessionGuard {
    type Target = dyn BrowserSession;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl DerefMut for SessionGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if let Err(err) = self.0.close() {
            scout_error!("Failed to close browser: {}", err);
        }
    }
}
