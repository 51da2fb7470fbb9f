use std::collections::HashMap;
use std::time::Duration;

use scout_logging::scout_debug;
use scraper::{ElementRef, Html, Selector};

use crate::browser::{BrowserLauncher, BrowserSession, ElementHandle, LaunchSettings};
use crate::types::BrowserError;

/// Serves saved HTML instead of a live browser.
///
/// Pages are looked up by exact URL; a fallback page, when set, answers any
/// URL that has no page of its own. Nothing is rendered or scripted, so a
/// selector that is absent after parsing is reported as a timeout straight
/// away.
#[derive(Debug, Clone, Default)]
pub struct StaticPageLauncher {
    pages: HashMap<String, String>,
    fallback: Option<String>,
}

impl StaticPageLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// Serves `html` for every URL without a dedicated page.
    pub fn with_fallback(mut self, html: impl Into<String>) -> Self {
        self.fallback = Some(html.into());
        self
    }

    pub fn session(&self) -> StaticPageSession {
        StaticPageSession {
            pages: self.pages.clone(),
            fallback: self.fallback.clone(),
            document: None,
            closed: false,
        }
    }
}

impl BrowserLauncher for StaticPageLauncher {
    fn launch(&self, _settings: &LaunchSettings) -> Result<Box<dyn BrowserSession>, BrowserError> {
        Ok(Box::new(self.session()))
    }
}

pub struct StaticPageSession {
    pages: HashMap<String, String>,
    fallback: Option<String>,
    document: Option<Html>,
    closed: bool,
}

impl StaticPageSession {
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn document(&self) -> Result<&Html, BrowserError> {
        if self.closed {
            return Err(BrowserError::Protocol("session is closed".to_string()));
        }
        self.document
            .as_ref()
            .ok_or_else(|| BrowserError::Protocol("no page loaded".to_string()))
    }
}

impl BrowserSession for StaticPageSession {
    fn navigate(&mut self, url: &str, _timeout: Duration) -> Result<(), BrowserError> {
        if self.closed {
            return Err(BrowserError::Protocol("session is closed".to_string()));
        }
        let html = self
            .pages
            .get(url)
            .or(self.fallback.as_ref())
            .ok_or_else(|| BrowserError::Navigation {
                url: url.to_string(),
                message: "no saved page for this url".to_string(),
            })?;
        scout_debug!("Serving saved page for {} ({} bytes)", url, html.len());
        self.document = Some(Html::parse_document(html));
        Ok(())
    }

    fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), BrowserError> {
        let parsed = parse_selector(selector)?;
        if self.document()?.select(&parsed).next().is_some() {
            Ok(())
        } else {
            Err(BrowserError::Timeout {
                target: format!("`{selector}`"),
                waited: timeout,
            })
        }
    }

    fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn ElementHandle + '_>>, BrowserError> {
        let parsed = parse_selector(selector)?;
        Ok(self
            .document()?
            .select(&parsed)
            .map(|element| Box::new(StaticElement(element)) as Box<dyn ElementHandle + '_>)
            .collect())
    }

    fn close(&mut self) -> Result<(), BrowserError> {
        self.closed = true;
        self.document = None;
        Ok(())
    }
}

struct StaticElement<'a>(ElementRef<'a>);

impl ElementHandle for StaticElement<'_> {
    fn query(&self, selector: &str) -> Result<Option<Box<dyn ElementHandle + '_>>, BrowserError> {
        let parsed = parse_selector(selector)?;
        Ok(self
            .0
            .select(&parsed)
            .next()
            .map(|element| Box::new(StaticElement(element)) as Box<dyn ElementHandle + '_>))
    }

    fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn ElementHandle + '_>>, BrowserError> {
        let parsed = parse_selector(selector)?;
        Ok(self
            .0
            .select(&parsed)
            .map(|element| Box::new(StaticElement(element)) as Box<dyn ElementHandle + '_>)
            .collect())
    }

    fn text(&self) -> Result<String, BrowserError> {
        Ok(self.0.text().collect())
    }

    fn attribute(&self, name: &str) -> Result<Option<String>, BrowserError> {
        Ok(self.0.value().attr(name).map(str::to_string))
    }
}

fn parse_selector(selector: &str) -> Result<Selector, BrowserError> {
    Selector::parse(selector).map_err(|_| BrowserError::InvalidSelector(selector.to_string()))
}
