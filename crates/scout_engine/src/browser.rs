use std::time::Duration;

use crate::types::BrowserError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSettings {
    pub headless: bool,
    /// Extra command-line switches passed to the browser process.
    pub args: Vec<String>,
    /// How long the browser may sit without DevTools traffic before it is reaped.
    pub idle_timeout: Duration,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            headless: false,
            args: vec!["--disable-blink-features=AutomationControlled".to_string()],
            idle_timeout: Duration::from_secs(120),
        }
    }
}

/// Starts a browser and hands back a single page to drive.
pub trait BrowserLauncher {
    fn launch(&self, settings: &LaunchSettings) -> Result<Box<dyn BrowserSession>, BrowserError>;
}

/// One open page of a launched browser.
///
/// `close` must release the browser process and be safe to call twice.
pub trait BrowserSession {
    fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), BrowserError>;

    fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), BrowserError>;

    /// All matches in document order.
    fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn ElementHandle + '_>>, BrowserError>;

    fn close(&mut self) -> Result<(), BrowserError>;
}

/// An element on the current page.
pub trait ElementHandle {
    /// First descendant matching `selector`, if any.
    fn query(&self, selector: &str) -> Result<Option<Box<dyn ElementHandle + '_>>, BrowserError>;

    fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn ElementHandle + '_>>, BrowserError>;

    /// Rendered text content, untrimmed.
    fn text(&self) -> Result<String, BrowserError>;

    fn attribute(&self, name: &str) -> Result<Option<String>, BrowserError>;
}
