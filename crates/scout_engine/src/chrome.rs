use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::browser::tab::NoElementFound;
use headless_chrome::util::Timeout;
use headless_chrome::{Browser, Element, LaunchOptions, Tab};
use scout_logging::{scout_debug, scout_info};

use crate::browser::{BrowserLauncher, BrowserSession, ElementHandle, LaunchSettings};
use crate::types::BrowserError;

/// Drives a local Chrome/Chromium over the DevTools protocol.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeLauncher;

impl BrowserLauncher for ChromeLauncher {
    fn launch(&self, settings: &LaunchSettings) -> Result<Box<dyn BrowserSession>, BrowserError> {
        let args: Vec<&OsStr> = settings.args.iter().map(OsStr::new).collect();
        let options = LaunchOptions::default_builder()
            .headless(settings.headless)
            .args(args)
            .idle_browser_timeout(settings.idle_timeout)
            .build()
            .map_err(|err| BrowserError::Launch(err.to_string()))?;

        scout_info!(
            "Launching browser headless={} args={:?}",
            settings.headless,
            settings.args
        );
        let browser = Browser::new(options).map_err(|err| BrowserError::Launch(err.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|err| BrowserError::Launch(err.to_string()))?;

        Ok(Box::new(ChromeSession {
            browser: Some(browser),
            tab,
        }))
    }
}

struct ChromeSession {
    /// Dropping the browser kills the process; `None` once closed.
    browser: Option<Browser>,
    tab: Arc<Tab>,
}

impl BrowserSession for ChromeSession {
    fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), BrowserError> {
        self.tab.set_default_timeout(timeout);
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|err| {
                if err.downcast_ref::<Timeout>().is_some() {
                    BrowserError::Timeout {
                        target: url.to_string(),
                        waited: timeout,
                    }
                } else {
                    BrowserError::Navigation {
                        url: url.to_string(),
                        message: err.to_string(),
                    }
                }
            })?;
        Ok(())
    }

    fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), BrowserError> {
        match self.tab.wait_for_element_with_custom_timeout(selector, timeout) {
            Ok(_) => Ok(()),
            Err(err) if err.downcast_ref::<Timeout>().is_some() => Err(BrowserError::Timeout {
                target: format!("`{selector}`"),
                waited: timeout,
            }),
            Err(err) => Err(protocol(err)),
        }
    }

    fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn ElementHandle + '_>>, BrowserError> {
        let elements = none_found_as_empty(self.tab.find_elements(selector))?;
        Ok(wrap_all(elements))
    }

    fn close(&mut self) -> Result<(), BrowserError> {
        let Some(browser) = self.browser.take() else {
            return Ok(());
        };
        let closed = self.tab.close(false).map(|_| ()).map_err(protocol);
        drop(browser);
        scout_debug!("Browser closed");
        closed
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

struct ChromeElement<'a>(Element<'a>);

impl ElementHandle for ChromeElement<'_> {
    fn query(&self, selector: &str) -> Result<Option<Box<dyn ElementHandle + '_>>, BrowserError> {
        match self.0.find_element(selector) {
            Ok(element) => Ok(Some(Box::new(ChromeElement(element)))),
            Err(err) if err.downcast_ref::<NoElementFound>().is_some() => Ok(None),
            Err(err) => Err(protocol(err)),
        }
    }

    fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn ElementHandle + '_>>, BrowserError> {
        let elements = none_found_as_empty(self.0.find_elements(selector))?;
        Ok(wrap_all(elements))
    }

    fn text(&self) -> Result<String, BrowserError> {
        self.0.get_inner_text().map_err(protocol)
    }

    fn attribute(&self, name: &str) -> Result<Option<String>, BrowserError> {
        self.0.get_attribute_value(name).map_err(protocol)
    }
}

fn wrap_all<'a>(elements: Vec<Element<'a>>) -> Vec<Box<dyn ElementHandle + 'a>> {
    elements
        .into_iter()
        .map(|element| Box::new(ChromeElement(element)) as Box<dyn ElementHandle + 'a>)
        .collect()
}

fn none_found_as_empty<T>(result: anyhow::Result<Vec<T>>) -> Result<Vec<T>, BrowserError> {
    match result {
        Ok(items) => Ok(items),
        Err(err) if err.downcast_ref::<NoElementFound>().is_some() => Ok(Vec::new()),
        Err(err) => Err(protocol(err)),
    }
}

fn protocol(err: anyhow::Error) -> BrowserError {
    BrowserError::Protocol(err.to_string())
}
