use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use pretty_assertions::assert_eq;
use scout_core::JobListing;
use scout_engine::{
    BrowserError, BrowserLauncher, BrowserSession, CardError, ElementHandle, ExtractError,
    ExtractSettings, LaunchSettings, ListingExtractor, SkippedCard, StaticPageLauncher,
};

const SEARCH_URL: &str =
    "https://www.upwork.com/nx/jobs/search/?q=python&job_type=hourly&experience_level=intermediate";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(scout_logging::initialize_for_tests);
}

/// Wraps the static backend and counts launches and closes.
#[derive(Default)]
struct RecordingLauncher {
    inner: StaticPageLauncher,
    launched: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

impl RecordingLauncher {
    fn new(inner: StaticPageLauncher) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }
}

impl BrowserLauncher for RecordingLauncher {
    fn launch(&self, settings: &LaunchSettings) -> Result<Box<dyn BrowserSession>, BrowserError> {
        self.launched.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(RecordingSession {
            inner: self.inner.launch(settings)?,
            closed: self.closed.clone(),
        }))
    }
}

struct RecordingSession {
    inner: Box<dyn BrowserSession>,
    closed: Arc<AtomicUsize>,
}

impl BrowserSession for RecordingSession {
    fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), BrowserError> {
        self.inner.navigate(url, timeout)
    }

    fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), BrowserError> {
        self.inner.wait_for_selector(selector, timeout)
    }

    fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn ElementHandle + '_>>, BrowserError> {
        self.inner.query_all(selector)
    }

    fn close(&mut self) -> Result<(), BrowserError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        self.inner.close()
    }
}

/// Launcher that never gets a browser up.
struct FailingLauncher;

impl BrowserLauncher for FailingLauncher {
    fn launch(&self, _settings: &LaunchSettings) -> Result<Box<dyn BrowserSession>, BrowserError> {
        Err(BrowserError::Launch("chrome not found".to_string()))
    }
}

fn extractor_for(launcher: RecordingLauncher) -> (ListingExtractor, Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let launched = launcher.launched.clone();
    let closed = launcher.closed.clone();
    let extractor = ListingExtractor::new(Box::new(launcher), ExtractSettings::default());
    (extractor, launched, closed)
}

#[test]
fn two_card_page_fills_missing_fields_with_empty_values() {
    init_logging();
    let pages = StaticPageLauncher::new().with_page(SEARCH_URL, include_str!("fixtures/two_cards.html"));
    let (extractor, launched, closed) = extractor_for(RecordingLauncher::new(pages));

    let extraction = extractor.extract(SEARCH_URL).expect("extraction succeeds");

    assert_eq!(
        extraction.listings,
        vec![
            JobListing {
                title: "Python scraper needed".to_string(),
                url: "https://www.upwork.com/jobs/Python-scraper-needed_~0101/?referrer_url_path=/nx/search/jobs/"
                    .to_string(),
                description: "We need a developer to build a resilient scraper for public listings."
                    .to_string(),
                rate: "Hourly: $30.00 - $50.00".to_string(),
                experience: "Intermediate".to_string(),
                duration: "Est. time: 1 to 3 months, Less than 30 hrs/week".to_string(),
                tags: vec![
                    "Python".to_string(),
                    "Web Scraping".to_string(),
                    "Playwright".to_string(),
                ],
            },
            JobListing {
                title: "Data cleanup in pandas".to_string(),
                url: "https://www.upwork.com/jobs/Data-cleanup_~0102/".to_string(),
                description: String::new(),
                rate: "Fixed price".to_string(),
                experience: "Entry level".to_string(),
                duration: String::new(),
                tags: Vec::new(),
            },
        ]
    );
    assert!(extraction.skipped.is_empty());
    assert_eq!(launched.load(Ordering::SeqCst), 1);
    assert_eq!(closed.load(Ordering::SeqCst), 1);
}

#[test]
fn broken_cards_are_skipped_and_order_is_kept() {
    init_logging();
    let pages = StaticPageLauncher::new().with_page(SEARCH_URL, include_str!("fixtures/broken_card.html"));
    let (extractor, _, closed) = extractor_for(RecordingLauncher::new(pages));

    let extraction = extractor.extract(SEARCH_URL).expect("extraction succeeds");

    let titles: Vec<&str> = extraction
        .listings
        .iter()
        .map(|listing| listing.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Rust CLI tool", "Embedded firmware"]);
    assert_eq!(
        extraction.skipped,
        vec![
            SkippedCard {
                index: 1,
                error: CardError::MissingTitle,
            },
            SkippedCard {
                index: 2,
                error: CardError::MissingLink,
            },
        ]
    );

    let embedded = &extraction.listings[1];
    assert_eq!(
        embedded.url,
        "https://www.upwork.com/freelance-jobs/apply/Embedded_~0204/"
    );
    assert_eq!(embedded.duration, "More than 6 months");
    assert_eq!(embedded.tags, vec!["C".to_string(), "Embedded Systems".to_string()]);
    assert_eq!(closed.load(Ordering::SeqCst), 1);
}

#[test]
fn one_card_without_title_yields_n_minus_one_listings() {
    init_logging();
    let card = |n: u32| {
        format!(
            r#"<article data-test="JobTile"><a data-test="job-tile-title-link" href="/jobs/~{n}">Job {n}</a></article>"#
        )
    };
    let html = format!(
        "<html><body>{}{}<article data-test=\"JobTile\"><h2>No link here</h2></article>{}{}</body></html>",
        card(1),
        card(2),
        card(4),
        card(5)
    );
    let pages = StaticPageLauncher::new().with_fallback(html);
    let (extractor, _, _) = extractor_for(RecordingLauncher::new(pages));

    let extraction = extractor.extract(SEARCH_URL).expect("extraction succeeds");

    let urls: Vec<&str> = extraction
        .listings
        .iter()
        .map(|listing| listing.url.as_str())
        .collect();
    assert_eq!(
        urls,
        vec![
            "https://www.upwork.com/jobs/~1",
            "https://www.upwork.com/jobs/~2",
            "https://www.upwork.com/jobs/~4",
            "https://www.upwork.com/jobs/~5",
        ]
    );
    assert_eq!(extraction.skipped.len(), 1);
    assert_eq!(extraction.skipped[0].index, 2);
}

#[test]
fn missing_card_container_times_out_and_still_closes_browser() {
    init_logging();
    let pages = StaticPageLauncher::new().with_page(SEARCH_URL, include_str!("fixtures/no_results.html"));
    let (extractor, launched, closed) = extractor_for(RecordingLauncher::new(pages));

    let err = extractor.extract(SEARCH_URL).unwrap_err();

    match err {
        ExtractError::NavigationTimeout { target, waited } => {
            assert!(target.contains("article[data-test='JobTile']"), "target {target}");
            assert_eq!(waited, Duration::from_secs(30));
        }
        other => panic!("expected timeout, got {other:?}"),
    }
    assert_eq!(launched.load(Ordering::SeqCst), 1);
    assert_eq!(closed.load(Ordering::SeqCst), 1);
}

#[test]
fn card_links_resolve_against_the_site_and_unusable_links_skip_the_card() {
    init_logging();
    let card = |href: &str, title: &str| {
        format!(
            r#"<article data-test="JobTile"><a data-test="job-tile-title-link" href="{href}">{title}</a></article>"#
        )
    };
    let html = format!(
        "<html><body>{}{}{}</body></html>",
        card("//www.upwork.com/jobs/~01", "Protocol relative"),
        card("javascript:void(0)", "Script link"),
        card("HTTPS://www.upwork.com/jobs/~02", "Shouting scheme"),
    );
    let pages = StaticPageLauncher::new().with_fallback(html);
    let (extractor, _, _) = extractor_for(RecordingLauncher::new(pages));

    let extraction = extractor.extract(SEARCH_URL).expect("extraction succeeds");

    let urls: Vec<&str> = extraction
        .listings
        .iter()
        .map(|listing| listing.url.as_str())
        .collect();
    assert_eq!(
        urls,
        vec![
            "https://www.upwork.com/jobs/~01",
            "https://www.upwork.com/jobs/~02",
        ]
    );
    assert_eq!(
        extraction.skipped,
        vec![SkippedCard {
            index: 1,
            error: CardError::MissingLink,
        }]
    );
}

#[test]
fn navigation_failure_is_fatal_and_closes_browser() {
    init_logging();
    let (extractor, _, closed) = extractor_for(RecordingLauncher::new(StaticPageLauncher::new()));

    let err = extractor.extract("https://www.upwork.com/nx/jobs/search/?q=").unwrap_err();

    assert!(matches!(err, ExtractError::Navigation { .. }), "got {err:?}");
    assert_eq!(closed.load(Ordering::SeqCst), 1);
}

#[test]
fn launch_failure_is_reported() {
    init_logging();
    let extractor = ListingExtractor::new(Box::new(FailingLauncher), ExtractSettings::default());

    let err = extractor.extract(SEARCH_URL).unwrap_err();

    assert!(matches!(err, ExtractError::Launch(BrowserError::Launch(_))), "got {err:?}");
    assert!(err.to_string().contains("chrome not found"));
}

#[test]
fn default_settings_use_visible_browser_and_fixed_timeouts() {
    let settings = ExtractSettings::default();
    assert!(!settings.launch.headless);
    assert_eq!(settings.navigation_timeout, Duration::from_secs(60));
    assert_eq!(settings.card_wait_timeout, Duration::from_secs(30));
    assert!(settings.launch.idle_timeout > settings.navigation_timeout + settings.card_wait_timeout);
}
