use std::fs;
use std::io::{self, Write};

use anyhow::Context;
use scout_core::{render_listing, SearchForm};
use scout_engine::{
    BrowserLauncher, ChromeLauncher, Extraction, ListingExtractor, StaticPageLauncher,
};
use scout_logging::{scout_info, scout_warn};

use super::config::{self, ScoutConfig};
use super::logging;
use super::prompt;

/// Prompts for filters, scrapes the results page and prints every listing.
///
/// A fatal error is returned, not logged; `main` reports it once on stderr.
pub fn run_app() -> anyhow::Result<()> {
    let path = config::config_path();
    let (config, config_problem) = match config::load_config(&path) {
        Ok(config) => (config, None),
        Err(err) => (ScoutConfig::default(), Some(err)),
    };
    logging::initialize(config.log_destination, config.level());
    if let Some(err) = config_problem {
        scout_warn!("{}; using defaults", err);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    let form = prompt::collect_form(&mut input, &mut output)?;
    search(&config, &form, &mut output)
}

fn search<W: Write>(config: &ScoutConfig, form: &SearchForm, output: &mut W) -> anyhow::Result<()> {
    for raw in form.invalid_rates() {
        writeln!(output, "Ignoring hourly rate {raw:?}: not a whole number")?;
    }

    let url = form.to_builder().build();
    writeln!(output, "Search URL: {url}")?;

    let launcher = launcher_for(config, &url)?;
    let extractor = ListingExtractor::new(launcher, config.extract_settings());
    let extraction = extractor
        .extract(&url)
        .with_context(|| format!("scraping {url} failed"))?;

    print_report(output, &extraction)?;
    Ok(())
}

fn launcher_for(config: &ScoutConfig, url: &str) -> anyhow::Result<Box<dyn BrowserLauncher>> {
    match &config.replay_html {
        Some(path) => {
            let html = fs::read_to_string(path)
                .with_context(|| format!("could not read saved page {}", path.display()))?;
            scout_info!("Replaying saved page {:?}", path);
            Ok(Box::new(StaticPageLauncher::new().with_page(url, html)))
        }
        None => Ok(Box::new(ChromeLauncher)),
    }
}

fn print_report<W: Write>(output: &mut W, extraction: &Extraction) -> io::Result<()> {
    writeln!(output)?;
    writeln!(output, "Job listings:")?;
    for listing in &extraction.listings {
        writeln!(output, "{}", render_listing(listing))?;
    }
    for skipped in &extraction.skipped {
        writeln!(output, "Skipped card #{}: {}", skipped.index + 1, skipped.error)?;
    }
    writeln!(
        output,
        "{} listings, {} skipped",
        extraction.listings.len(),
        extraction.skipped.len()
    )
}
