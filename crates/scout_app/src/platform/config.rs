use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use scout_engine::{ExtractSettings, LaunchSettings, ListingSelectors};
use scout_logging::LevelFilter;
use thiserror::Error;

use super::logging::LogDestination;

pub(crate) const CONFIG_ENV: &str = "UPWORK_SCOUT_CONFIG";
const DEFAULT_CONFIG_FILENAME: &str = "scout.ron";

/// Extra idle time granted to the browser beyond the two operation timeouts.
const IDLE_MARGIN: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ScoutConfig {
    pub headless: bool,
    pub navigation_timeout_secs: u64,
    pub card_wait_timeout_secs: u64,
    pub browser_args: Vec<String>,
    pub log_destination: LogDestination,
    pub log_level: String,
    /// Saved results page to extract from instead of launching a browser.
    pub replay_html: Option<PathBuf>,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        let extract = ExtractSettings::default();
        Self {
            headless: extract.launch.headless,
            navigation_timeout_secs: extract.navigation_timeout.as_secs(),
            card_wait_timeout_secs: extract.card_wait_timeout.as_secs(),
            browser_args: extract.launch.args,
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
            replay_html: None,
        }
    }
}

impl ScoutConfig {
    /// `log_level` as a filter; names `log` does not know mean `Info`.
    pub fn level(&self) -> LevelFilter {
        scout_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn extract_settings(&self) -> ExtractSettings {
        let navigation_timeout = Duration::from_secs(self.navigation_timeout_secs);
        let card_wait_timeout = Duration::from_secs(self.card_wait_timeout_secs);
        ExtractSettings {
            launch: LaunchSettings {
                headless: self.headless,
                args: self.browser_args.clone(),
                idle_timeout: navigation_timeout + card_wait_timeout + IDLE_MARGIN,
            },
            navigation_timeout,
            card_wait_timeout,
            selectors: ListingSelectors::default(),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Config path from the environment, or `./scout.ron`.
pub(crate) fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME))
}

/// Loads the config at `path`; a missing file yields the defaults.
pub(crate) fn load_config(path: &Path) -> Result<ScoutConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(ScoutConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
