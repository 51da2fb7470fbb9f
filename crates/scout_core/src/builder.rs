use scout_logging::scout_debug;

use crate::filters::{ClientHistory, FilterKey, FilterSet, Workload};

/// Job search results page that every built URL points at.
pub const SEARCH_BASE_URL: &str = "https://www.upwork.com/nx/jobs/search/";

/// Accumulates search filters and renders them as a results-page URL.
///
/// Setters never fail: a later call overwrites an earlier one, and
/// unrecognised enumerated tokens leave the filter untouched.
#[derive(Debug, Clone, Default)]
pub struct SearchQueryBuilder {
    filters: FilterSet,
}

impl SearchQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> &mut Self {
        self.filters.set(FilterKey::Query, query);
        self
    }

    pub fn set_job_type(&mut self, job_type: impl Into<String>) -> &mut Self {
        self.filters.set(FilterKey::JobType, job_type);
        self
    }

    pub fn set_experience_level(&mut self, level: impl Into<String>) -> &mut Self {
        self.filters.set(FilterKey::ExperienceLevel, level);
        self
    }

    pub fn set_project_length(&mut self, length: impl Into<String>) -> &mut Self {
        self.filters.set(FilterKey::Duration, length);
        self
    }

    pub fn set_budget_range(&mut self, min: Option<u32>, max: Option<u32>) -> &mut Self {
        if let Some(min) = min {
            self.filters.set(FilterKey::BudgetMin, min.to_string());
        }
        if let Some(max) = max {
            self.filters.set(FilterKey::BudgetMax, max.to_string());
        }
        self
    }

    pub fn set_hourly_rate(&mut self, min: Option<u32>, max: Option<u32>) -> &mut Self {
        if let Some(min) = min {
            self.filters.set(FilterKey::HourlyRateMin, min.to_string());
        }
        if let Some(max) = max {
            self.filters.set(FilterKey::HourlyRateMax, max.to_string());
        }
        self
    }

    /// Accepts `<30` or `>30`; anything else is ignored.
    pub fn set_hours_per_week(&mut self, hours: &str) -> &mut Self {
        match Workload::from_token(hours) {
            Some(workload) => self.filters.set(FilterKey::Workload, workload.code()),
            None => scout_debug!("Ignoring unknown hours-per-week token {:?}", hours),
        }
        self
    }

    /// Accepts `no_hires`, `one_to_nine` or `ten_plus`; anything else is ignored.
    pub fn set_client_history(&mut self, history: &str) -> &mut Self {
        match ClientHistory::from_token(history) {
            Some(history) => self.filters.set(FilterKey::ClientHires, history.code()),
            None => scout_debug!("Ignoring unknown client-history token {:?}", history),
        }
        self
    }

    pub fn set_contract_to_hire(&mut self, value: bool) -> &mut Self {
        self.filters
            .set(FilterKey::ContractToHire, if value { "true" } else { "false" });
        self
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn build(&self) -> String {
        format!("{SEARCH_BASE_URL}?{}", self.filters.to_query_string())
    }
}
