use scout_logging::scout_debug;

use crate::builder::SearchQueryBuilder;

/// Raw answers collected from the interactive prompts.
///
/// Every field holds the text as typed; trimming and the skip-if-empty rule
/// are applied by [`SearchForm::to_builder`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchForm {
    pub query: String,
    pub job_type: String,
    pub experience_level: String,
    pub duration: String,
    pub hours_per_week: String,
    pub min_rate: String,
    pub max_rate: String,
    pub client_history: String,
    pub contract_to_hire: String,
}

/// Outcome of reading one hourly-rate answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateBound {
    Unset,
    Value(u32),
    Invalid(String),
}

impl RateBound {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return RateBound::Unset;
        }
        match trimmed.parse::<u32>() {
            Ok(value) => RateBound::Value(value),
            Err(_) => RateBound::Invalid(trimmed.to_string()),
        }
    }

    pub fn value(&self) -> Option<u32> {
        match self {
            RateBound::Value(value) => Some(*value),
            RateBound::Unset | RateBound::Invalid(_) => None,
        }
    }
}

impl SearchForm {
    pub fn wants_contract_to_hire(&self) -> bool {
        matches!(
            self.contract_to_hire.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        )
    }

    /// Rate answers that were present but not a whole number.
    pub fn invalid_rates(&self) -> Vec<String> {
        [RateBound::parse(&self.min_rate), RateBound::parse(&self.max_rate)]
            .into_iter()
            .filter_map(|bound| match bound {
                RateBound::Invalid(raw) => Some(raw),
                _ => None,
            })
            .collect()
    }

    pub fn to_builder(&self) -> SearchQueryBuilder {
        let mut builder = SearchQueryBuilder::new();
        builder.set_query(self.query.trim());

        if let Some(job_type) = non_empty(&self.job_type) {
            builder.set_job_type(job_type);
        }
        if let Some(level) = non_empty(&self.experience_level) {
            builder.set_experience_level(level);
        }
        if let Some(duration) = non_empty(&self.duration) {
            builder.set_project_length(duration);
        }
        if let Some(hours) = non_empty(&self.hours_per_week) {
            builder.set_hours_per_week(hours);
        }

        let min = RateBound::parse(&self.min_rate);
        let max = RateBound::parse(&self.max_rate);
        for bound in [&min, &max] {
            if let RateBound::Invalid(raw) = bound {
                scout_debug!("Skipping hourly rate bound {:?}: not a whole number", raw);
            }
        }
        if min.value().is_some() || max.value().is_some() {
            builder.set_hourly_rate(min.value(), max.value());
        }

        if let Some(history) = non_empty(&self.client_history) {
            builder.set_client_history(history);
        }
        if self.wants_contract_to_hire() {
            builder.set_contract_to_hire(true);
        }
        builder
    }
}

fn non_empty(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
