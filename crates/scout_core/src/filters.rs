use std::collections::BTreeMap;

/// Search filters understood by the results page, in query-string order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterKey {
    Query,
    JobType,
    ExperienceLevel,
    Duration,
    Workload,
    HourlyRateMin,
    HourlyRateMax,
    BudgetMin,
    BudgetMax,
    ClientHires,
    ContractToHire,
}

impl FilterKey {
    pub const ALL: [FilterKey; 11] = [
        FilterKey::Query,
        FilterKey::JobType,
        FilterKey::ExperienceLevel,
        FilterKey::Duration,
        FilterKey::Workload,
        FilterKey::HourlyRateMin,
        FilterKey::HourlyRateMax,
        FilterKey::BudgetMin,
        FilterKey::BudgetMax,
        FilterKey::ClientHires,
        FilterKey::ContractToHire,
    ];

    /// URL parameter name for this filter.
    pub fn param(self) -> &'static str {
        match self {
            FilterKey::Query => "q",
            FilterKey::JobType => "job_type",
            FilterKey::ExperienceLevel => "experience_level",
            FilterKey::Duration => "duration",
            FilterKey::Workload => "workload",
            FilterKey::HourlyRateMin => "hourly_rate_min",
            FilterKey::HourlyRateMax => "hourly_rate_max",
            FilterKey::BudgetMin => "budget_min",
            FilterKey::BudgetMax => "budget_max",
            FilterKey::ClientHires => "client_hires",
            FilterKey::ContractToHire => "contract_to_hire",
        }
    }

    pub fn from_param(param: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.param() == param)
    }
}

/// Weekly workload bucket, entered as `<30` or `>30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workload {
    AsNeeded,
    FullTime,
}

impl Workload {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "<30" => Some(Workload::AsNeeded),
            ">30" => Some(Workload::FullTime),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Workload::AsNeeded => "as_needed",
            Workload::FullTime => "full_time",
        }
    }
}

/// How many freelancers the client has hired before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientHistory {
    NoHires,
    OneToNine,
    TenPlus,
}

impl ClientHistory {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "no_hires" => Some(ClientHistory::NoHires),
            "one_to_nine" => Some(ClientHistory::OneToNine),
            "ten_plus" => Some(ClientHistory::TenPlus),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            ClientHistory::NoHires => "0",
            ClientHistory::OneToNine => "1-9",
            ClientHistory::TenPlus => "10plus",
        }
    }
}

/// Filter values keyed by [`FilterKey`]. Values are stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSet {
    values: BTreeMap<FilterKey, String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: FilterKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(parameter, value)` pairs in key order.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.values
            .iter()
            .map(|(key, value)| (key.param(), value.as_str()))
    }

    /// Serializes as `application/x-www-form-urlencoded`.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }

    /// Parses a query string back into a filter set.
    ///
    /// Parameters that are not known filters are ignored.
    pub fn from_query_string(query: &str) -> Self {
        let mut set = Self::new();
        for (param, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if let Some(key) = FilterKey::from_param(&param) {
                set.set(key, value.into_owned());
            }
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_round_trips_through_its_param_name() {
        for key in FilterKey::ALL {
            assert_eq!(FilterKey::from_param(key.param()), Some(key));
        }
        assert_eq!(FilterKey::from_param("page"), None);
    }

    #[test]
    fn query_string_escapes_reserved_characters() {
        let mut set = FilterSet::new();
        set.set(FilterKey::Query, "c++ & rust");
        assert_eq!(set.to_query_string(), "q=c%2B%2B+%26+rust");
    }
}
