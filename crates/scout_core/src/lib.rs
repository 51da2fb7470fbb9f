//! Scout core: pure search-URL building, listing records and view helpers.
mod builder;
mod filters;
mod form;
mod listing;
mod view_model;

pub use builder::{SearchQueryBuilder, SEARCH_BASE_URL};
pub use filters::{ClientHistory, FilterKey, FilterSet, Workload};
pub use form::{RateBound, SearchForm};
pub use listing::{absolute_job_url, JobListing, SITE_ORIGIN};
pub use view_model::{render_listing, truncate_chars, DESCRIPTION_PREVIEW_CHARS, SEPARATOR};
