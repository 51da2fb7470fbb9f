/// CSS selectors that locate a job card and its fields.
///
/// Field selectors are evaluated relative to the card element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSelectors {
    pub card: String,
    pub title: String,
    pub description: String,
    pub rate: String,
    pub experience: String,
    pub duration: String,
    pub tags: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            card: "article[data-test='JobTile']".to_string(),
            title: "a[data-test*='job-tile-title-link']".to_string(),
            description: "div[data-test='UpCLineClamp JobDescription']".to_string(),
            rate: "li[data-test='job-type-label']".to_string(),
            experience: "li[data-test='experience-level']".to_string(),
            duration: "li[data-test='duration-label']".to_string(),
            tags: "div[data-test='TokenClamp JobAttrs'] span".to_string(),
        }
    }
}
