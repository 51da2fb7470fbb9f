use crate::listing::JobListing;

/// Maximum number of description characters shown per listing.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 150;

/// Line printed after each listing block.
pub const SEPARATOR: &str =
    "--------------------------------------------------------------------------------";

/// Shortens `text` to at most `max_chars` characters, marking the cut with `...`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Renders the console block for one listing, separator included.
pub fn render_listing(listing: &JobListing) -> String {
    let summary = truncate_chars(&listing.description, DESCRIPTION_PREVIEW_CHARS);
    format!(
        "Title:      {}\n\
         Link:       {}\n\
         Terms:      {} | {} | {}\n\
         Summary:    {}\n\
         Tags:       {}\n\
         {}",
        listing.title,
        listing.url,
        listing.rate,
        listing.experience,
        listing.duration,
        summary,
        listing.tags.join(", "),
        SEPARATOR,
    )
}
