use std::io::{self, BufRead, Write};

use scout_core::SearchForm;

/// Prints `label`, reads one line and returns it trimmed.
///
/// End of input reads as an empty answer.
pub(crate) fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> io::Result<String> {
    write!(output, "{label}: ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Asks every search question in order.
pub(crate) fn collect_form<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<SearchForm> {
    writeln!(output, "Upwork job search filters (leave blank to skip)")?;
    Ok(SearchForm {
        query: ask(input, output, "Search term (e.g. python, react)")?,
        job_type: ask(input, output, "Job type (hourly / fixed-price)")?,
        experience_level: ask(input, output, "Experience level (entry_level / intermediate / expert)")?,
        duration: ask(input, output, "Project duration (week / month / ongoing)")?,
        hours_per_week: ask(input, output, "Hours per week (<30 / >30)")?,
        min_rate: ask(input, output, "Minimum hourly rate")?,
        max_rate: ask(input, output, "Maximum hourly rate")?,
        client_history: ask(input, output, "Client hire history (no_hires / one_to_nine / ten_plus)")?,
        contract_to_hire: ask(input, output, "Contract-to-hire only? (yes / blank)")?,
    })
}
