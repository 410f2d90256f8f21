use crate::pdf::text::{anchored_regex, extract_page_texts, search_pages, LineMatch};
use crate::style::Highlighter;
use anyhow::Result;
use std::io::Write;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Default, Clone)]
pub struct SearchOptions {
    pub pattern: String,
    pub case_insensitive: bool,
}

/// Print every line that starts with a match as `page:line: text`
pub fn run<P: AsRef<Path>, W: Write>(
    path: P,
    options: &SearchOptions,
    highlighter: &Highlighter,
    out: &mut W,
) -> Result<()> {
    let regex = anchored_regex(&options.pattern, options.case_insensitive)?;
    let pages = extract_page_texts(&path)?;

    let matches = search_pages(&pages, &regex);
    debug!(
        "{} matching line(s) in {} page(s)",
        matches.len(),
        pages.len()
    );

    write_matches(&matches, highlighter, out)
}

pub fn write_matches<W: Write>(
    matches: &[LineMatch],
    highlighter: &Highlighter,
    out: &mut W,
) -> Result<()> {
    for m in matches {
        writeln!(
            out,
            "{}:{}: {}",
            m.page,
            m.line_number,
            highlighter.highlight(&m.text, m.match_start, m.match_end)
        )?;
    }
    Ok(())
}
