use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use std::path::Path;

/// Extract plain text from a PDF, one string per page
pub fn extract_page_texts<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read PDF: {}", path.display()))?;

    pdf_extract::extract_text_from_mem_by_pages(&bytes)
        .with_context(|| format!("Failed to extract text from PDF: {}", path.display()))
}

/// Compile `pattern` so that it only matches at the start of the haystack
pub fn anchored_regex(pattern: &str, case_insensitive: bool) -> Result<Regex> {
    // Compile the bare pattern first so a syntax error points at what the user typed
    RegexBuilder::new(pattern)
        .build()
        .with_context(|| format!("Invalid pattern: {}", pattern))?;

    RegexBuilder::new(&format!("^(?:{})", pattern))
        .case_insensitive(case_insensitive)
        .build()
        .with_context(|| format!("Invalid pattern: {}", pattern))
}

/// Match every line of every page against an anchored pattern
pub fn search_pages<S: AsRef<str>>(pages: &[S], pattern: &Regex) -> Vec<LineMatch> {
    let mut matches = Vec::new();

    for (page_idx, page_text) in pages.iter().enumerate() {
        for (line_idx, line) in page_text.as_ref().split('\n').enumerate() {
            if let Some(m) = pattern.find(line) {
                matches.push(LineMatch {
                    page: (page_idx + 1) as u32,
                    line_number: (line_idx + 1) as u32,
                    text: line.to_string(),
                    match_start: m.start(),
                    match_end: m.end(),
                });
            }
        }
    }

    matches
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    pub page: u32,
    pub line_number: u32,
    pub text: String,
    pub match_start: usize,
    pub match_end: usize,
}
