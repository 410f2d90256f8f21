use anyhow::{anyhow, Result};
use tracing::warn;

/// Per-page parameters decoded from an interleaved `page value page value ...` list
#[derive(Debug, Clone, PartialEq)]
pub struct PageParams {
    pages: Vec<u32>,
    values: Vec<f64>,
}

impl PageParams {
    /// Parse a flat list like `["1", "90", "2", "270"]`.
    ///
    /// Pages are taken from the even positions of every token but the last, values
    /// from the odd positions. An odd-length list therefore loses its trailing page
    /// number.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let head = match tokens.split_last() {
            Some((_, head)) => head,
            None => &[],
        };

        let pages = head
            .iter()
            .step_by(2)
            .map(|t| parse_page(t.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let values = tokens
            .iter()
            .skip(1)
            .step_by(2)
            .map(|t| parse_value(t.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        if tokens.len() % 2 == 1 {
            if let Some(last) = tokens.last() {
                warn!(
                    "Ignoring trailing page number {} without a value",
                    last.as_ref()
                );
            }
        }

        Ok(PageParams { pages, values })
    }

    /// Value for a 1-based page number; the first occurrence wins
    pub fn lookup(&self, page: u32) -> Option<f64> {
        let idx = self.pages.iter().position(|&p| p == page)?;
        self.values.get(idx).copied()
    }

    pub fn pages(&self) -> &[u32] {
        &self.pages
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

fn parse_page(s: &str) -> Result<u32> {
    let s = s.trim();
    s.parse::<u32>()
        .map_err(|_| anyhow!("Invalid page number: {}", s))
}

fn parse_value(s: &str) -> Result<f64> {
    let s = s.trim();
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| anyhow!("Invalid value: {}", s))
}
