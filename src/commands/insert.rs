use crate::pdf::{PdfDocument, PdfWriter};
use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

/// Place every page of `insert` immediately before page `page` of `input`.
///
/// When `input` has no such page the insert document is left out and `input` is
/// copied unchanged.
pub fn run<P: AsRef<Path>, Q: AsRef<Path>, R: AsRef<Path>>(
    input: P,
    insert: Q,
    page: i64,
    output: R,
) -> Result<()> {
    let base = PdfDocument::open(&input)?;
    let extra = PdfDocument::open(&insert)?;

    if page < 1 || page > i64::from(base.page_count()) {
        warn!(
            "{} has no page {} (1-{}), nothing will be inserted",
            base.path,
            page,
            base.page_count()
        );
    }

    let mut writer = PdfWriter::new();
    let base_pages = writer.import(&base)?;
    let extra_pages = writer.import(&extra)?;

    for (i, &page_id) in base_pages.iter().enumerate() {
        if i as i64 + 1 == page {
            writer.push_pages(&extra_pages)?;
        }
        writer.push_page(page_id)?;
    }

    let total_pages = writer.save(&output)?;
    info!(
        "Wrote {} page(s) to {}",
        total_pages,
        output.as_ref().display()
    );

    Ok(())
}
