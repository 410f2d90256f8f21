use crate::pdf::{PdfDocument, PdfWriter};
use anyhow::Result;
use std::path::Path;
use tracing::{debug, info};

/// Copy every page except the listed ones, keeping document order
pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(input: P, pages: &[i64], output: Q) -> Result<()> {
    let doc = PdfDocument::open(&input)?;
    let total = doc.page_count();

    for &page in pages.iter().filter(|&&p| p < 1 || p > i64::from(total)) {
        debug!("Page {} is not in {} (1-{}), ignoring", page, doc.path, total);
    }

    let mut writer = PdfWriter::new();
    let source_pages = writer.import(&doc)?;
    for (i, &page_id) in source_pages.iter().enumerate() {
        if pages.contains(&(i as i64 + 1)) {
            continue;
        }
        writer.push_page(page_id)?;
    }

    let total_pages = writer.save(&output)?;
    info!(
        "Kept {} of {} page(s) in {}",
        total_pages,
        total,
        output.as_ref().display()
    );

    Ok(())
}
