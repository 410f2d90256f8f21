use crate::page_range::PageParams;
use crate::pdf::{page, PdfDocument, PdfWriter};
use anyhow::Result;
use std::path::Path;
use tracing::{debug, info, warn};

/// Scale pages uniformly by per-page factors given as `page factor page factor ...`
pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    page_scales: &[String],
    output: Q,
) -> Result<()> {
    let factors = PageParams::parse(page_scales)?;
    if factors.is_empty() {
        warn!("No page/factor pairs given, pages are copied unchanged");
    } else {
        debug!("Pages selected: {:?}", factors.pages());
    }
    let doc = PdfDocument::open(&input)?;

    let mut writer = PdfWriter::new();
    let source_pages = writer.import(&doc)?;
    let mut scaled = 0;
    for (i, &page_id) in source_pages.iter().enumerate() {
        let id = writer.push_page(page_id)?;
        if let Some(factor) = factors.lookup(i as u32 + 1) {
            page::scale(writer.document_mut(), id, factor, factor)?;
            scaled += 1;
        }
    }

    writer.save(&output)?;
    info!(
        "Scaled {} page(s) into {}",
        scaled,
        output.as_ref().display()
    );

    Ok(())
}
