use crate::page_range::PageParams;
use crate::pdf::{page, PdfDocument, PdfWriter};
use anyhow::Result;
use std::path::Path;
use tracing::{debug, info, warn};

/// Rotate pages clockwise by per-page angles given as `page angle page angle ...`
pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    page_angles: &[String],
    output: Q,
) -> Result<()> {
    let angles = PageParams::parse(page_angles)?;
    if angles.is_empty() {
        warn!("No page/angle pairs given, pages are copied unchanged");
    } else {
        debug!("Pages selected: {:?}", angles.pages());
    }
    let doc = PdfDocument::open(&input)?;

    let mut writer = PdfWriter::new();
    let source_pages = writer.import(&doc)?;
    let mut rotated = 0;
    for (i, &page_id) in source_pages.iter().enumerate() {
        let id = writer.push_page(page_id)?;
        if let Some(angle) = angles.lookup(i as u32 + 1) {
            page::rotate(writer.document_mut(), id, angle)?;
            rotated += 1;
        }
    }

    writer.save(&output)?;
    info!(
        "Rotated {} page(s) into {}",
        rotated,
        output.as_ref().display()
    );

    Ok(())
}
