use crate::pdf::{PdfDocument, PdfWriter};
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// Copy the requested pages, in the requested order, into a new document
pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(input: P, pages: &[u32], output: Q) -> Result<()> {
    let doc = PdfDocument::open(&input)?;
    doc.check_pages(pages)?;

    let mut writer = PdfWriter::new();
    let source_pages = writer.import(&doc)?;
    for &page in pages {
        writer.push_page(source_pages[(page - 1) as usize])?;
    }

    let total_pages = writer.save(&output)?;
    info!(
        "Picked {} page(s) into {}",
        total_pages,
        output.as_ref().display()
    );

    Ok(())
}
