use crate::pdf::{PdfDocument, PdfWriter};
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// Concatenate every page of every input, in argument order
pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(inputs: &[P], output: Q) -> Result<()> {
    if inputs.is_empty() {
        anyhow::bail!("No input files specified");
    }

    let mut writer = PdfWriter::new();
    for input in inputs {
        let doc = PdfDocument::open(input)?;
        let pages = writer.import(&doc)?;
        writer.push_pages(&pages)?;
    }

    let total_pages = writer.save(&output)?;
    info!(
        "Joined {} files ({} pages) into {}",
        inputs.len(),
        total_pages,
        output.as_ref().display()
    );

    Ok(())
}
