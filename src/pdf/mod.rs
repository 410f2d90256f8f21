pub mod document;
#[cfg(test)]
pub mod fixtures;
pub mod images;
pub mod page;
pub mod text;
pub mod writer;

pub use document::PdfDocument;
pub use writer::PdfWriter;
