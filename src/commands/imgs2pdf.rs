use crate::pdf::images::{push_image_page, ImageOptions, PageImage};
use crate::pdf::PdfWriter;
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// Lay out each image as one page, in argument order
pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    images: &[P],
    output: Q,
    options: &ImageOptions,
) -> Result<()> {
    if images.is_empty() {
        anyhow::bail!("No input images specified");
    }

    let mut writer = PdfWriter::new();
    for path in images {
        let image = PageImage::load(path, options)?;
        push_image_page(&mut writer, image)?;
    }

    let total_pages = writer.save(&output)?;
    info!(
        "Converted {} image(s) into {}",
        total_pages,
        output.as_ref().display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, RgbImage};
    use lopdf::Document;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_png(dir: &TempDir, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.path().join(name);
        RgbImage::from_pixel(width, height, Rgb([0, 0, 255]))
            .save(&path)
            .unwrap();
        path
    }

    fn page_sizes(path: &Path) -> Vec<(f32, f32)> {
        let doc = Document::load(path).unwrap();
        doc.get_pages()
            .values()
            .map(|&id| {
                let media_box = doc
                    .get_dictionary(id)
                    .unwrap()
                    .get(b"MediaBox")
                    .unwrap()
                    .as_array()
                    .unwrap();
                (
                    media_box[2].as_float().unwrap(),
                    media_box[3].as_float().unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn test_one_page_per_image() {
        let dir = TempDir::new().unwrap();
        let wide = write_png(&dir, "wide.png", 200, 100);
        let tall = write_png(&dir, "tall.png", 50, 300);
        let gray = dir.path().join("gray.png");
        image::GrayImage::from_pixel(100, 100, Luma([128]))
            .save(&gray)
            .unwrap();
        let out = dir.path().join("out.pdf");

        run(&[&wide, &tall, &gray], &out, &ImageOptions::default()).unwrap();

        assert_eq!(
            page_sizes(&out),
            vec![(144.0, 72.0), (36.0, 216.0), (72.0, 72.0)]
        );
    }

    #[test]
    fn test_corrupt_image_is_fatal() {
        let dir = TempDir::new().unwrap();
        let good = write_png(&dir, "good.png", 10, 10);
        let bad = dir.path().join("bad.png");
        std::fs::write(&bad, b"\x89PNG\r\n\x1a\n truncated").unwrap();
        let out = dir.path().join("out.pdf");

        assert!(run(&[&good, &bad], &out, &ImageOptions::default()).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_load_truncated_keeps_every_image() {
        let dir = TempDir::new().unwrap();
        let good = write_png(&dir, "good.png", 100, 100);
        let full = dir.path().join("full.png");
        RgbImage::from_fn(200, 200, |x, y| Rgb([x as u8, y as u8, (x * y) as u8]))
            .save(&full)
            .unwrap();
        let bytes = std::fs::read(&full).unwrap();
        let cut = dir.path().join("cut.png");
        std::fs::write(&cut, &bytes[..bytes.len() * 2 / 3]).unwrap();

        let strict = dir.path().join("strict.pdf");
        assert!(run(&[&good, &cut, &good], &strict, &ImageOptions::default()).is_err());
        assert!(!strict.exists());

        let out = dir.path().join("out.pdf");
        let options = ImageOptions {
            load_truncated: true,
        };
        run(&[&good, &cut, &good], &out, &options).unwrap();
        assert_eq!(
            page_sizes(&out),
            vec![(72.0, 72.0), (144.0, 144.0), (72.0, 72.0)]
        );
    }

    #[test]
    fn test_unreadable_header_is_fatal_even_when_lenient() {
        let dir = TempDir::new().unwrap();
        let bad = dir.path().join("bad.png");
        std::fs::write(&bad, b"\x89PNG\r\n\x1a\n truncated").unwrap();
        let out = dir.path().join("out.pdf");
        let options = ImageOptions {
            load_truncated: true,
        };

        assert!(run(&[&bad], &out, &options).is_err());
        assert!(!out.exists());
    }
}
