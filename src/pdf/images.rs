use crate::pdf::PdfWriter;
use anyhow::{Context, Result};
use image::{ColorType, DynamicImage, ImageBuffer, ImageDecoder, ImageFormat, ImageReader};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, ObjectId, Stream};
use std::io::Cursor;
use std::path::Path;
use tracing::warn;

/// Resolution images are laid out at: one pixel is `72 / RESOLUTION_DPI` points
pub const RESOLUTION_DPI: f32 = 100.0;

#[derive(Debug, Default, Clone)]
pub struct ImageOptions {
    /// Keep whatever part of a truncated image decoded instead of failing
    pub load_truncated: bool,
}

/// Pixel data ready to be embedded as an image XObject
pub struct PageImage {
    pub width: u32,
    pub height: u32,
    color_space: &'static str,
    filter: Option<&'static str>,
    data: Vec<u8>,
}

impl PageImage {
    pub fn load<P: AsRef<Path>>(path: P, options: &ImageOptions) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read image: {}", path.display()))?;

        let reader = ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .with_context(|| format!("Failed to read image: {}", path.display()))?;
        let format = reader.format();
        let decoder = reader
            .into_decoder()
            .with_context(|| format!("Failed to decode image: {}", path.display()))?;

        let (width, height) = decoder.dimensions();
        let color = decoder.color_type();
        let len = usize::try_from(decoder.total_bytes())
            .with_context(|| format!("Image is too large: {}", path.display()))?;

        // Rows the decoder never reached stay zeroed
        let mut buf = vec![0u8; len];
        let complete = match decoder.read_image(&mut buf) {
            Ok(()) => true,
            Err(e) if options.load_truncated => {
                warn!(
                    "{} is truncated, keeping the decoded part: {}",
                    path.display(),
                    e
                );
                false
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to decode image: {}", path.display()))
            }
        };

        let image = to_dynamic(width, height, color, buf).with_context(|| {
            format!("Unsupported color type {:?}: {}", color, path.display())
        })?;

        // JPEG data can go into the PDF untouched, as long as the decoder did not
        // have to convert the color space (CMYK and YCCK decode to RGB)
        if complete && format == Some(ImageFormat::Jpeg) {
            match (jpeg_components(&bytes), color) {
                (Some(1), ColorType::L8) => return Ok(Self::dct(&image, "DeviceGray", bytes)),
                (Some(3), ColorType::Rgb8) => return Ok(Self::dct(&image, "DeviceRGB", bytes)),
                _ => {}
            }
        }

        Ok(Self::from_pixels(&image))
    }

    fn dct(image: &DynamicImage, color_space: &'static str, data: Vec<u8>) -> Self {
        PageImage {
            width: image.width(),
            height: image.height(),
            color_space,
            filter: Some("DCTDecode"),
            data,
        }
    }

    pub fn from_pixels(image: &DynamicImage) -> Self {
        let (color_space, data) = match image.color() {
            ColorType::L8 | ColorType::L16 => ("DeviceGray", image.to_luma8().into_raw()),
            _ => ("DeviceRGB", image.to_rgb8().into_raw()),
        };
        PageImage {
            width: image.width(),
            height: image.height(),
            color_space,
            filter: None,
            data,
        }
    }

    /// Page size in points
    pub fn page_size(&self) -> (f32, f32) {
        let points_per_pixel = 72.0 / RESOLUTION_DPI;
        (
            self.width as f32 * points_per_pixel,
            self.height as f32 * points_per_pixel,
        )
    }
}

/// Wrap a raw `read_image` buffer, which holds native-endian samples
fn to_dynamic(width: u32, height: u32, color: ColorType, buf: Vec<u8>) -> Option<DynamicImage> {
    match color {
        ColorType::L8 => ImageBuffer::from_raw(width, height, buf).map(DynamicImage::ImageLuma8),
        ColorType::La8 => {
            ImageBuffer::from_raw(width, height, buf).map(DynamicImage::ImageLumaA8)
        }
        ColorType::Rgb8 => ImageBuffer::from_raw(width, height, buf).map(DynamicImage::ImageRgb8),
        ColorType::Rgba8 => {
            ImageBuffer::from_raw(width, height, buf).map(DynamicImage::ImageRgba8)
        }
        ColorType::L16 => {
            ImageBuffer::from_raw(width, height, u16_samples(&buf)).map(DynamicImage::ImageLuma16)
        }
        ColorType::La16 => ImageBuffer::from_raw(width, height, u16_samples(&buf))
            .map(DynamicImage::ImageLumaA16),
        ColorType::Rgb16 => {
            ImageBuffer::from_raw(width, height, u16_samples(&buf)).map(DynamicImage::ImageRgb16)
        }
        ColorType::Rgba16 => ImageBuffer::from_raw(width, height, u16_samples(&buf))
            .map(DynamicImage::ImageRgba16),
        ColorType::Rgb32F => ImageBuffer::from_raw(width, height, f32_samples(&buf))
            .map(DynamicImage::ImageRgb32F),
        ColorType::Rgba32F => ImageBuffer::from_raw(width, height, f32_samples(&buf))
            .map(DynamicImage::ImageRgba32F),
        _ => None,
    }
}

fn u16_samples(buf: &[u8]) -> Vec<u16> {
    buf.chunks_exact(2)
        .map(|c| u16::from_ne_bytes([c[0], c[1]]))
        .collect()
}

fn f32_samples(buf: &[u8]) -> Vec<f32> {
    buf.chunks_exact(4)
        .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

/// Number of color components declared in the first SOF segment of a JPEG stream
fn jpeg_components(data: &[u8]) -> Option<u8> {
    if !data.starts_with(&[0xFF, 0xD8]) {
        return None;
    }

    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            return None;
        }
        let marker = data[pos + 1];
        match marker {
            // fill bytes before a marker
            0xFF => {
                pos += 1;
                continue;
            }
            // standalone markers carry no length
            0x01 | 0xD0..=0xD7 => {
                pos += 2;
                continue;
            }
            0xD9 | 0xDA => return None,
            _ => {}
        }

        let len = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        let is_sof = matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_sof {
            // length(2) precision(1) height(2) width(2) components(1)
            return data.get(pos + 9).copied();
        }
        pos += 2 + len;
    }

    None
}

/// Add a page showing `image` edge to edge
pub fn push_image_page(writer: &mut PdfWriter, image: PageImage) -> Result<ObjectId> {
    let (width, height) = image.page_size();
    let doc = writer.document_mut();

    let mut image_dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => image.width as i64,
        "Height" => image.height as i64,
        "ColorSpace" => image.color_space,
        "BitsPerComponent" => 8,
    };
    if let Some(filter) = image.filter {
        image_dict.set("Filter", filter);
    }
    let image_id = doc.add_object(Stream::new(image_dict, image.data));

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Real(width),
                    0.into(),
                    0.into(),
                    Object::Real(height),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec!["Im0".into()]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "MediaBox" => vec![0.into(), 0.into(), Object::Real(width), Object::Real(height)],
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                "Im0" => image_id,
            },
        },
        "Contents" => content_id,
    });

    writer.push_page(page_id)
}
