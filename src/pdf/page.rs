use anyhow::Result;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

const PAGE_BOXES: [&[u8]; 5] = [b"MediaBox", b"CropBox", b"BleedBox", b"TrimBox", b"ArtBox"];

/// Rotate a page clockwise by `degrees`, on top of whatever `/Rotate` it already has.
/// The result is stored as is, without reducing it modulo 360.
pub fn rotate(doc: &mut Document, page_id: ObjectId, degrees: f64) -> Result<()> {
    let page = doc.get_dictionary_mut(page_id)?;
    let current = page
        .get(b"Rotate")
        .and_then(|r| r.as_float())
        .map(f64::from)
        .unwrap_or(0.0);
    page.set("Rotate", angle_object(current + degrees));
    Ok(())
}

fn angle_object(degrees: f64) -> Object {
    if degrees.fract() == 0.0 {
        Object::Integer(degrees as i64)
    } else {
        Object::Real(degrees as f32)
    }
}

/// Scale a page's content, page boxes and annotation rectangles by `sx`/`sy`
pub fn scale(doc: &mut Document, page_id: ObjectId, sx: f64, sy: f64) -> Result<()> {
    let contents = resolved_array(doc, doc.get_dictionary(page_id)?.get(b"Contents").ok());

    let begin = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Real(sx as f32),
                    0.into(),
                    0.into(),
                    Object::Real(sy as f32),
                    0.into(),
                    0.into(),
                ],
            ),
        ],
    };
    let end = Content {
        operations: vec![Operation::new("Q", vec![])],
    };
    let begin_id = doc.add_object(Stream::new(Dictionary::new(), begin.encode()?));
    let end_id = doc.add_object(Stream::new(Dictionary::new(), end.encode()?));

    let mut wrapped = Vec::with_capacity(contents.len() + 2);
    wrapped.push(Object::Reference(begin_id));
    wrapped.extend(contents);
    wrapped.push(Object::Reference(end_id));

    let mut boxes = Vec::new();
    let mut annotations = Vec::new();
    {
        let page = doc.get_dictionary(page_id)?;
        for key in PAGE_BOXES {
            let rect = resolved_array(doc, page.get(key).ok());
            if !rect.is_empty() {
                boxes.push((key, scale_rect(&rect, sx, sy)));
            }
        }
        for annot in resolved_array(doc, page.get(b"Annots").ok()) {
            if let Ok(annot_id) = annot.as_reference() {
                annotations.push(annot_id);
            }
        }
    }

    let page = doc.get_dictionary_mut(page_id)?;
    page.set("Contents", wrapped);
    for (key, rect) in boxes {
        page.set(key, rect);
    }

    for annot_id in annotations {
        let Ok(annot) = doc.get_dictionary_mut(annot_id) else {
            continue;
        };
        let scaled = match annot.get(b"Rect") {
            Ok(Object::Array(rect)) => Some(scale_rect(rect, sx, sy)),
            _ => None,
        };
        if let Some(rect) = scaled {
            annot.set("Rect", rect);
        }
    }

    Ok(())
}

/// Follow one level of indirection to an array; a lone non-array object becomes a
/// one-element list
fn resolved_array(doc: &Document, object: Option<&Object>) -> Vec<Object> {
    match object {
        Some(Object::Array(items)) => items.clone(),
        Some(Object::Reference(id)) => match doc.get_object(*id) {
            Ok(Object::Array(items)) => items.clone(),
            _ => vec![Object::Reference(*id)],
        },
        Some(other) => vec![other.clone()],
        None => Vec::new(),
    }
}

fn scale_rect(rect: &[Object], sx: f64, sy: f64) -> Vec<Object> {
    rect.iter()
        .enumerate()
        .map(|(i, value)| match value.as_float() {
            Ok(v) => {
                let factor = if i % 2 == 0 { sx } else { sy };
                Object::Real((f64::from(v) * factor) as f32)
            }
            Err(_) => value.clone(),
        })
        .collect()
}
