use crate::pdf::PdfDocument;
use anyhow::{Context, Result};
use lopdf::{dictionary, Document, Object, ObjectId};
use std::path::Path;

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guards against cyclic `/Parent` chains in broken files
const MAX_TREE_DEPTH: usize = 64;

/// Builds a new document out of pages copied from one or more source documents.
///
/// Sources are imported whole with their object IDs shifted past everything already
/// in the output. Pages are then appended one by one under a fresh, flat page tree.
/// Objects that no appended page ends up referencing are pruned on save.
pub struct PdfWriter {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<ObjectId>,
}

impl PdfWriter {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        PdfWriter {
            doc,
            pages_id,
            kids: Vec::new(),
        }
    }

    /// Copy every object of `source` into the output.
    ///
    /// Returns the IDs the source's pages have in the output, in page order. The
    /// pages are not part of the output until passed to [`PdfWriter::push_page`].
    pub fn import(&mut self, source: &PdfDocument) -> Result<Vec<ObjectId>> {
        let offset = self.doc.max_id;

        for (&(num, generation), object) in &source.doc.objects {
            let mut object = object.clone();
            shift_references(&mut object, offset);
            self.doc.objects.insert((num + offset, generation), object);
        }
        self.doc.max_id = self.doc.max_id.max(source.doc.max_id + offset);

        let pages: Vec<ObjectId> = source
            .page_ids()
            .into_iter()
            .map(|(_, (num, generation))| (num + offset, generation))
            .collect();

        for &page_id in &pages {
            resolve_inherited(&mut self.doc, page_id)
                .with_context(|| format!("Malformed page tree in {}", source.path))?;
        }

        Ok(pages)
    }

    /// Append a page to the output. A page that was already appended is copied so
    /// every entry of the page tree is a distinct object.
    pub fn push_page(&mut self, page_id: ObjectId) -> Result<ObjectId> {
        let id = if self.kids.contains(&page_id) {
            let copy = self.doc.get_dictionary(page_id)?.clone();
            self.doc.add_object(copy)
        } else {
            page_id
        };

        self.doc
            .get_dictionary_mut(id)?
            .set("Parent", Object::Reference(self.pages_id));
        self.kids.push(id);
        Ok(id)
    }

    pub fn push_pages(&mut self, pages: &[ObjectId]) -> Result<()> {
        for &page_id in pages {
            self.push_page(page_id)?;
        }
        Ok(())
    }

    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Attach the page tree and catalog, then drop unreferenced objects
    pub fn finish(mut self) -> Document {
        let kids: Vec<Object> = self.kids.iter().map(|&id| Object::Reference(id)).collect();
        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        self.doc.prune_objects();
        self.doc.compress();
        self.doc
    }

    /// Write the output document, returning its page count
    pub fn save<P: AsRef<Path>>(self, path: P) -> Result<usize> {
        let pages = self.page_count();
        let mut doc = self.finish();
        PdfDocument::save(&mut doc, path)?;
        Ok(pages)
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn shift_references(object: &mut Object, offset: u32) {
    match object {
        Object::Reference(id) => id.0 += offset,
        Object::Array(items) => {
            for item in items.iter_mut() {
                shift_references(item, offset);
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter_mut() {
                shift_references(value, offset);
            }
        }
        Object::Stream(stream) => {
            for (_, value) in stream.dict.iter_mut() {
                shift_references(value, offset);
            }
        }
        _ => {}
    }
}

/// Copy inheritable attributes onto the page itself, since it is about to be
/// re-parented under a page tree root that carries none of them
fn resolve_inherited(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    let mut inherited = Vec::new();
    {
        let page = doc.get_dictionary(page_id)?;
        let mut missing: Vec<&[u8]> = INHERITABLE
            .iter()
            .copied()
            .filter(|key| !page.has(key))
            .collect();
        let mut parent = page.get(b"Parent").and_then(|p| p.as_reference()).ok();
        let mut depth = 0;

        while let Some(parent_id) = parent {
            if missing.is_empty() || depth >= MAX_TREE_DEPTH {
                break;
            }
            let Ok(node) = doc.get_dictionary(parent_id) else {
                break;
            };
            missing.retain(|key| match node.get(key) {
                Ok(value) => {
                    inherited.push((key.to_vec(), value.clone()));
                    false
                }
                Err(_) => true,
            });
            parent = node.get(b"Parent").and_then(|p| p.as_reference()).ok();
            depth += 1;
        }
    }

    let page = doc.get_dictionary_mut(page_id)?;
    for (key, value) in inherited {
        page.set(key, value);
    }
    Ok(())
}
