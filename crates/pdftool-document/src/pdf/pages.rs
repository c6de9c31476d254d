// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page-tree helpers: empty documents, inherited page attributes, and copying
// pages (with everything they reference) between lopdf documents.

use std::collections::HashMap;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use pdftool_core::error::{PdfToolError, Result};
use tracing::{debug, warn};

/// Page attributes a page may inherit from its ancestors in the page tree
/// (ISO 32000-1, table 30).
pub const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Upper bound on page-tree depth and reference chains. Malformed files can
/// contain `/Parent` loops; real documents stay far below this.
const MAX_DEPTH: usize = 64;

/// Create an empty document holding a catalog and an empty `/Pages` node.
///
/// Returns the document and the object id of its page tree root.
pub fn new_document() -> (Document, ObjectId) {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    (doc, pages_id)
}

/// Follow a chain of indirect references until a direct object is reached.
pub fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Object> {
    let mut current = object;
    for _ in 0..MAX_DEPTH {
        match current {
            Object::Reference(id) => current = doc.get_object(*id).ok()?,
            other => return Some(other),
        }
    }
    None
}

/// Look up `key` on a page, walking up `/Parent` links for inheritable
/// attributes.
pub fn inherited_attribute<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_DEPTH {
        if let Ok(value) = node.get(key) {
            return resolve(doc, value);
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }
    None
}

/// Numeric value of an integer or real PDF object.
pub fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(value) => Some(*value as f32),
        Object::Real(value) => Some(*value),
        _ => None,
    }
}

/// Effective page rotation, normalised to 0, 90, 180 or 270.
pub fn page_rotation(doc: &Document, page_id: ObjectId) -> i32 {
    inherited_attribute(doc, page_id, b"Rotate")
        .and_then(|value| value.as_i64().ok())
        .map(|degrees| (degrees as i32).rem_euclid(360))
        .unwrap_or(0)
}

/// Stream contents with any Flate/LZW filter removed.
pub fn stream_bytes(stream: &Stream) -> Option<Vec<u8>> {
    if stream.dict.has(b"Filter") {
        stream.decompressed_content().ok()
    } else {
        Some(stream.content.clone())
    }
}

/// Serialise a document to bytes. `what` names the output in the error.
pub fn save_to_bytes(doc: &mut Document, what: &str) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|err| PdfToolError::PdfError(format!("failed to serialise {what}: {err}")))?;
    Ok(output)
}

/// Append `page_id` to the `/Kids` of `pages_id` and bump `/Count`.
pub fn append_kid(doc: &mut Document, pages_id: ObjectId, page_id: ObjectId) -> Result<()> {
    let pages = doc
        .get_object_mut(pages_id)
        .and_then(Object::as_dict_mut)
        .map_err(|err| PdfToolError::PdfError(format!("page tree root unavailable: {err}")))?;

    if !matches!(pages.get(b"Kids"), Ok(Object::Array(_))) {
        pages.set("Kids", Vec::<Object>::new());
    }
    if let Ok(Object::Array(kids)) = pages.get_mut(b"Kids") {
        kids.push(Object::Reference(page_id));
    }

    let count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
    pages.set("Count", count + 1);
    Ok(())
}

/// Copies pages from one document into another.
///
/// Every object reachable from a copied page is transferred exactly once per
/// copier, so pages sharing fonts or images keep sharing them in the target.
/// References to other pages of the source (link destinations, annotation
/// `/P` entries) become `null` unless that page is copied too.
pub struct PageCopier<'a> {
    source: &'a Document,
    /// Source object id → target object id.
    id_map: HashMap<ObjectId, ObjectId>,
}

impl<'a> PageCopier<'a> {
    pub fn new(source: &'a Document) -> Self {
        Self {
            source,
            id_map: HashMap::new(),
        }
    }

    /// Copy one page to the end of `target_pages` in `target`, returning the
    /// new page's object id.
    pub fn copy_page(
        &mut self,
        target: &mut Document,
        target_pages: ObjectId,
        page_id: ObjectId,
    ) -> Result<ObjectId> {
        let mut page = self
            .source
            .get_dictionary(page_id)
            .map_err(|err| {
                PdfToolError::PdfError(format!("cannot read page object {page_id:?}: {err}"))
            })?
            .clone();

        // The new parent has no inherited values, so materialise them here.
        for key in INHERITABLE_KEYS {
            if page.has(key) {
                continue;
            }
            if let Some(value) = inherited_attribute(self.source, page_id, key) {
                page.set(key.to_vec(), value.clone());
            }
        }
        page.remove(b"Parent");

        let new_page_id = target.new_object_id();
        self.id_map.insert(page_id, new_page_id);

        let mut copied = self.copy_dictionary(target, &page, 0);
        copied.set("Parent", target_pages);
        target.objects.insert(new_page_id, Object::Dictionary(copied));

        append_kid(target, target_pages, new_page_id)?;
        debug!(?page_id, ?new_page_id, "page copied");
        Ok(new_page_id)
    }

    fn copy_object(&mut self, target: &mut Document, object: &Object, depth: usize) -> Object {
        if depth > MAX_DEPTH * 4 {
            warn!("object graph too deep, truncating");
            return Object::Null;
        }
        match object {
            Object::Reference(id) => self.copy_reference(target, *id, depth),
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dictionary(target, dict, depth)),
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.copy_object(target, item, depth + 1))
                    .collect(),
            ),
            Object::Stream(stream) => {
                let dict = self.copy_dictionary(target, &stream.dict, depth);
                Object::Stream(Stream::new(dict, stream.content.clone()))
            }
            other => other.clone(),
        }
    }

    fn copy_dictionary(&mut self, target: &mut Document, dict: &Dictionary, depth: usize) -> Dictionary {
        let mut copied = Dictionary::new();
        for (key, value) in dict.iter() {
            copied.set(key.clone(), self.copy_object(target, value, depth + 1));
        }
        copied
    }

    fn copy_reference(&mut self, target: &mut Document, id: ObjectId, depth: usize) -> Object {
        if let Some(mapped) = self.id_map.get(&id) {
            return Object::Reference(*mapped);
        }

        let referenced = match self.source.get_object(id) {
            Ok(object) => object,
            Err(err) => {
                warn!(?id, %err, "cannot resolve reference, using null");
                return Object::Null;
            }
        };

        if is_page_tree_node(referenced) {
            return Object::Null;
        }

        // Reserve the id before descending so cycles resolve to it.
        let new_id = target.new_object_id();
        self.id_map.insert(id, new_id);
        let copied = self.copy_object(target, referenced, depth + 1);
        target.objects.insert(new_id, copied);
        Object::Reference(new_id)
    }
}

fn is_page_tree_node(object: &Object) -> bool {
    match object {
        Object::Dictionary(dict) => matches!(
            dict.get(b"Type").and_then(Object::as_name),
            Ok(b"Page") | Ok(b"Pages")
        ),
        _ => false,
    }
}
