// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Embedded file attachments (PDF/A-3 associated files).

use std::collections::HashSet;

use lopdf::{Dictionary, Document, Object, ObjectId};
use pdftool_core::error::{PdfToolError, Result};
use serde::Serialize;
use tracing::{debug, warn};

use crate::pdf::pages;

/// Limit for `/Kids` nesting in the name tree.
const MAX_TREE_DEPTH: usize = 32;

/// A file embedded in a PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddedAttachment {
    pub name: String,
    /// `/Subtype` of the embedded file stream, e.g. `text/xml`.
    pub mime_type: Option<String>,
    /// `/AFRelationship` of the file specification, e.g. `Alternative`.
    pub relationship: Option<String>,
    #[serde(skip)]
    pub data: Vec<u8>,
}

impl EmbeddedAttachment {
    /// Whether the attachment looks like XML by name or MIME type.
    pub fn is_xml(&self) -> bool {
        self.name.to_ascii_lowercase().ends_with(".xml")
            || matches!(
                self.mime_type.as_deref(),
                Some("text/xml") | Some("application/xml")
            )
    }
}

/// Every embedded file of the document.
///
/// Looks in the catalog's `/Names /EmbeddedFiles` name tree (flat or with
/// `/Kids`) and in the catalog's `/AF` array. A file specification listed in
/// both places is returned once. Specifications without a readable embedded
/// stream are skipped.
pub fn embedded_files(doc: &Document) -> Result<Vec<EmbeddedAttachment>> {
    let catalog = doc
        .catalog()
        .map_err(|err| PdfToolError::PdfError(format!("document catalog unavailable: {err}")))?;

    let mut specs: Vec<(Option<String>, &Object)> = Vec::new();

    if let Some(tree) = lookup(doc, catalog, b"Names")
        .and_then(|names| lookup(doc, names, b"EmbeddedFiles"))
    {
        collect_name_tree(doc, tree, 0, &mut specs);
    }
    if let Some(Object::Array(associated)) = catalog
        .get(b"AF")
        .ok()
        .and_then(|object| pages::resolve(doc, object))
    {
        specs.extend(associated.iter().map(|spec| (None, spec)));
    }

    let mut seen: HashSet<ObjectId> = HashSet::new();
    let mut attachments = Vec::new();
    for (tree_name, spec) in specs {
        if let Object::Reference(id) = spec {
            if !seen.insert(*id) {
                continue;
            }
        }
        let Some(Object::Dictionary(spec_dict)) = pages::resolve(doc, spec) else {
            continue;
        };
        match read_file_spec(doc, spec_dict, tree_name) {
            Some(attachment) => {
                debug!(name = %attachment.name, bytes = attachment.data.len(), "Attachment found");
                attachments.push(attachment);
            }
            None => warn!("file specification without readable embedded stream"),
        }
    }
    Ok(attachments)
}

fn lookup<'a>(doc: &'a Document, dict: &'a Dictionary, key: &[u8]) -> Option<&'a Dictionary> {
    match pages::resolve(doc, dict.get(key).ok()?)? {
        Object::Dictionary(found) => Some(found),
        _ => None,
    }
}

fn collect_name_tree<'a>(
    doc: &'a Document,
    node: &'a Dictionary,
    depth: usize,
    out: &mut Vec<(Option<String>, &'a Object)>,
) {
    if depth > MAX_TREE_DEPTH {
        warn!("embedded file name tree too deep");
        return;
    }

    if let Some(Object::Array(pairs)) = node
        .get(b"Names")
        .ok()
        .and_then(|object| pages::resolve(doc, object))
    {
        for pair in pairs.chunks_exact(2) {
            let name = match pages::resolve(doc, &pair[0]) {
                Some(Object::String(bytes, _)) => Some(decode_text_string(bytes)),
                _ => None,
            };
            out.push((name, &pair[1]));
        }
    }

    if let Some(Object::Array(kids)) = node
        .get(b"Kids")
        .ok()
        .and_then(|object| pages::resolve(doc, object))
    {
        for kid in kids {
            if let Some(Object::Dictionary(child)) = pages::resolve(doc, kid) {
                collect_name_tree(doc, child, depth + 1, out);
            }
        }
    }
}

fn read_file_spec(
    doc: &Document,
    spec: &Dictionary,
    tree_name: Option<String>,
) -> Option<EmbeddedAttachment> {
    let embedded = lookup(doc, spec, b"EF")?;
    let stream = [b"UF".as_slice(), b"F".as_slice()]
        .iter()
        .find_map(|key| match pages::resolve(doc, embedded.get(key).ok()?)? {
            Object::Stream(stream) => Some(stream),
            _ => None,
        })?;
    let data = pages::stream_bytes(stream)?;

    let text = |dict: &Dictionary, key: &[u8]| match dict.get(key).ok().and_then(|o| pages::resolve(doc, o)) {
        Some(Object::String(bytes, _)) => Some(decode_text_string(bytes)).filter(|s| !s.is_empty()),
        _ => None,
    };
    let name_value = |dict: &Dictionary, key: &[u8]| {
        dict.get(key)
            .ok()
            .and_then(|object| pages::resolve(doc, object))
            .and_then(|object| object.as_name().ok())
            .map(|name| String::from_utf8_lossy(name).into_owned())
    };

    let name = text(spec, b"UF")
        .or_else(|| text(spec, b"F"))
        .or(tree_name)
        .unwrap_or_else(|| "attachment".to_string());

    Some(EmbeddedAttachment {
        name,
        mime_type: name_value(&stream.dict, b"Subtype"),
        relationship: name_value(spec, b"AFRelationship"),
        data,
    })
}

/// Decode a PDF text string: UTF-16BE or UTF-8 with byte order mark,
/// otherwise single-byte PDFDocEncoding (read as Latin-1).
pub fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(b"\xFE\xFF") {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    if let Some(utf8) = bytes.strip_prefix(b"\xEF\xBB\xBF") {
        return String::from_utf8_lossy(utf8).into_owned();
    }
    bytes.iter().map(|&byte| char::from(byte)).collect()
}
