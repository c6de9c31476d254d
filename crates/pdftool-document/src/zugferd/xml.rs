// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Small owned XML tree on top of quick-xml's event reader.
//
// Invoice XML is a few kilobytes, so the whole document is kept in memory
// and navigated by local element names. Namespace prefixes are recorded but
// not resolved except on demand for the root element.

use std::borrow::Cow;

use pdftool_core::error::{PdfToolError, Result};
use quick_xml::Reader;
use quick_xml::encoding::detect_encoding;
use quick_xml::events::{BytesDecl, BytesStart, Event};
use serde::Serialize;

/// One element with its attributes, text and child elements.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct XmlNode {
    /// Local name, without prefix.
    pub name: String,
    pub prefix: Option<String>,
    /// Attributes in document order, keys as written (`xmlns:ram`,
    /// `currencyID`).
    pub attributes: Vec<(String, String)>,
    /// Concatenated character data directly inside this element.
    pub text: String,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// Name as written in the document, e.g. `ram:ID`.
    pub fn qualified_name(&self) -> Cow<'_, str> {
        match &self.prefix {
            Some(prefix) => Cow::Owned(format!("{prefix}:{}", self.name)),
            None => Cow::Borrowed(&self.name),
        }
    }

    /// First child element with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All child elements with the given local name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// First element below this one (depth first, document order) with the
    /// given local name.
    pub fn descendant(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find_map(|child| {
            if child.name == name {
                Some(child)
            } else {
                child.descendant(name)
            }
        })
    }

    /// Follow a chain of child names.
    pub fn path(&self, names: &[&str]) -> Option<&XmlNode> {
        names.iter().try_fold(self, |node, name| node.child(name))
    }

    /// Attribute value by local name (`schemeID` also matches `ram:schemeID`).
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find_map(|(key, value)| {
            let local = key.rsplit(':').next().unwrap_or(key);
            (local == name && !key.starts_with("xmlns")).then_some(value.as_str())
        })
    }

    /// Trimmed text, `None` when empty.
    pub fn text(&self) -> Option<&str> {
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Namespace URI bound to this element's prefix by a declaration on the
    /// element itself. Enough for document roots, which declare their own.
    pub fn namespace_uri(&self) -> Option<&str> {
        let wanted = match &self.prefix {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        self.attributes
            .iter()
            .find(|(key, _)| *key == wanted)
            .map(|(_, value)| value.as_str())
    }

    /// Number of elements in this subtree, this one included.
    pub fn element_count(&self) -> usize {
        1 + self.children.iter().map(XmlNode::element_count).sum::<usize>()
    }
}

/// Parse raw attachment bytes. See [`decode`] for the accepted encodings.
pub fn parse_bytes(data: &[u8]) -> Result<XmlNode> {
    parse(&decode(data)?)
}

/// Decode raw attachment bytes to text.
///
/// A byte order mark, then the `encoding` of the XML declaration, selects
/// the decoder. UTF-8 input that does not validate is read as ISO-8859-1,
/// a common mislabelling by invoice generators.
pub(crate) fn decode(data: &[u8]) -> Result<Cow<'_, str>> {
    let selected = match detect_encoding(data) {
        Some((encoding, bom_len)) if bom_len > 0 || encoding.name().starts_with("UTF-16") => {
            Some((encoding, bom_len))
        }
        _ => declaration(data)
            .and_then(|decl| decl.encoder())
            .filter(|encoding| encoding.name() != "UTF-8")
            .map(|encoding| (encoding, 0)),
    };

    match selected {
        Some((encoding, bom_len)) => quick_xml::encoding::decode(&data[bom_len..], encoding)
            .map_err(|err| {
                PdfToolError::XmlError(format!("cannot decode as {}: {err}", encoding.name()))
            }),
        None => Ok(match std::str::from_utf8(data) {
            Ok(text) => Cow::Borrowed(text),
            Err(_) => Cow::Owned(data.iter().map(|&byte| char::from(byte)).collect()),
        }),
    }
}

/// The XML declaration, when the document starts with one.
fn declaration(data: &[u8]) -> Option<BytesDecl<'_>> {
    match Reader::from_reader(data).read_event() {
        Ok(Event::Decl(decl)) => Some(decl),
        _ => None,
    }
}

/// Parse a document into its root element.
pub fn parse(xml: &str) -> Result<XmlNode> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        let event = reader.read_event().map_err(|err| {
            PdfToolError::XmlError(format!("at byte {}: {err}", reader.buffer_position()))
        })?;
        match event {
            Event::Start(ref e) => stack.push(element(e)?),
            Event::Empty(ref e) => attach(&mut stack, &mut root, element(e)?)?,
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| PdfToolError::XmlError("unbalanced end tag".into()))?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::Text(ref e) => {
                if let Some(current) = stack.last_mut() {
                    let text = e.unescape().map_err(|err| PdfToolError::XmlError(err.to_string()))?;
                    current.text.push_str(&text);
                }
            }
            Event::CData(ref e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(PdfToolError::XmlError(format!(
            "document ends inside <{}>",
            stack.last().map(|node| node.name.as_str()).unwrap_or_default()
        )));
    }
    root.ok_or_else(|| PdfToolError::XmlError("no root element".into()))
}

fn element(start: &BytesStart<'_>) -> Result<XmlNode> {
    let name = start.name();
    let mut node = XmlNode {
        name: String::from_utf8_lossy(name.local_name().as_ref()).into_owned(),
        prefix: name
            .prefix()
            .map(|prefix| String::from_utf8_lossy(prefix.as_ref()).into_owned()),
        ..XmlNode::default()
    };

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| PdfToolError::XmlError(err.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attribute.value);
        let value = quick_xml::escape::unescape(&raw)
            .map_err(|err| PdfToolError::XmlError(format!("attribute {key}: {err}")))?
            .into_owned();
        node.attributes.push((key, value));
    }
    Ok(node)
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => return Err(PdfToolError::XmlError("more than one root element".into())),
    }
    Ok(())
}
