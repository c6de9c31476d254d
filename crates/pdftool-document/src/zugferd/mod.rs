// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ZUGFeRD / Factur-X reader: find the invoice XML attached to a PDF and turn
// it into a flat record.

pub mod attachments;
pub mod invoice;
pub mod xml;

use std::path::Path;

use pdftool_core::error::{PdfToolError, Result};
use pdftool_core::types::{InvoiceData, ZugferdVersion};
use tracing::{debug, info, instrument};

use crate::pdf::PdfReader;

pub use attachments::{EmbeddedAttachment, embedded_files};
pub use invoice::{detect_version, parse_invoice};
pub use xml::XmlNode;

/// Attachment names used by the ZUGFeRD, Factur-X and XRechnung profiles.
/// Compared case-insensitively.
pub const WELL_KNOWN_NAMES: [&str; 3] = ["factur-x.xml", "zugferd-invoice.xml", "xrechnung.xml"];

/// Invoice data found in a PDF.
#[derive(Debug, Clone, PartialEq)]
pub struct ZugferdDocument {
    /// Name of the attachment the data came from.
    pub attachment_name: String,
    pub version: ZugferdVersion,
    /// The XML as attached, decoded to text.
    pub xml: String,
    pub root: XmlNode,
    pub invoice: InvoiceData,
}

/// Read the embedded invoice of an opened document.
///
/// XML attachments are tried with the well-known names first; the first
/// one that parses and carries a ZUGFeRD root element wins.
#[instrument(skip_all, fields(document = %reader.display_name()))]
pub fn read_invoice(reader: &PdfReader) -> Result<ZugferdDocument> {
    let attachments = embedded_files(reader.document())?;
    if attachments.is_empty() {
        return Err(PdfToolError::NoEmbeddedFiles);
    }

    let mut candidates: Vec<&EmbeddedAttachment> =
        attachments.iter().filter(|file| file.is_xml()).collect();
    candidates.sort_by_key(|file| !is_well_known(&file.name));

    for candidate in &candidates {
        let parsed = xml::decode(&candidate.data).and_then(|text| {
            let root = xml::parse(&text)?;
            Ok((text.into_owned(), root))
        });
        let (xml, root) = match parsed {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!(name = %candidate.name, %err, "attachment is not well-formed XML");
                continue;
            }
        };
        let version = detect_version(&root);
        if version == ZugferdVersion::Unknown {
            debug!(name = %candidate.name, root = %root.qualified_name(), "not a ZUGFeRD document");
            continue;
        }

        let invoice = invoice::invoice_from_tree(&root, version);
        info!(name = %candidate.name, version = version.label(), "Invoice data found");
        return Ok(ZugferdDocument {
            attachment_name: candidate.name.clone(),
            version,
            xml,
            root,
            invoice,
        });
    }

    let names: Vec<&str> = attachments.iter().map(|file| file.name.as_str()).collect();
    Err(PdfToolError::NoInvoiceData(format!(
        "{} attachment(s) checked: {}",
        attachments.len(),
        names.join(", ")
    )))
}

/// Open `path` and read its embedded invoice.
pub fn read_invoice_file(path: &Path) -> Result<ZugferdDocument> {
    let reader = PdfReader::open(path)?;
    read_invoice(&reader)
}

fn is_well_known(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    WELL_KNOWN_NAMES.contains(&lower.as_str())
}
