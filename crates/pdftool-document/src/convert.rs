// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF to Word (DOCX) and plain-text export.
//
// The DOCX output is a minimal WordprocessingML package: one paragraph per
// extracted text line, a page break between PDF pages, no layout, fonts or
// images.

use std::borrow::Cow;
use std::path::Path;

use chrono::Utc;
use pdftool_core::error::{PdfToolError, Result};
use quick_xml::escape::escape;
use tracing::{debug, info, instrument};

use crate::archive;
use crate::pdf::PdfReader;

const CONTENT_TYPES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
    r#"</Types>"#,
);

const ROOT_RELS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
    r#"</Relationships>"#,
);

const PAGE_BREAK: &str = r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#;

/// A4 portrait in twentieths of a point.
const SECTION_PROPERTIES: &str =
    r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1417" w:right="1417" w:bottom="1134" w:left="1417" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr>"#;

/// Default save-dialog name for a conversion: `report.pdf` → `report.docx`.
pub fn default_output_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "document".to_string());
    format!("{stem}.docx")
}

/// Normalise line endings and drop control characters that are not allowed
/// in XML text (form feeds, NULs, stray escape codes). Tabs and newlines
/// survive.
pub fn clean_text(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .chars()
        .filter(|&c| matches!(c, '\n' | '\t') || !(c.is_control() || matches!(c, '\u{FFFE}' | '\u{FFFF}')))
        .collect()
}

/// Convert the open document to DOCX at `output`. Returns the number of
/// pages converted.
#[instrument(skip_all, fields(output = %output.display()))]
pub fn pdf_to_docx(reader: &PdfReader, output: &Path) -> Result<usize> {
    let pages = page_texts(reader)?;
    let title = reader
        .source_path()
        .and_then(Path::file_stem)
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let document_xml = document_xml(&pages);
    let core_xml = core_properties_xml(&title);
    debug!(document_bytes = document_xml.len(), "WordprocessingML built");

    let parts: [(&str, &str); 4] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", ROOT_RELS_XML),
        ("word/document.xml", &document_xml),
        ("docProps/core.xml", &core_xml),
    ];
    let entries = parts
        .iter()
        .map(|(name, xml)| Ok::<_, PdfToolError>((name.to_string(), Cow::Borrowed(xml.as_bytes()))));

    archive::write_archive(output, entries).map_err(|err| match err {
        PdfToolError::ArchiveError(message) => PdfToolError::ConversionError(message),
        other => other,
    })?;

    info!(pages = pages.len(), "DOCX written");
    Ok(pages.len())
}

/// Open `input` and convert it to DOCX at `output`.
pub fn convert_file(input: &Path, output: &Path) -> Result<usize> {
    let reader = PdfReader::open(input)?;
    pdf_to_docx(&reader, output)
}

/// Write the cleaned document text to `output` as UTF-8.
#[instrument(skip_all, fields(output = %output.display()))]
pub fn export_text(reader: &PdfReader, output: &Path) -> Result<()> {
    let text = clean_text(&reader.extract_text()?);
    std::fs::write(output, text.as_bytes())?;
    info!(chars = text.len(), "Text exported");
    Ok(())
}

/// Cleaned text of every page. Fails with `NoText` when all pages are blank.
fn page_texts(reader: &PdfReader) -> Result<Vec<String>> {
    let mut pages = Vec::with_capacity(reader.page_count());
    for page_number in 1..=reader.page_count() as u32 {
        pages.push(clean_text(&reader.extract_page_text(page_number)?));
    }
    if pages.iter().all(|text| text.trim().is_empty()) {
        return Err(PdfToolError::NoText);
    }
    Ok(pages)
}

fn document_xml(pages: &[String]) -> String {
    let mut body = String::new();
    for (index, text) in pages.iter().enumerate() {
        if index > 0 {
            body.push_str(PAGE_BREAK);
        }
        for line in text.trim_end_matches('\n').split('\n') {
            let line = line.trim_end();
            if line.is_empty() {
                body.push_str("<w:p/>");
            } else {
                body.push_str(r#"<w:p><w:r><w:t xml:space="preserve">"#);
                body.push_str(&escape(line));
                body.push_str("</w:t></w:r></w:p>");
            }
        }
    }

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
            "<w:body>{body}{section}</w:body></w:document>"
        ),
        body = body,
        section = SECTION_PROPERTIES,
    )
}

fn core_properties_xml(title: &str) -> String {
    let created = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            "<dc:title>{title}</dc:title><dc:creator>PDF Tool</dc:creator>",
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{created}</dcterms:created>"#,
            "</cp:coreProperties>"
        ),
        title = escape(title),
        created = created,
    )
}
