// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for PDF Tool.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Geometry and orientation of a single page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    /// 1-indexed page number.
    pub number: u32,
    /// MediaBox width in PDF points.
    pub width_pt: f32,
    /// MediaBox height in PDF points.
    pub height_pt: f32,
    /// Effective `/Rotate` value, normalised to 0, 90, 180 or 270.
    pub rotation: i32,
}

impl PageInfo {
    /// Width and height in millimetres, swapped when the page is rotated a
    /// quarter turn.
    pub fn display_size_mm(&self) -> (f32, f32) {
        const MM_PER_PT: f32 = 25.4 / 72.0;
        let (w, h) = (self.width_pt * MM_PER_PT, self.height_pt * MM_PER_PT);
        if self.rotation % 180 == 0 { (w, h) } else { (h, w) }
    }
}

/// Output encodings produced by the image extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    /// DCT-encoded data, written unchanged.
    Jpeg,
    /// JPX-encoded data, written unchanged.
    Jpeg2000,
    /// Raw samples re-encoded as PNG.
    Png,
}

impl ImageFormat {
    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Jpeg2000 => "jp2",
            Self::Png => "png",
        }
    }

    /// MIME type, used for preview data URLs.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Jpeg2000 => "image/jp2",
            Self::Png => "image/png",
        }
    }
}

/// Sidebar entries of the desktop window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Home,
    Split,
    Merge,
    ToWord,
    Images,
    Invoice,
    Settings,
}

impl Feature {
    /// All features in sidebar order.
    pub const ALL: [Feature; 7] = [
        Feature::Home,
        Feature::Split,
        Feature::Merge,
        Feature::ToWord,
        Feature::Images,
        Feature::Invoice,
        Feature::Settings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Split => "Split PDF",
            Self::Merge => "Merge PDFs",
            Self::ToWord => "PDF to Word",
            Self::Images => "Extract Images",
            Self::Invoice => "ZUGFeRD Reader",
            Self::Settings => "Settings",
        }
    }

    /// Whether the feature works on the currently opened PDF.
    pub fn needs_open_document(&self) -> bool {
        matches!(self, Self::Split | Self::ToWord | Self::Images | Self::Invoice)
    }
}

// ---------------------------------------------------------------------------
// ZUGFeRD invoice record
// ---------------------------------------------------------------------------

/// ZUGFeRD generation, derived from the root element's namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZugferdVersion {
    /// ZUGFeRD 1.0, `urn:ferd:CrossIndustryDocument:invoice:1p0`.
    V1,
    /// ZUGFeRD 2.x / Factur-X, UN/CEFACT CII D16B.
    V2,
    Unknown,
}

impl ZugferdVersion {
    pub fn label(&self) -> &'static str {
        match self {
            Self::V1 => "ZUGFeRD 1.0",
            Self::V2 => "ZUGFeRD 2.x / Factur-X",
            Self::Unknown => "unknown",
        }
    }
}

/// A monetary amount as written in the invoice, with its optional currency.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Amount {
    pub value: String,
    pub currency: Option<String>,
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.currency {
            Some(currency) => write!(f, "{} {}", self.value, currency),
            None => write!(f, "{}", self.value),
        }
    }
}

/// Seller or buyer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TradeParty {
    pub name: Option<String>,
    pub street: Option<String>,
    pub postcode: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub vat_id: Option<String>,
}

impl TradeParty {
    /// `"<postcode> <city>"`, or whichever half is present.
    pub fn postcode_city(&self) -> Option<String> {
        match (&self.postcode, &self.city) {
            (Some(postcode), Some(city)) => Some(format!("{postcode} {city}")),
            (Some(single), None) | (None, Some(single)) => Some(single.clone()),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaymentInfo {
    /// UNTDID 4461 payment means code, e.g. `58` for SEPA credit transfer.
    pub means_code: Option<String>,
    pub iban: Option<String>,
    pub bic: Option<String>,
}

/// Header-level totals.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonetarySummation {
    pub line_total: Option<Amount>,
    pub tax_basis_total: Option<Amount>,
    pub tax_total: Option<Amount>,
    pub grand_total: Option<Amount>,
    pub due_payable: Option<Amount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineItem {
    pub line_id: Option<String>,
    pub product_name: Option<String>,
    pub quantity: Option<String>,
    pub unit_code: Option<String>,
    pub line_total: Option<Amount>,
}

/// Flat record of the fields PDF Tool reads from an embedded invoice.
///
/// Every field is optional: invoices in the wild routinely omit parts of the
/// schema, and the UI shows missing values as "not available".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceData {
    pub version: ZugferdVersion,
    pub invoice_number: Option<String>,
    /// Raw `DateTimeString` content.
    pub issue_date: Option<String>,
    /// `DateTimeString@format`, `102` meaning `YYYYMMDD`.
    pub issue_date_format: Option<String>,
    pub type_code: Option<String>,
    pub currency: Option<String>,
    pub seller: TradeParty,
    pub buyer: TradeParty,
    pub payment: PaymentInfo,
    pub totals: MonetarySummation,
    pub line_items: Vec<LineItem>,
}

/// Placeholder shown for fields the invoice does not carry.
pub const NOT_AVAILABLE: &str = "not available";

impl InvoiceData {
    pub fn empty(version: ZugferdVersion) -> Self {
        Self {
            version,
            invoice_number: None,
            issue_date: None,
            issue_date_format: None,
            type_code: None,
            currency: None,
            seller: TradeParty::default(),
            buyer: TradeParty::default(),
            payment: PaymentInfo::default(),
            totals: MonetarySummation::default(),
            line_items: Vec::new(),
        }
    }

    /// The issue date as a calendar date, when written as `YYYYMMDD`.
    pub fn parsed_issue_date(&self) -> Option<NaiveDate> {
        let raw = self.issue_date.as_deref()?.trim();
        match self.issue_date_format.as_deref() {
            None | Some("102") => NaiveDate::parse_from_str(raw, "%Y%m%d").ok(),
            Some(_) => None,
        }
    }

    /// Rows for the UI field table: `(section, label, value)`.
    pub fn display_rows(&self) -> Vec<(&'static str, &'static str, String)> {
        fn show(value: &Option<String>) -> String {
            value.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string())
        }
        fn show_amount(value: &Option<Amount>) -> String {
            value
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        }

        let date = self
            .parsed_issue_date()
            .map(|d| d.format("%d.%m.%Y").to_string())
            .or_else(|| self.issue_date.clone())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let mut rows = vec![
            ("General", "Invoice number", show(&self.invoice_number)),
            ("General", "Invoice date", date),
            ("General", "Invoice type", show(&self.type_code)),
            ("General", "Currency", show(&self.currency)),
        ];
        for (section, party) in [("Seller", &self.seller), ("Buyer", &self.buyer)] {
            rows.push((section, "Name", show(&party.name)));
            rows.push((section, "Street", show(&party.street)));
            rows.push((section, "Postcode / city", show(&party.postcode_city())));
            rows.push((section, "Country", show(&party.country)));
            if section == "Seller" {
                rows.push((section, "E-mail", show(&party.email)));
                rows.push((section, "VAT id", show(&party.vat_id)));
            }
        }
        rows.push(("Payment", "Payment means", show(&self.payment.means_code)));
        rows.push(("Payment", "IBAN", show(&self.payment.iban)));
        rows.push(("Payment", "BIC", show(&self.payment.bic)));
        rows.push(("Amounts", "Net amount", show_amount(&self.totals.line_total)));
        rows.push(("Amounts", "Tax amount", show_amount(&self.totals.tax_total)));
        rows.push(("Amounts", "Grand total", show_amount(&self.totals.grand_total)));
        rows.push(("Amounts", "Amount due", show_amount(&self.totals.due_payable)));
        rows
    }
}
