// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Mapping from ZUGFeRD / Factur-X XML to the flat `InvoiceData` record.
//
// ZUGFeRD 1.0 (CrossIndustryDocument) and 2.x (CII D16B, CrossIndustryInvoice)
// carry the same information under different element names. Both are read
// through a per-version table of element names; everything else is shared.

use pdftool_core::error::{PdfToolError, Result};
use pdftool_core::types::{
    Amount, InvoiceData, LineItem, MonetarySummation, PaymentInfo, TradeParty, ZugferdVersion,
};
use tracing::debug;

use super::xml::{self, XmlNode};

const NAMESPACE_V1: &str = "urn:ferd:CrossIndustryDocument:invoice:1p0";
const NAMESPACE_V2: &str = "urn:un:unece:uncefact:data:standard:CrossIndustryInvoice:100";

/// Element names that differ between the two generations.
struct Layout {
    document: &'static str,
    transaction: &'static str,
    agreement: &'static str,
    settlement: &'static str,
    summation: &'static str,
    line_delivery: &'static str,
    line_settlement: &'static str,
    line_summation: &'static str,
}

const LAYOUT_V1: Layout = Layout {
    document: "HeaderExchangedDocument",
    transaction: "SpecifiedSupplyChainTradeTransaction",
    agreement: "ApplicableSupplyChainTradeAgreement",
    settlement: "ApplicableSupplyChainTradeSettlement",
    summation: "SpecifiedTradeSettlementMonetarySummation",
    line_delivery: "SpecifiedSupplyChainTradeDelivery",
    line_settlement: "SpecifiedSupplyChainTradeSettlement",
    line_summation: "SpecifiedTradeSettlementMonetarySummation",
};

const LAYOUT_V2: Layout = Layout {
    document: "ExchangedDocument",
    transaction: "SupplyChainTradeTransaction",
    agreement: "ApplicableHeaderTradeAgreement",
    settlement: "ApplicableHeaderTradeSettlement",
    summation: "SpecifiedTradeSettlementHeaderMonetarySummation",
    line_delivery: "SpecifiedLineTradeDelivery",
    line_settlement: "SpecifiedLineTradeSettlement",
    line_summation: "SpecifiedTradeSettlementLineMonetarySummation",
};

/// ZUGFeRD generation of a parsed document, from the root element's
/// namespace (falling back to its local name when the namespace is not
/// declared on the root).
pub fn detect_version(root: &XmlNode) -> ZugferdVersion {
    match root.namespace_uri() {
        Some(NAMESPACE_V1) => ZugferdVersion::V1,
        Some(NAMESPACE_V2) => ZugferdVersion::V2,
        Some(_) => ZugferdVersion::Unknown,
        None => match root.name.as_str() {
            "CrossIndustryDocument" => ZugferdVersion::V1,
            "CrossIndustryInvoice" => ZugferdVersion::V2,
            _ => ZugferdVersion::Unknown,
        },
    }
}

/// Parse invoice XML into an [`InvoiceData`] record.
///
/// Fails with `XmlError` for malformed XML and `NoInvoiceData` when the root
/// is not a ZUGFeRD document.
pub fn parse_invoice(xml_text: &str) -> Result<InvoiceData> {
    let root = xml::parse(xml_text)?;
    match detect_version(&root) {
        ZugferdVersion::Unknown => Err(PdfToolError::NoInvoiceData(format!(
            "root element <{}> is not a ZUGFeRD invoice",
            root.qualified_name()
        ))),
        version => Ok(invoice_from_tree(&root, version)),
    }
}

/// Read the invoice fields from an already parsed document.
pub fn invoice_from_tree(root: &XmlNode, version: ZugferdVersion) -> InvoiceData {
    let layout = match version {
        ZugferdVersion::V1 => &LAYOUT_V1,
        ZugferdVersion::V2 | ZugferdVersion::Unknown => &LAYOUT_V2,
    };
    let mut invoice = InvoiceData::empty(version);

    if let Some(document) = root.child(layout.document) {
        invoice.invoice_number = text_at(document, &["ID"]);
        invoice.type_code = text_at(document, &["TypeCode"]);
        if let Some(date) = document.path(&["IssueDateTime", "DateTimeString"]) {
            invoice.issue_date = date.text().map(str::to_string);
            invoice.issue_date_format = date.attribute("format").map(str::to_string);
        }
    }

    let Some(transaction) = root.child(layout.transaction) else {
        debug!("invoice has no trade transaction");
        return invoice;
    };

    if let Some(settlement) = transaction.child(layout.settlement) {
        invoice.currency = text_at(settlement, &["InvoiceCurrencyCode"]);
        invoice.payment = payment(settlement);
        if let Some(summation) = settlement.child(layout.summation) {
            invoice.totals = totals(summation, invoice.currency.as_deref());
        }
    }

    if let Some(agreement) = transaction.child(layout.agreement) {
        if let Some(seller) = agreement.child("SellerTradeParty") {
            invoice.seller = party(seller);
        }
        if let Some(buyer) = agreement.child("BuyerTradeParty") {
            invoice.buyer = party(buyer);
        }
    }

    let currency = invoice.currency.clone();
    invoice.line_items = transaction
        .children_named("IncludedSupplyChainTradeLineItem")
        .map(|item| line_item(item, layout, currency.as_deref()))
        .collect();

    debug!(
        version = version.label(),
        number = ?invoice.invoice_number,
        lines = invoice.line_items.len(),
        "Invoice parsed"
    );
    invoice
}

fn text_at(node: &XmlNode, path: &[&str]) -> Option<String> {
    node.path(path).and_then(XmlNode::text).map(str::to_string)
}

fn amount_at(node: &XmlNode, name: &str, fallback_currency: Option<&str>) -> Option<Amount> {
    let element = node.child(name)?;
    Some(Amount {
        value: element.text()?.to_string(),
        currency: element
            .attribute("currencyID")
            .or(fallback_currency)
            .map(str::to_string),
    })
}

fn party(node: &XmlNode) -> TradeParty {
    let address = node.child("PostalTradeAddress");
    let address_text = |name: &str| address.and_then(|address| text_at(address, &[name]));

    let email = text_at(node, &["URIUniversalCommunication", "URIID"]).or_else(|| {
        node.descendant("EmailURIUniversalCommunication")
            .and_then(|contact| text_at(contact, &["URIID"]))
    });

    let vat_id = node
        .children_named("SpecifiedTaxRegistration")
        .filter_map(|registration| registration.child("ID"))
        .find(|id| id.attribute("schemeID") == Some("VA"))
        .and_then(XmlNode::text)
        .map(str::to_string);

    TradeParty {
        name: text_at(node, &["Name"]),
        street: address_text("LineOne"),
        postcode: address_text("PostcodeCode"),
        city: address_text("CityName"),
        country: address_text("CountryID"),
        email,
        vat_id,
    }
}

fn payment(settlement: &XmlNode) -> PaymentInfo {
    let Some(means) = settlement.child("SpecifiedTradeSettlementPaymentMeans") else {
        return PaymentInfo::default();
    };
    PaymentInfo {
        means_code: text_at(means, &["TypeCode"]),
        iban: text_at(means, &["PayeePartyCreditorFinancialAccount", "IBANID"]),
        bic: text_at(means, &["PayeeSpecifiedCreditorFinancialInstitution", "BICID"]),
    }
}

fn totals(summation: &XmlNode, currency: Option<&str>) -> MonetarySummation {
    MonetarySummation {
        line_total: amount_at(summation, "LineTotalAmount", currency),
        tax_basis_total: amount_at(summation, "TaxBasisTotalAmount", currency),
        tax_total: amount_at(summation, "TaxTotalAmount", currency),
        grand_total: amount_at(summation, "GrandTotalAmount", currency),
        due_payable: amount_at(summation, "DuePayableAmount", currency),
    }
}

fn line_item(item: &XmlNode, layout: &Layout, currency: Option<&str>) -> LineItem {
    let quantity = item.path(&[layout.line_delivery, "BilledQuantity"]);
    LineItem {
        line_id: text_at(item, &["AssociatedDocumentLineDocument", "LineID"]),
        product_name: text_at(item, &["SpecifiedTradeProduct", "Name"]),
        quantity: quantity.and_then(XmlNode::text).map(str::to_string),
        unit_code: quantity
            .and_then(|quantity| quantity.attribute("unitCode"))
            .map(str::to_string),
        line_total: item
            .path(&[layout.line_settlement, layout.line_summation])
            .and_then(|summation| amount_at(summation, "LineTotalAmount", currency)),
    }
}
