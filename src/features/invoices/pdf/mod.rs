//! Invoice PDF rendering.
//!
//! [`layout`] decides where everything goes, [`writer`] serializes it with
//! lopdf. Rendering is pure: storage and persistence live in the service.

pub mod fonts;
pub mod layout;
mod writer;

use thiserror::Error;

pub use layout::{BuyerBlock, InvoiceDocument, SellerBlock};

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("content encoding failed: {0}")]
    Encode(String),

    #[error("document write failed: {0}")]
    Write(String),
}

/// Render the invoice as PDF bytes
pub fn render_invoice_pdf(doc: &InvoiceDocument) -> Result<Vec<u8>, PdfError> {
    let ops = layout::layout_invoice(doc);
    writer::write_pdf(&ops, &layout::clean_text(&doc.number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_produces_pdf() {
        let bytes = render_invoice_pdf(&layout::tests::sample_document()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_rendered_pdf_parses_back() {
        let bytes = render_invoice_pdf(&layout::tests::sample_document()).unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    fn drawn_strings(bytes: &[u8]) -> Vec<Vec<u8>> {
        let doc = lopdf::Document::load_mem(bytes).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let content = doc.get_page_content(page_id).unwrap();
        lopdf::content::Content::decode(&content)
            .unwrap()
            .operations
            .into_iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(lopdf::Object::String(bytes, _)) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_foreign_names_are_drawn_without_replacement() {
        let mut doc = layout::tests::sample_document();
        doc.buyer.name = "Müller Café GmbH".to_string();
        doc.seller.address = "ul. Piotrkowska 1, Łódź".to_string();

        let strings = drawn_strings(&render_invoice_pdf(&doc).unwrap());
        assert!(strings.iter().all(|s| !s.contains(&b'?')));
        assert!(strings.contains(&b"M\xfcller Caf\xe9 GmbH".to_vec()));
    }
}
