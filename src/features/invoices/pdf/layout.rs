//! Page layout for a single-page invoice.
//!
//! Produces positioned drawing operations in PDF user space (origin bottom
//! left, points). The writer turns them into a content stream.

use rust_decimal::Decimal;

use super::fonts::FontFace;

pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;
pub const MARGIN: f32 = 50.0;

const TITLE_SIZE: f32 = 26.0;
const NORMAL_SIZE: f32 = 10.0;
const NOTE_SIZE: f32 = 9.0;

const BAR_WIDTH: f32 = 260.0;
const BAR_HEIGHT: f32 = 26.0;
const HEADER_HEIGHT: f32 = 20.0;
const ROW_HEIGHT: f32 = 18.0;
const SUM_BOX_WIDTH: f32 = 200.0;

const NOTE: &str = "Pastaba: pardavėjas nėra PVM mokėtojas – PVM tarifas taikomas 0%.";

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        face: FontFace,
        gray: f32,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        gray: f32,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        thickness: f32,
        gray: f32,
    },
}

/// Seller details printed in the header
#[derive(Debug, Clone, Default)]
pub struct SellerBlock {
    pub name: String,
    pub code: String,
    pub vat_code: String,
    pub address: String,
    pub bank_name: String,
    pub bank_account: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default)]
pub struct BuyerBlock {
    pub name: String,
    pub code: String,
    pub vat_code: String,
    pub address: String,
}

/// Everything printed on the page, already resolved to display values
#[derive(Debug, Clone)]
pub struct InvoiceDocument {
    pub seller: SellerBlock,
    pub buyer: BuyerBlock,
    pub number: String,
    pub issue_date: String,
    pub due_date: String,
    pub payment_terms_days: i32,
    pub currency: String,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_without_vat: Decimal,
    pub vat_rate: Decimal,
    pub vat_amount: Decimal,
    pub total_with_vat: Decimal,
}

/// Collapse runs of whitespace and trim
pub fn clean_text(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn money(amount: Decimal, currency: &str) -> String {
    format!("{:.2} {}", amount, currency)
}

struct Canvas {
    ops: Vec<DrawOp>,
}

impl Canvas {
    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, face: FontFace, gray: f32) {
        self.ops.push(DrawOp::Text {
            text: clean_text(text),
            x,
            y,
            size,
            face,
            gray,
        });
    }

    fn text_right(&mut self, text: &str, right: f32, y: f32, size: f32, face: FontFace, gray: f32) {
        let text = clean_text(text);
        let width = face.width_of_text_at_size(&text, size);
        self.text(&text, right - width, y, size, face, gray);
    }

    fn text_center(&mut self, text: &str, center: f32, y: f32, size: f32, face: FontFace, gray: f32) {
        let text = clean_text(text);
        let width = face.width_of_text_at_size(&text, size);
        self.text(&text, center - width / 2.0, y, size, face, gray);
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, gray: f32) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            gray,
        });
    }
}

fn non_empty_lines(lines: Vec<(&str, &str)>) -> Vec<String> {
    lines
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(prefix, value)| format!("{}{}", prefix, value))
        .collect()
}

/// Lay out the invoice page
pub fn layout_invoice(doc: &InvoiceDocument) -> Vec<DrawOp> {
    use FontFace::{Bold, Regular};

    let mut canvas = Canvas { ops: Vec::new() };
    let right_edge = PAGE_WIDTH - MARGIN;
    let cursor_top = PAGE_HEIGHT - MARGIN;

    // Seller, left
    let seller = &doc.seller;
    let mut seller_y = cursor_top;
    canvas.text(&seller.name, MARGIN, seller_y, NORMAL_SIZE + 2.0, Bold, 0.1);
    seller_y -= 14.0;

    let seller_lines = non_empty_lines(vec![
        ("", seller.address.as_str()),
        ("IV numeris: ", seller.code.as_str()),
        ("PVM kodas: ", seller.vat_code.as_str()),
        ("Bankas: ", seller.bank_name.as_str()),
        ("Sąskaitos nr.: ", seller.bank_account.as_str()),
        ("El. paštas: ", seller.email.as_str()),
        ("Tel.: ", seller.phone.as_str()),
    ]);
    for line in &seller_lines {
        canvas.text(line, MARGIN, seller_y, NORMAL_SIZE, Regular, 0.2);
        seller_y -= 12.0;
    }

    // Title and number, right
    let mut title_y = cursor_top + 8.0;
    canvas.text(
        "Sąskaita faktūra",
        PAGE_WIDTH / 2.0 + 40.0,
        title_y,
        TITLE_SIZE,
        Bold,
        0.15,
    );
    title_y -= 28.0;

    let label = "Nr.:";
    let label_width = Regular.width_of_text_at_size(label, NORMAL_SIZE);
    let space_width = Regular.width_of_text_at_size(" ", NORMAL_SIZE);
    let number = clean_text(&doc.number);
    let number_width = Bold.width_of_text_at_size(&number, NORMAL_SIZE);
    let start_x = right_edge - (label_width + space_width + number_width);
    canvas.text(label, start_x, title_y, NORMAL_SIZE, Regular, 0.4);
    canvas.text(
        &number,
        start_x + label_width + space_width,
        title_y,
        NORMAL_SIZE,
        Bold,
        0.15,
    );

    let mut info_y = title_y - 34.0;
    let info_label_x = right_edge - 150.0;
    let terms = format!("{} d.", doc.payment_terms_days);
    for (label, value) in [
        ("Išrašymo data:", doc.issue_date.as_str()),
        ("Apmokėjimo terminas:", terms.as_str()),
        ("Apmokėti iki:", doc.due_date.as_str()),
    ] {
        if value.is_empty() {
            continue;
        }
        canvas.text(label, info_label_x, info_y, NORMAL_SIZE, Regular, 0.4);
        canvas.text_right(value, right_edge, info_y, NORMAL_SIZE, Regular, 0.15);
        info_y -= 12.0;
    }

    // Amount due bar
    let mut cursor_y = seller_y - 24.0;
    let bar_x = right_edge - BAR_WIDTH;
    let bar_y = cursor_y - BAR_HEIGHT;
    canvas.rect(bar_x, bar_y, BAR_WIDTH, BAR_HEIGHT, 0.95);
    canvas.text("Mokėtina suma:", bar_x + 14.0, bar_y + 8.0, NORMAL_SIZE, Regular, 0.4);
    canvas.text_right(
        &money(doc.total_with_vat, &doc.currency),
        bar_x + BAR_WIDTH - 14.0,
        bar_y + 8.0,
        NORMAL_SIZE + 1.0,
        Bold,
        0.0,
    );
    cursor_y = bar_y - 32.0;

    // Buyer
    let buyer = &doc.buyer;
    canvas.text("Pirkėjas:", MARGIN, cursor_y, NORMAL_SIZE, Bold, 0.3);
    cursor_y -= 14.0;
    let buyer_lines = non_empty_lines(vec![
        ("", buyer.name.as_str()),
        ("", buyer.address.as_str()),
        ("Įmonės kodas: ", buyer.code.as_str()),
        ("PVM kodas: ", buyer.vat_code.as_str()),
    ]);
    for line in &buyer_lines {
        canvas.text(line, MARGIN, cursor_y, NORMAL_SIZE, Regular, 0.2);
        cursor_y -= 12.0;
    }
    cursor_y -= 14.0;

    // Line items
    let table_left = MARGIN;
    let table_right = right_edge;
    let table_width = table_right - table_left;
    let item_x = table_left + 8.0;
    let qty_center = table_left + table_width * 0.55;
    let rate_center = table_left + table_width * 0.72;
    let amount_center = table_left + table_width * 0.89;

    canvas.rect(table_left, cursor_y - HEADER_HEIGHT, table_width, HEADER_HEIGHT, 0.2);
    let header_y = cursor_y - HEADER_HEIGHT + 6.0;
    canvas.text("Paslauga", item_x, header_y, NORMAL_SIZE, Bold, 1.0);
    canvas.text_center("Kiekis", qty_center, header_y, NORMAL_SIZE, Bold, 1.0);
    canvas.text_center("Kaina", rate_center, header_y, NORMAL_SIZE, Bold, 1.0);
    canvas.text_center("Suma", amount_center, header_y, NORMAL_SIZE, Bold, 1.0);
    cursor_y -= HEADER_HEIGHT + 12.0;

    canvas.text(&doc.description, item_x, cursor_y, NORMAL_SIZE, Regular, 0.15);
    canvas.text_center(
        &format!("{:.2}", doc.quantity),
        qty_center,
        cursor_y,
        NORMAL_SIZE,
        Regular,
        0.15,
    );
    canvas.text_center(
        &money(doc.unit_price, &doc.currency),
        rate_center,
        cursor_y,
        NORMAL_SIZE,
        Regular,
        0.15,
    );
    canvas.text_center(
        &money(doc.total_without_vat, &doc.currency),
        amount_center,
        cursor_y,
        NORMAL_SIZE,
        Regular,
        0.15,
    );
    cursor_y -= ROW_HEIGHT;

    canvas.ops.push(DrawOp::Line {
        from: (table_left, cursor_y),
        to: (table_right, cursor_y),
        thickness: 0.8,
        gray: 0.9,
    });
    cursor_y -= 24.0;

    // Totals
    let sum_x = table_right - SUM_BOX_WIDTH;
    let mut sum_y = cursor_y;
    let vat_label = format!("PVM ({:.0}%):", doc.vat_rate);
    for (label, amount, face) in [
        ("Suma be PVM:", doc.total_without_vat, Regular),
        (vat_label.as_str(), doc.vat_amount, Regular),
        ("Iš viso:", doc.total_with_vat, Bold),
    ] {
        canvas.text(label, sum_x, sum_y, NORMAL_SIZE, face, 0.35);
        canvas.text_right(
            &money(amount, &doc.currency),
            sum_x + SUM_BOX_WIDTH,
            sum_y,
            NORMAL_SIZE,
            face,
            0.15,
        );
        sum_y -= 14.0;
    }

    canvas.text(NOTE, MARGIN, sum_y - 20.0, NOTE_SIZE, Regular, 0.4);

    canvas.ops
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_document() -> InvoiceDocument {
        InvoiceDocument {
            seller: SellerBlock {
                name: "UAB Vizijos".to_string(),
                code: "305000000".to_string(),
                address: "Gedimino pr. 1,  Vilnius".to_string(),
                email: "info@vizijos.lt".to_string(),
                ..SellerBlock::default()
            },
            buyer: BuyerBlock {
                name: "Žalias sodas".to_string(),
                code: "123456789".to_string(),
                ..BuyerBlock::default()
            },
            number: "EV-2025-00042".to_string(),
            issue_date: "2025-03-01".to_string(),
            due_date: "2025-03-15".to_string(),
            payment_terms_days: 14,
            currency: "EUR".to_string(),
            description: "Reklamos talpinimas kataloge".to_string(),
            quantity: Decimal::ONE,
            unit_price: Decimal::new(34800, 2),
            total_without_vat: Decimal::new(34800, 2),
            vat_rate: Decimal::ZERO,
            vat_amount: Decimal::ZERO,
            total_with_vat: Decimal::new(34800, 2),
        }
    }

    fn find_text<'a>(ops: &'a [DrawOp], needle: &str) -> Option<&'a DrawOp> {
        ops.iter()
            .find(|op| matches!(op, DrawOp::Text { text, .. } if text == needle))
    }

    fn right_end(op: &DrawOp) -> f32 {
        match op {
            DrawOp::Text {
                text, x, size, face, ..
            } => x + face.width_of_text_at_size(text, *size),
            _ => panic!("not a text op"),
        }
    }

    #[test]
    fn test_number_ends_at_right_margin() {
        let ops = layout_invoice(&sample_document());
        let number = find_text(&ops, "EV-2025-00042").expect("number drawn");
        assert!((right_end(number) - (PAGE_WIDTH - MARGIN)).abs() < 0.01);
    }

    #[test]
    fn test_totals_are_right_aligned() {
        let ops = layout_invoice(&sample_document());
        let totals: Vec<&DrawOp> = ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { text, .. } if text == "348.00 EUR"))
            .collect();
        // bar, table amount, net, gross
        assert!(totals.len() >= 3);

        let edge = PAGE_WIDTH - MARGIN;
        let aligned = totals
            .iter()
            .filter(|op| (right_end(op) - edge).abs() < 0.01)
            .count();
        assert_eq!(aligned, 2);
    }

    #[test]
    fn test_missing_seller_lines_are_skipped() {
        let ops = layout_invoice(&sample_document());
        assert!(find_text(&ops, "IV numeris: 305000000").is_some());
        assert!(find_text(&ops, "Gedimino pr. 1, Vilnius").is_some());
        assert!(ops
            .iter()
            .all(|op| !matches!(op, DrawOp::Text { text, .. } if text.starts_with("Tel.:"))));
    }

    #[test]
    fn test_empty_due_date_row_is_skipped() {
        let mut doc = sample_document();
        doc.due_date = String::new();
        let ops = layout_invoice(&doc);
        assert!(find_text(&ops, "Apmokėti iki:").is_none());
        assert!(find_text(&ops, "14 d.").is_some());
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  a \n\t b  "), "a b");
    }
}
