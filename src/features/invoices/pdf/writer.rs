use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use super::fonts::{self, FontFace, GlyphSet, FIRST_EXTENDED_CODE};
use super::layout::{DrawOp, PAGE_HEIGHT, PAGE_WIDTH};
use super::PdfError;

fn real(value: f32) -> Object {
    Object::Real(value)
}

fn name(value: &str) -> Object {
    Object::Name(value.as_bytes().to_vec())
}

fn to_operations(ops: &[DrawOp]) -> Vec<Operation> {
    let mut operations = Vec::with_capacity(ops.len() * 6);

    for op in ops {
        match op {
            DrawOp::Text {
                text,
                x,
                y,
                size,
                face,
                gray,
            } => {
                operations.push(Operation::new("g", vec![real(*gray)]));
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Td", vec![real(*x), real(*y)]));
                // Tj advances the pen, so runs in different encodings chain
                for run in fonts::encode_runs(text) {
                    operations.push(Operation::new(
                        "Tf",
                        vec![name(face.resource_name(run.set)), real(*size)],
                    ));
                    operations.push(Operation::new(
                        "Tj",
                        vec![Object::String(run.bytes, StringFormat::Literal)],
                    ));
                }
                operations.push(Operation::new("ET", vec![]));
            }
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                gray,
            } => {
                operations.push(Operation::new("g", vec![real(*gray)]));
                operations.push(Operation::new(
                    "re",
                    vec![real(*x), real(*y), real(*width), real(*height)],
                ));
                operations.push(Operation::new("f", vec![]));
            }
            DrawOp::Line {
                from,
                to,
                thickness,
                gray,
            } => {
                operations.push(Operation::new("G", vec![real(*gray)]));
                operations.push(Operation::new("w", vec![real(*thickness)]));
                operations.push(Operation::new("m", vec![real(from.0), real(from.1)]));
                operations.push(Operation::new("l", vec![real(to.0), real(to.1)]));
                operations.push(Operation::new("S", vec![]));
            }
        }
    }

    operations
}

fn font_dictionary(face: FontFace, encoding: Object) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
        "Encoding" => encoding,
    }
}

/// Serialize laid-out operations into a one-page PDF
pub fn write_pdf(ops: &[DrawOp], title: &str) -> Result<Vec<u8>, PdfError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut differences = vec![Object::Integer(i64::from(FIRST_EXTENDED_CODE))];
    differences.extend(fonts::extended_glyph_names().map(name));
    let extended_id = doc.add_object(dictionary! {
        "Type" => "Encoding",
        "BaseEncoding" => "WinAnsiEncoding",
        "Differences" => differences,
    });

    let mut font_resources = Dictionary::new();
    for face in [FontFace::Regular, FontFace::Bold] {
        for set in [GlyphSet::WinAnsi, GlyphSet::Extended] {
            let encoding = match set {
                GlyphSet::WinAnsi => name("WinAnsiEncoding"),
                GlyphSet::Extended => Object::Reference(extended_id),
            };
            let font_id = doc.add_object(font_dictionary(face, encoding));
            font_resources.set(face.resource_name(set), font_id);
        }
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => font_resources,
    });

    let content = Content {
        operations: to_operations(ops),
    };
    let encoded = content
        .encode()
        .map_err(|e| PdfError::Encode(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::Reference(page_id)],
        "Count" => Object::Integer(1),
        "Resources" => resources_id,
        "MediaBox" => vec![real(0.0), real(0.0), real(PAGE_WIDTH), real(PAGE_HEIGHT)],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(title.to_string()),
        "Producer" => Object::string_literal("vizijos-core"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| PdfError::Write(e.to_string()))?;

    Ok(bytes)
}
