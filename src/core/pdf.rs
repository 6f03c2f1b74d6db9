use crate::core::receipt::strip_div_tags;
use crate::domain::model::ReceiptFields;
use crate::utils::error::Result;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::fs;
use std::path::{Path, PathBuf};

// A4 in points.
const PAGE_WIDTH: f64 = 595.28;
const PAGE_HEIGHT: f64 = 841.89;

const MARGIN_X: f64 = 50.0;
const TOP_MARGIN: f64 = 50.0;
const LINE_HEIGHT: f64 = 18.0;
const HEADING_SIZE: f64 = 18.0;
const BODY_SIZE: f64 = 12.0;
// Text lines below this y are dropped rather than overflowed to a new page.
const TEXT_FLOOR: f64 = 100.0;
const IMAGE_FLOOR: f64 = 50.0;
const IMAGE_PADDING: f64 = 20.0;
const MAX_IMAGE_WIDTH_RATIO: f64 = 0.8;
const MAX_IMAGE_HEIGHT_RATIO: f64 = 0.4;
const WRAP_WIDTH: usize = 100;

const THANK_YOU_TEXT: &str = "Thank you for your order! We will ship your robot to you as soon as \
our warehouse robots gather the parts you ordered! You will receive your robot in no time!";

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

fn text_line(font: &str, size: f64, rgb: (f64, f64, f64), x: f64, y: f64, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("rg", vec![real(rgb.0), real(rgb.1), real(rgb.2)]),
        Operation::new("Tf", vec![Object::Name(font.into()), real(size)]),
        Operation::new("Td", vec![real(x), real(y)]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]
}

/// Uniform scale factor fitting `width x height` inside `max_width x
/// max_height` without ever upscaling past 1.0.
pub fn scale_to_fit(width: f64, height: f64, max_width: f64, max_height: f64) -> f64 {
    (max_width / width).min(max_height / height).min(1.0)
}

/// Greedy word wrap on whitespace; words longer than `width` get a line of
/// their own.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
        } else if line.len() + 1 + word.len() <= width {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Render the single-page A4 receipt: heading, timestamp, order id, the
/// address-prefixed cleaned parts line, the wrapped thank-you paragraph, and
/// the robot screenshot centered below the text.
pub fn render_receipt(
    fields: &ReceiptFields,
    screenshot_path: &Path,
    target: &Path,
) -> Result<PathBuf> {
    tracing::debug!(receipt = %target.display(), "rendering receipt PDF");

    let rgb = image::open(screenshot_path)?.to_rgb8();
    let (img_width, img_height) = rgb.dimensions();

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => img_width as i64,
            "Height" => img_height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8i64,
        },
        rgb.into_raw(),
    ));

    let mut operations: Vec<Operation> = Vec::new();
    let mut current_y = PAGE_HEIGHT - TOP_MARGIN;

    let red = (1.0, 0.0, 0.0);
    let black = (0.0, 0.0, 0.0);

    operations.extend(text_line("F2", HEADING_SIZE, red, MARGIN_X, current_y, "Receipt"));
    current_y -= LINE_HEIGHT;

    operations.extend(text_line(
        "F1",
        BODY_SIZE,
        black,
        MARGIN_X,
        current_y,
        &fields.timestamp,
    ));
    current_y -= LINE_HEIGHT;

    operations.extend(text_line(
        "F1",
        BODY_SIZE,
        black,
        MARGIN_X,
        current_y,
        &fields.order_id,
    ));
    current_y -= LINE_HEIGHT;

    let parts_line = format!("{}{}", fields.address, strip_div_tags(&fields.parts_html));
    operations.extend(text_line(
        "F1",
        BODY_SIZE,
        black,
        MARGIN_X,
        current_y,
        &parts_line,
    ));
    current_y -= LINE_HEIGHT;

    for line in wrap_text(THANK_YOU_TEXT, WRAP_WIDTH) {
        if current_y < TEXT_FLOOR {
            break;
        }
        operations.extend(text_line("F1", BODY_SIZE, black, MARGIN_X, current_y, &line));
        current_y -= LINE_HEIGHT;
    }

    let scale = scale_to_fit(
        img_width as f64,
        img_height as f64,
        PAGE_WIDTH * MAX_IMAGE_WIDTH_RATIO,
        PAGE_HEIGHT * MAX_IMAGE_HEIGHT_RATIO,
    );
    let draw_width = img_width as f64 * scale;
    let draw_height = img_height as f64 * scale;

    let mut image_y = current_y - draw_height - IMAGE_PADDING;
    if image_y < IMAGE_FLOOR {
        image_y = IMAGE_FLOOR;
    }
    let image_x = (PAGE_WIDTH - draw_width) / 2.0;

    operations.push(Operation::new("q", vec![]));
    operations.push(Operation::new(
        "cm",
        vec![
            real(draw_width),
            real(0.0),
            real(0.0),
            real(draw_height),
            real(image_x),
            real(image_y),
        ],
    ));
    operations.push(Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]));
    operations.push(Operation::new("Q", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let resources = dictionary! {
        "Font" => dictionary! {
            "F1" => font_regular,
            "F2" => font_bold,
        },
        "XObject" => dictionary! {
            "Im0" => image_id,
        },
    };

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![real(0.0), real(0.0), real(PAGE_WIDTH), real(PAGE_HEIGHT)],
        "Resources" => resources,
        "Contents" => content_id,
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    doc.save(target)?;

    Ok(target.to_path_buf())
}
