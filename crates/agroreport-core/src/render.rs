// crates/agroreport-core/src/render.rs

//! PDF serialization of laid-out work orders.
//!
//! Output uses the standard Helvetica faces (no embedded fonts) and carries no creation date
//! or document ID, so the same document always serializes to the same bytes.

use pdf_writer::{Content, Finish, Name, Pdf, Rect as PdfRect, Ref, Str};

use crate::document::{Element, Page, Rgb, WorkOrderDocument};
use crate::error::{ReportError, Result};
use crate::layout::{CellPlacement, PlacedText, Position, Rect, PAGE_HEIGHT, PAGE_WIDTH};
use crate::metrics::{mm_to_points, FontStyle};

/// Bezier handle length for a quarter circle.
const KAPPA: f32 = 0.552_284_8;
const BORDER_WIDTH_MM: f64 = 0.2;
const FONT_FACES: [(FontStyle, &str); 3] = [
    (FontStyle::Regular, "F1"),
    (FontStyle::Bold, "F2"),
    (FontStyle::Oblique, "F3"),
];

fn font_resource(style: FontStyle) -> Name<'static> {
    let name = FONT_FACES
        .iter()
        .find(|(face, _)| *face == style)
        .map(|(_, name)| *name)
        .unwrap_or("F1");
    Name(name.as_bytes())
}

fn pt(mm: f64) -> f32 {
    mm_to_points(mm) as f32
}

/// Page x in points.
fn px(x: f64) -> f32 {
    pt(x)
}

/// Page y in points; layout y grows downward, PDF y grows upward.
fn py(y: f64) -> f32 {
    pt(PAGE_HEIGHT - y)
}

fn channel(value: u8) -> f32 {
    f32::from(value) / 255.0
}

fn set_fill(content: &mut Content, color: Rgb) {
    content.set_fill_rgb(channel(color.0), channel(color.1), channel(color.2));
}

fn set_stroke(content: &mut Content, color: Rgb) {
    content.set_stroke_rgb(channel(color.0), channel(color.1), channel(color.2));
}

fn rect_path(content: &mut Content, rect: &Rect) {
    content.rect(
        px(rect.x),
        py(rect.bottom()),
        pt(rect.width),
        pt(rect.height),
    );
}

fn circle_path(content: &mut Content, center: Position, radius: f64) {
    let (cx, cy, r) = (px(center.x), py(center.y), pt(radius));
    let k = r * KAPPA;
    content.move_to(cx + r, cy);
    content.cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r);
    content.cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy);
    content.cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r);
    content.cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy);
    content.close_path();
}

/// Encodes text for a WinAnsi simple font. Unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            ' '..='~' => ch as u8,
            '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}

fn draw_text(content: &mut Content, text: &PlacedText, color: Rgb) {
    if text.text.is_empty() {
        return;
    }
    let encoded = encode_win_ansi(&text.text);
    set_fill(content, color);
    content.begin_text();
    content.set_font(font_resource(text.style), text.size_pt as f32);
    content.next_line(px(text.x), py(text.baseline));
    content.show(Str(&encoded));
    content.end_text();
}

fn draw_cell(content: &mut Content, cell: &CellPlacement, fill: Rgb, border: Rgb, text_color: Rgb) {
    set_stroke(content, border);
    content.set_line_width(pt(BORDER_WIDTH_MM));
    rect_path(content, &cell.rect);
    if cell.filled {
        set_fill(content, fill);
        content.fill_nonzero_and_stroke();
    } else {
        content.stroke();
    }
    for line in &cell.lines {
        draw_text(content, line, text_color);
    }
}

/// Crossed arms with four rotors and a solid hub.
fn draw_drone_mark(content: &mut Content, origin: Position, size: f64, color: Rgb) {
    let rotor = size * 0.18;
    let hub = Position::new(origin.x + size / 2.0, origin.y + size / 2.0);
    let corners = [
        Position::new(origin.x, origin.y),
        Position::new(origin.x + size, origin.y),
        Position::new(origin.x + size, origin.y + size),
        Position::new(origin.x, origin.y + size),
    ];

    set_stroke(content, color);
    set_fill(content, color);
    content.set_line_width(pt(0.5));
    content.move_to(px(corners[0].x), py(corners[0].y));
    content.line_to(px(corners[2].x), py(corners[2].y));
    content.move_to(px(corners[1].x), py(corners[1].y));
    content.line_to(px(corners[3].x), py(corners[3].y));
    content.stroke();

    for corner in corners {
        circle_path(content, corner, rotor);
        content.stroke();
    }
    circle_path(content, hub, size * 0.2);
    content.fill_nonzero();
}

fn page_content(page: &Page) -> Vec<u8> {
    let mut content = Content::new();
    for element in &page.elements {
        match element {
            Element::FilledRect { rect, color } => {
                set_fill(&mut content, *color);
                rect_path(&mut content, rect);
                content.fill_nonzero();
            }
            Element::Line {
                from,
                to,
                color,
                width,
            } => {
                set_stroke(&mut content, *color);
                content.set_line_width(pt(*width));
                content.move_to(px(from.x), py(from.y));
                content.line_to(px(to.x), py(to.y));
                content.stroke();
            }
            Element::Text { text, color } => draw_text(&mut content, text, *color),
            Element::Row {
                row,
                fill,
                border,
                text_color,
            } => {
                draw_cell(&mut content, &row.label, *fill, *border, *text_color);
                draw_cell(&mut content, &row.value, *fill, *border, *text_color);
            }
            Element::DroneMark {
                origin,
                size,
                color,
            } => draw_drone_mark(&mut content, *origin, *size, *color),
        }
    }
    content.finish()
}

/// Serializes a laid-out document as a PDF file.
pub fn render_pdf(document: &WorkOrderDocument) -> Result<Vec<u8>> {
    if document.pages.is_empty() {
        return Err(ReportError::Render(format!(
            "document '{}' has no pages",
            document.name
        )));
    }

    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let font_ids: Vec<(FontStyle, &str, Ref)> = FONT_FACES
        .iter()
        .map(|(style, name)| (*style, *name, alloc.bump()))
        .collect();
    let page_ids: Vec<(Ref, Ref)> = document
        .pages
        .iter()
        .map(|_| (alloc.bump(), alloc.bump()))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(page_ids.len() as i32);

    let media_box = PdfRect::new(0.0, 0.0, pt(PAGE_WIDTH), pt(PAGE_HEIGHT));
    for (page, (page_id, content_id)) in document.pages.iter().zip(page_ids.iter()) {
        let mut pdf_page = pdf.page(*page_id);
        pdf_page.media_box(media_box);
        pdf_page.parent(page_tree_id);
        pdf_page.contents(*content_id);
        {
            let mut resources = pdf_page.resources();
            let mut fonts = resources.fonts();
            for (_, name, font_id) in &font_ids {
                fonts.pair(Name(name.as_bytes()), *font_id);
            }
        }
        pdf_page.finish();

        pdf.stream(*content_id, &page_content(page));
    }

    for (style, _, font_id) in &font_ids {
        pdf.type1_font(*font_id)
            .base_font(Name(style.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    Ok(pdf.finish())
}
