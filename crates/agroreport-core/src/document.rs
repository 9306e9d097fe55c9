// crates/agroreport-core/src/document.rs

use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::correction::AggregatedRow;
use crate::layout::{
    centered_baseline, layout_row, LayoutRow, PlacedText, Position, Rect, RowPlacement,
    PAGE_HEIGHT, PAGE_MARGIN, PAGE_WIDTH,
};
use crate::metrics::{FontStyle, TextMeasure};
use crate::time_codec::encode_duration;

pub const DOCUMENT_PREFIX: &str = "Reporte";
pub const DOCUMENT_EXTENSION: &str = "pdf";
const MAX_LOCATION_CHARS: usize = 40;

pub const BAND_HEIGHT: f64 = 40.0;
const BRAND_TITLE_TOP: f64 = PAGE_MARGIN;
const BRAND_TITLE_HEIGHT: f64 = 15.0;
const BRAND_TITLE_SIZE_PT: f64 = 20.0;
const BRAND_SUBTITLE_SIZE_PT: f64 = 9.0;
const BRAND_SUBTITLE: &str = "DRONE APPLICATION REPORT";
const MARK_ORIGIN: Position = Position { x: 170.0, y: 12.0 };
const MARK_SIZE: f64 = 10.0;

const TITLE_BAR_TOP: f64 = BAND_HEIGHT + 5.0;
const TITLE_BAR_HEIGHT: f64 = 10.0;
const TITLE_SIZE_PT: f64 = 14.0;
/// Rows start this far below the title bar.
const TITLE_GAP: f64 = 10.0;

const FOOTER_TOP: f64 = PAGE_HEIGHT - 20.0;
const FOOTER_HEIGHT: f64 = 10.0;
const FOOTER_SIZE_PT: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BRAND_NAVY: Rgb = Rgb(0, 51, 102);
pub const BRAND_BLUE: Rgb = Rgb(0, 102, 204);
pub const LABEL_FILL: Rgb = Rgb(240, 245, 255);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const FOOTER_GRAY: Rgb = Rgb(128, 128, 128);

/// Drawing primitives of a laid-out page, in paint order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    FilledRect {
        rect: Rect,
        color: Rgb,
    },
    Line {
        from: Position,
        to: Position,
        color: Rgb,
        width: f64,
    },
    Text {
        text: PlacedText,
        color: Rgb,
    },
    /// A label/value row: filled label cell, bordered value cell.
    Row {
        row: RowPlacement,
        fill: Rgb,
        border: Rgb,
        text_color: Rgb,
    },
    DroneMark {
        origin: Position,
        size: f64,
        color: Rgb,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub elements: Vec<Element>,
}

/// A laid-out work order, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrderDocument {
    pub name: String,
    pub title: String,
    pub pages: Vec<Page>,
}

/// The five rows of a work order, in print order.
pub fn work_order_rows(row: &AggregatedRow) -> [LayoutRow; 5] {
    [
        LayoutRow::new("LOCATION", row.location.clone()),
        LayoutRow::new("TOTAL AREA", format!("{:.2}", row.corrected_area)).with_unit("Hectares"),
        LayoutRow::new("SUPPLY APPLIED", format!("{:.2}", row.total_supply)).with_unit("L/Kg"),
        LayoutRow::new("OPERATING TIME", encode_duration(row.total_duration_seconds)),
        LayoutRow::new("FLIGHT COUNT", row.flight_count.to_string()),
    ]
}

/// Reduces text to `[A-Za-z0-9-]` with single `_` separators, at most `max_chars` long.
pub fn sanitize_component(text: &str, max_chars: usize) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' {
            out.push(ch);
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    let truncated: String = out.chars().take(max_chars).collect();
    truncated.trim_matches('_').to_string()
}

/// `Reporte_<date>_<location>.pdf`; the row index stands in for an empty location.
pub fn document_name(row: &AggregatedRow, index: usize) -> String {
    let date = match sanitize_component(&row.date, usize::MAX) {
        date if date.is_empty() => "undated".to_string(),
        date => date,
    };
    let location = match sanitize_component(&row.location, MAX_LOCATION_CHARS) {
        location if location.is_empty() => index.to_string(),
        location => location,
    };
    format!("{DOCUMENT_PREFIX}_{date}_{location}.{DOCUMENT_EXTENSION}")
}

fn branding_band(organization: &str) -> Vec<Element> {
    vec![
        Element::FilledRect {
            rect: Rect::new(0.0, 0.0, PAGE_WIDTH, BAND_HEIGHT),
            color: BRAND_NAVY,
        },
        Element::DroneMark {
            origin: MARK_ORIGIN,
            size: MARK_SIZE,
            color: BRAND_BLUE,
        },
        Element::Text {
            text: PlacedText {
                text: organization.to_string(),
                x: PAGE_MARGIN,
                baseline: centered_baseline(BRAND_TITLE_TOP, BRAND_TITLE_HEIGHT, BRAND_TITLE_SIZE_PT),
                style: FontStyle::Bold,
                size_pt: BRAND_TITLE_SIZE_PT,
            },
            color: WHITE,
        },
        Element::Text {
            text: PlacedText {
                text: BRAND_SUBTITLE.to_string(),
                x: PAGE_MARGIN,
                baseline: centered_baseline(
                    BRAND_TITLE_TOP + BRAND_TITLE_HEIGHT,
                    8.0,
                    BRAND_SUBTITLE_SIZE_PT,
                ),
                style: FontStyle::Regular,
                size_pt: BRAND_SUBTITLE_SIZE_PT,
            },
            color: WHITE,
        },
    ]
}

fn title_bar(title: &str) -> Vec<Element> {
    let bottom = TITLE_BAR_TOP + TITLE_BAR_HEIGHT;
    vec![
        Element::Text {
            text: PlacedText {
                text: title.to_string(),
                x: PAGE_MARGIN,
                baseline: centered_baseline(TITLE_BAR_TOP, TITLE_BAR_HEIGHT, TITLE_SIZE_PT),
                style: FontStyle::Bold,
                size_pt: TITLE_SIZE_PT,
            },
            color: BRAND_NAVY,
        },
        Element::Line {
            from: Position::new(PAGE_MARGIN, bottom),
            to: Position::new(PAGE_WIDTH - PAGE_MARGIN, bottom),
            color: BRAND_NAVY,
            width: 0.2,
        },
    ]
}

fn footer(page_number: usize, measure: &dyn TextMeasure) -> Element {
    let text = format!("Page {page_number}");
    let width = measure.text_width(&text, FontStyle::Oblique, FOOTER_SIZE_PT);
    Element::Text {
        text: PlacedText {
            x: (PAGE_WIDTH - width) / 2.0,
            baseline: centered_baseline(FOOTER_TOP, FOOTER_HEIGHT, FOOTER_SIZE_PT),
            text,
            style: FontStyle::Oblique,
            size_pt: FOOTER_SIZE_PT,
        },
        color: FOOTER_GRAY,
    }
}

/// Lays out the work order for `row`. `index` is the row's position in the run, used for naming.
///
/// Rows that would run into the footer move to a new page, which repeats the branding band.
pub fn assemble_document(
    row: &AggregatedRow,
    index: usize,
    config: &ReportConfig,
    measure: &dyn TextMeasure,
) -> WorkOrderDocument {
    let organization = config.display_organization();
    let title = format!("WORK ORDER: {}", row.date);

    let mut pages = Vec::new();
    let mut page = Page {
        elements: branding_band(&organization),
    };
    page.elements.extend(title_bar(&title));

    let first_row_top = TITLE_BAR_TOP + TITLE_BAR_HEIGHT + TITLE_GAP;
    let continuation_top = BAND_HEIGHT + 5.0;
    let mut cursor = Position::new(PAGE_MARGIN, first_row_top);
    let mut page_top = first_row_top;

    for layout in work_order_rows(row) {
        let (mut placement, mut next) = layout_row(cursor, &layout, measure);
        if next.y > FOOTER_TOP && cursor.y > page_top {
            page.elements.push(footer(pages.len() + 1, measure));
            pages.push(std::mem::replace(
                &mut page,
                Page {
                    elements: branding_band(&organization),
                },
            ));
            cursor = Position::new(PAGE_MARGIN, continuation_top);
            page_top = continuation_top;
            (placement, next) = layout_row(cursor, &layout, measure);
        }
        page.elements.push(Element::Row {
            row: placement,
            fill: LABEL_FILL,
            border: BRAND_BLUE,
            text_color: BRAND_NAVY,
        });
        cursor = next;
    }

    page.elements.push(footer(pages.len() + 1, measure));
    pages.push(page);

    WorkOrderDocument {
        name: document_name(row, index),
        title,
        pages,
    }
}
