// crates/agroreport-core/src/layout.rs

//! Two-cell label/value rows with height driven by the wrapped value text.
//!
//! Coordinates are millimetres from the top-left corner of the page. Nothing here draws; the
//! functions return placements that the renderer turns into page content.

use serde::{Deserialize, Serialize};

use crate::metrics::{points_to_mm, FontStyle, TextMeasure};

pub const PAGE_WIDTH: f64 = 210.0;
pub const PAGE_HEIGHT: f64 = 297.0;
pub const PAGE_MARGIN: f64 = 10.0;

pub const LABEL_WIDTH: f64 = 60.0;
pub const VALUE_WIDTH: f64 = PAGE_WIDTH - 2.0 * PAGE_MARGIN - LABEL_WIDTH;
/// Widest value line before wrapping; narrower than the cell so text keeps off the border.
pub const WRAP_THRESHOLD: f64 = 125.0;
pub const LINE_HEIGHT: f64 = 12.0;
/// Horizontal inset of text inside a bordered cell.
pub const CELL_PADDING: f64 = 1.0;
pub const ROW_FONT_SIZE_PT: f64 = 11.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// One label/value pair of a work order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutRow {
    pub label: String,
    pub value: String,
    pub unit: Option<String>,
}

impl LayoutRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            unit: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Value as printed: `value unit`, or just `value` when there is no unit.
    pub fn display_value(&self) -> String {
        match self.unit.as_deref().map(str::trim).filter(|unit| !unit.is_empty()) {
            Some(unit) => format!("{} {}", self.value, unit),
            None => self.value.clone(),
        }
    }
}

/// A run of text with its left edge and baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedText {
    pub text: String,
    pub x: f64,
    pub baseline: f64,
    pub style: FontStyle,
    pub size_pt: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellPlacement {
    pub rect: Rect,
    pub filled: bool,
    pub lines: Vec<PlacedText>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowPlacement {
    pub label: CellPlacement,
    pub value: CellPlacement,
    pub line_count: usize,
    pub row_height: f64,
}

/// Line estimate from total text width: `ceil(width / WRAP_THRESHOLD)`, never below one.
pub fn estimate_line_count(measured_width: f64) -> usize {
    let lines = (measured_width / WRAP_THRESHOLD).ceil();
    if lines.is_finite() && lines > 1.0 {
        lines as usize
    } else {
        1
    }
}

pub fn row_height(line_count: usize) -> f64 {
    line_count.max(1) as f64 * LINE_HEIGHT
}

/// Baseline that vertically centres text of `size_pt` in a band starting at `top`.
pub fn centered_baseline(top: f64, band_height: f64, size_pt: f64) -> f64 {
    top + 0.5 * band_height + 0.3 * points_to_mm(size_pt)
}

/// Greedy word wrap at `max_width`. Words wider than a whole line are split between characters.
pub fn wrap_text(
    text: &str,
    max_width: f64,
    style: FontStyle,
    size_pt: f64,
    measure: &dyn TextMeasure,
) -> Vec<String> {
    let fits = |candidate: &str| measure.text_width(candidate, style, size_pt) <= max_width;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if fits(&candidate) {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if fits(word) {
            current = word.to_string();
            continue;
        }

        for ch in word.chars() {
            let mut extended = current.clone();
            extended.push(ch);
            if current.is_empty() || fits(&extended) {
                current = extended;
            } else {
                lines.push(std::mem::replace(&mut current, ch.to_string()));
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Places one label/value row with its top-left corner at `origin`.
///
/// Both cells get the same height: the estimated line count of the value text, raised to the
/// number of lines the text actually wraps into when that is larger. The returned position is
/// exactly one row height below `origin`, so the next row starts flush under this one.
pub fn layout_row(
    origin: Position,
    row: &LayoutRow,
    measure: &dyn TextMeasure,
) -> (RowPlacement, Position) {
    let display = row.display_value();
    let measured = measure.text_width(&display, FontStyle::Regular, ROW_FONT_SIZE_PT);
    let wrapped = wrap_text(
        &display,
        WRAP_THRESHOLD,
        FontStyle::Regular,
        ROW_FONT_SIZE_PT,
        measure,
    );
    let line_count = estimate_line_count(measured).max(wrapped.len());
    let height = row_height(line_count);

    let label_rect = Rect::new(origin.x, origin.y, LABEL_WIDTH, height);
    let label = CellPlacement {
        rect: label_rect,
        filled: true,
        lines: vec![PlacedText {
            text: row.label.clone(),
            x: label_rect.x + CELL_PADDING,
            baseline: centered_baseline(label_rect.y, height, ROW_FONT_SIZE_PT),
            style: FontStyle::Bold,
            size_pt: ROW_FONT_SIZE_PT,
        }],
    };

    let value_rect = Rect::new(label_rect.right(), origin.y, VALUE_WIDTH, height);
    let value = CellPlacement {
        rect: value_rect,
        filled: false,
        lines: wrapped
            .into_iter()
            .enumerate()
            .map(|(idx, text)| PlacedText {
                text,
                x: value_rect.x + CELL_PADDING,
                baseline: centered_baseline(
                    value_rect.y + idx as f64 * LINE_HEIGHT,
                    LINE_HEIGHT,
                    ROW_FONT_SIZE_PT,
                ),
                style: FontStyle::Regular,
                size_pt: ROW_FONT_SIZE_PT,
            })
            .collect(),
    };

    let next = Position::new(origin.x, origin.y + height);
    (
        RowPlacement {
            label,
            value,
            line_count,
            row_height: height,
        },
        next,
    )
}
