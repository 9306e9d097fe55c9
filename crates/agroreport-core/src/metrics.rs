//! Text measurement for the built-in PDF fonts.

use serde::{Deserialize, Serialize};

pub const POINTS_PER_MM: f64 = 72.0 / 25.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontStyle {
    Regular,
    Bold,
    Oblique,
}

impl FontStyle {
    pub fn base_font(&self) -> &'static str {
        match self {
            FontStyle::Regular => "Helvetica",
            FontStyle::Bold => "Helvetica-Bold",
            FontStyle::Oblique => "Helvetica-Oblique",
        }
    }
}

pub fn points_to_mm(points: f64) -> f64 {
    points / POINTS_PER_MM
}

pub fn mm_to_points(mm: f64) -> f64 {
    mm * POINTS_PER_MM
}

pub trait TextMeasure {
    /// Width of `text` in millimetres when set in `style` at `size_pt`.
    fn text_width(&self, text: &str, style: FontStyle, size_pt: f64) -> f64;
}

/// Advance widths (1/1000 em) for printable ASCII, from the Adobe core font metrics.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

/// Width used for characters outside printable ASCII (accented Latin letters are close to it).
const FALLBACK_WIDTH: u16 = 556;

/// Metrics for the Helvetica family, which every PDF viewer provides without embedding.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelveticaMetrics;

impl HelveticaMetrics {
    fn char_width(ch: char, style: FontStyle) -> u16 {
        let table = match style {
            FontStyle::Bold => &HELVETICA_BOLD_WIDTHS,
            FontStyle::Regular | FontStyle::Oblique => &HELVETICA_WIDTHS,
        };
        match ch {
            ' '..='~' => table[ch as usize - 0x20],
            _ => FALLBACK_WIDTH,
        }
    }
}

impl TextMeasure for HelveticaMetrics {
    fn text_width(&self, text: &str, style: FontStyle, size_pt: f64) -> f64 {
        let units: u32 = text
            .chars()
            .map(|ch| u32::from(Self::char_width(ch, style)))
            .sum();
        points_to_mm(f64::from(units) * size_pt / 1000.0)
    }
}
