use agroreport_core::layout::{
    estimate_line_count, layout_row, row_height, wrap_text, LayoutRow, Position, LABEL_WIDTH,
    LINE_HEIGHT, VALUE_WIDTH, WRAP_THRESHOLD,
};
use agroreport_core::metrics::{FontStyle, HelveticaMetrics, TextMeasure};

/// Every character is one millimetre wide, whatever the font.
struct MillimetrePerChar;

impl TextMeasure for MillimetrePerChar {
    fn text_width(&self, text: &str, _style: FontStyle, _size_pt: f64) -> f64 {
        text.chars().count() as f64
    }
}

#[test]
fn width_of_two_thresholds_needs_two_lines() {
    assert_eq!(estimate_line_count(2.0 * WRAP_THRESHOLD), 2);
    assert_eq!(row_height(2), 2.0 * LINE_HEIGHT);

    let value = "a".repeat((2.0 * WRAP_THRESHOLD) as usize);
    let (placement, _) = layout_row(
        Position::new(10.0, 65.0),
        &LayoutRow::new("LOCATION", value),
        &MillimetrePerChar,
    );
    assert_eq!(placement.line_count, 2);
    assert_eq!(placement.row_height, 2.0 * LINE_HEIGHT);
    assert_eq!(placement.value.lines.len(), 2);
}

#[test]
fn empty_value_still_takes_one_line() {
    assert_eq!(estimate_line_count(0.0), 1);

    let origin = Position::new(10.0, 65.0);
    let (placement, next) = layout_row(origin, &LayoutRow::new("LOCATION", ""), &MillimetrePerChar);
    assert_eq!(placement.line_count, 1);
    assert_eq!(placement.row_height, LINE_HEIGHT);
    assert!(placement.value.lines.is_empty());
    assert_eq!(next, Position::new(10.0, 65.0 + LINE_HEIGHT));
}

#[test]
fn partial_line_rounds_up() {
    assert_eq!(estimate_line_count(WRAP_THRESHOLD + 0.01), 2);
    assert_eq!(estimate_line_count(WRAP_THRESHOLD), 1);
}

#[test]
fn unit_is_appended_after_a_space() {
    let row = LayoutRow::new("TOTAL AREA", "0.70").with_unit("Hectares");
    assert_eq!(row.display_value(), "0.70 Hectares");
    assert_eq!(LayoutRow::new("FLIGHT COUNT", "2").display_value(), "2");
    assert_eq!(LayoutRow::new("X", "2").with_unit("").display_value(), "2");
}

#[test]
fn both_cells_share_the_row_height_and_top() {
    let value = "word ".repeat(60);
    let origin = Position::new(10.0, 100.0);
    let (placement, next) = layout_row(origin, &LayoutRow::new("LOCATION", value), &MillimetrePerChar);

    assert!(placement.line_count > 1);
    assert_eq!(placement.label.rect.height, placement.row_height);
    assert_eq!(placement.value.rect.height, placement.row_height);
    assert_eq!(placement.label.rect.y, origin.y);
    assert_eq!(placement.value.rect.y, origin.y);
    assert_eq!(placement.label.rect.width, LABEL_WIDTH);
    assert_eq!(placement.value.rect.x, origin.x + LABEL_WIDTH);
    assert_eq!(placement.value.rect.width, VALUE_WIDTH);
    assert!(placement.label.filled);
    assert!(!placement.value.filled);
    assert_eq!(placement.label.lines[0].style, FontStyle::Bold);
    assert_eq!(next.y, origin.y + placement.row_height);
}

#[test]
fn rows_stack_flush() {
    let first = LayoutRow::new("LOCATION", "x".repeat(300));
    let second = LayoutRow::new("FLIGHT COUNT", "2");

    let (a, after_first) = layout_row(Position::new(10.0, 65.0), &first, &MillimetrePerChar);
    let (b, after_second) = layout_row(after_first, &second, &MillimetrePerChar);

    assert_eq!(a.line_count, 3);
    assert_eq!(b.label.rect.y, a.label.rect.bottom());
    assert_eq!(after_second.y, 65.0 + 4.0 * LINE_HEIGHT);
}

#[test]
fn wrapped_lines_never_exceed_threshold() {
    let text = "Parcela norte del establecimiento La Esperanza, lote 14 y cabecera sur junto al canal principal de riego";
    let lines = wrap_text(text, WRAP_THRESHOLD, FontStyle::Regular, 11.0, &HelveticaMetrics);

    assert!(lines.len() >= 2);
    for line in &lines {
        assert!(HelveticaMetrics.text_width(line, FontStyle::Regular, 11.0) <= WRAP_THRESHOLD);
    }
    assert_eq!(lines.join(" "), text);
}

#[test]
fn word_wrapping_can_raise_the_estimate() {
    // Two full words fit two lines; three words that each leave a gap need a third.
    let value = format!("{} {}", "a".repeat(120), "b".repeat(125));
    let estimate = estimate_line_count(MillimetrePerChar.text_width(&value, FontStyle::Regular, 11.0));
    let (placement, _) = layout_row(Position::new(10.0, 65.0), &LayoutRow::new("L", value), &MillimetrePerChar);

    assert_eq!(estimate, 2);
    assert_eq!(placement.line_count, 2);
    assert_eq!(placement.value.lines.len(), 2);

    let value = format!("{} {} {}", "a".repeat(100), "b".repeat(100), "c".repeat(40));
    let estimate = estimate_line_count(MillimetrePerChar.text_width(&value, FontStyle::Regular, 11.0));
    let (placement, _) = layout_row(Position::new(10.0, 65.0), &LayoutRow::new("L", value), &MillimetrePerChar);
    assert_eq!(estimate, 2);
    assert_eq!(placement.line_count, 3);
    assert_eq!(placement.row_height, 3.0 * LINE_HEIGHT);
}

#[test]
fn long_tokens_break_between_characters() {
    let lines = wrap_text(&"z".repeat(260), WRAP_THRESHOLD, FontStyle::Regular, 11.0, &MillimetrePerChar);
    let lengths: Vec<usize> = lines.iter().map(|line| line.len()).collect();
    assert_eq!(lengths, [125, 125, 10]);
}
