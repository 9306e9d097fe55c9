use agroreport_core::correction::{AggregatedRow, Correction};
use agroreport_core::document::{assemble_document, WorkOrderDocument};
use agroreport_core::metrics::HelveticaMetrics;
use agroreport_core::render::{encode_win_ansi, render_pdf};
use agroreport_core::{ReportConfig, ReportError};

fn work_order() -> WorkOrderDocument {
    let row = AggregatedRow {
        date: "2024-03-01".to_string(),
        location: "Lote 7, Sector B".to_string(),
        total_area_raw: 7.0,
        total_supply: 27.5,
        total_duration_seconds: 120,
        flight_count: 2,
        corrected_area: 0.7,
        correction: Correction::Scaled,
    };
    assemble_document(&row, 0, &ReportConfig::default(), &HelveticaMetrics)
}

fn contains(haystack: &[u8], needle: &str) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle.as_bytes())
}

#[test]
fn renders_a_pdf_with_standard_fonts() {
    let bytes = render_pdf(&work_order()).expect("render");

    assert!(bytes.starts_with(b"%PDF-"));
    assert!(contains(&bytes, "/Helvetica-Bold"));
    assert!(contains(&bytes, "/WinAnsiEncoding"));
    assert!(contains(&bytes, "WORK ORDER: 2024-03-01"));
    assert!(contains(&bytes, "Lote 7, Sector B"));
    assert!(contains(&bytes, "%%EOF"));
}

#[test]
fn rendering_is_deterministic() {
    let document = work_order();
    let first = render_pdf(&document).expect("first render");
    let second = render_pdf(&document).expect("second render");
    assert_eq!(first, second);
}

#[test]
fn document_without_pages_is_rejected() {
    let document = WorkOrderDocument {
        name: "Reporte_empty.pdf".to_string(),
        title: "WORK ORDER: 2024-03-01".to_string(),
        pages: Vec::new(),
    };
    let err = render_pdf(&document).expect_err("no pages");
    assert!(matches!(err, ReportError::Render(message) if message.contains("Reporte_empty.pdf")));
}

#[test]
fn latin_text_maps_to_win_ansi() {
    assert_eq!(encode_win_ansi("Año"), vec![b'A', 0xF1, b'o']);
    assert_eq!(encode_win_ansi("€5"), vec![0x80, b'5']);
    assert_eq!(encode_win_ansi("北"), vec![b'?']);
}
