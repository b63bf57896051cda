use crate::canopy_pipeline::coverage::CoverageResult;
use crate::canopy_pipeline::export::{CsvReportWriter, ReportWriter, encode_mask_png, mask_to_luma};
use crate::canopy_pipeline::segmentation::Mask;

fn result(label: &str, pixel_count: u64) -> CoverageResult {
    CoverageResult {
        label: label.to_string(),
        pixel_count,
        area_cm2: pixel_count as f64 / 4096.0,
    }
}

fn write_csv(results: &[CoverageResult]) -> String {
    let mut output = Vec::new();
    CsvReportWriter.write_report(results, &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_csv_report_rows_in_result_order() {
    let csv = write_csv(&[result("b.png", 2048), result("a.png", 1024)]);

    assert_eq!(
        csv,
        "Image Name,Canopy Coverage (cm²)\nb.png,0.5\na.png,0.25\n"
    );
}

#[test]
fn test_csv_report_quotes_labels_with_commas() {
    let csv = write_csv(&[result("day 1, tray 2.jpg", 4096)]);

    assert_eq!(csv.lines().nth(1), Some("\"day 1, tray 2.jpg\",1.0"));
}

#[test]
fn test_empty_csv_report_keeps_header() {
    assert_eq!(write_csv(&[]), "Image Name,Canopy Coverage (cm²)\n");
}

#[test]
fn test_mask_png_decodes_to_same_mask() {
    let mask = Mask {
        width: 3,
        height: 2,
        data: vec![true, false, false, true, true, false],
    };

    let png = encode_mask_png(&mask).unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_luma8();

    assert_eq!(decoded.dimensions(), (3, 2));
    assert_eq!(decoded.into_raw(), mask_to_luma(&mask));
    assert_eq!(mask_to_luma(&mask), [255, 0, 0, 255, 255, 0]);
}
