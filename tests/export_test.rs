//! PDF出力の統合テスト

use image::{Rgb, RgbImage};
use poster_tiler::export::{self, pdf, ExportOptions};
use poster_tiler::source::SourceImage;
use poster_tiler_common::paper::{A3, A4, LETTER};
use poster_tiler_common::{plan, GridSpec, LayoutPlan, PaperSize, RasterTarget};
use printpdf::{PdfDocument, PdfParseOptions};
use tempfile::tempdir;

fn create_test_source(w: u32, h: u32) -> SourceImage {
    let pixels = RgbImage::from_fn(w, h, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
    SourceImage::from_rgb(pixels).expect("テスト画像の作成に失敗")
}

fn fast_options() -> ExportOptions {
    ExportOptions {
        dpi: 30.0,
        jpeg_quality: 80,
        ..ExportOptions::default()
    }
}

fn create_plan(source: &SourceImage, grid: &str) -> LayoutPlan {
    plan(source.dims(), A4, grid.parse::<GridSpec>().unwrap()).unwrap()
}

fn parse_pdf(bytes: &[u8]) -> PdfDocument {
    let mut warnings = Vec::new();
    PdfDocument::parse(bytes, &PdfParseOptions::default(), &mut warnings).expect("PDF解析に失敗")
}

fn page_text(doc: &PdfDocument, index: usize) -> String {
    doc.pages[index].extract_text(&doc.resources).join(" ")
}

fn assert_page_size(doc: &PdfDocument, paper: PaperSize) {
    let width = pdf::mm_to_pt(paper.width_mm);
    let height = pdf::mm_to_pt(paper.height_mm);
    for (i, page) in doc.pages.iter().enumerate() {
        assert!((page.media_box.width.0 - width).abs() < 0.1, "page {} width", i);
        assert!((page.media_box.height.0 - height).abs() < 0.1, "page {} height", i);
    }
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn test_pdf_generation() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source = create_test_source(400, 300);
    let plan = create_plan(&source, "2x2");
    let output_path = dir.path().join("poster.pdf");

    let result = export::export_pdf(&source, &plan, &fast_options(), &output_path);
    assert!(result.is_ok(), "PDF生成に失敗: {:?}", result.err());
    assert!(output_path.exists(), "PDFファイルが作成されていない");

    let bytes = std::fs::read(&output_path).expect("PDF読み込み失敗");
    assert!(bytes.starts_with(b"%PDF"), "PDFヘッダがない");
    assert!(!dir.path().join("poster.pdf.part").exists(), "一時ファイルが残っている");
}

#[test]
fn test_pdf_for_every_paper_size() {
    let source = create_test_source(120, 200);
    for paper in [A4, LETTER, A3] {
        let plan = plan(source.dims(), paper, GridSpec::new(1, 2).unwrap()).unwrap();
        let bytes = pdf::build_pdf(&source, &plan, &fast_options());
        assert!(bytes.is_ok(), "PDF生成({})に失敗: {:?}", paper.label, bytes.err());
        assert!(!bytes.unwrap().is_empty());
    }
}

#[test]
fn test_pdf_with_blank_margin_pages() {
    // 横長画像を縦3段: 上下は白紙ページになるが出力は成功する
    let source = create_test_source(600, 100);
    let plan = create_plan(&source, "1x2");
    let clips = plan.clips();
    assert!(clips.iter().all(|(_, c)| c.is_some()));

    let plan = poster_tiler_common::plan(source.dims(), A4, GridSpec::new(1, 3).unwrap()).unwrap();
    assert!(plan.clips()[0].1.is_none());
    assert!(pdf::build_pdf(&source, &plan, &fast_options()).is_ok());
}

#[test]
fn test_default_filename_in_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source = create_test_source(64, 64);
    let plan = create_plan(&source, "1x1");
    let options = fast_options();

    let path = export::resolve_output_path(Some(dir.path()), plan.grid, export::export_date(&options.generated_at));
    export::export_pdf(&source, &plan, &options, &path).expect("PDF生成に失敗");

    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("poster_1x1_"));
    assert!(name.ends_with(".pdf"));
    assert!(path.exists());
}

#[test]
fn test_failed_export_leaves_nothing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source = create_test_source(64, 64);
    let plan = create_plan(&source, "2x2");
    let output_path = dir.path().join("broken.pdf");

    let options = ExportOptions { dpi: 0.0, ..fast_options() };
    assert!(export::export_pdf(&source, &plan, &options, &output_path).is_err());
    assert!(!output_path.exists());
    assert!(!dir.path().join("broken.pdf.part").exists());
}

#[test]
fn test_unwritable_target_leaves_nothing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source = create_test_source(64, 64);
    let plan = create_plan(&source, "1x1");

    // 親が通常ファイルなので書き込めない
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "x").unwrap();
    let output_path = blocker.join("poster.pdf");

    assert!(export::export_pdf(&source, &plan, &fast_options(), &output_path).is_err());
    assert!(!output_path.exists());
}

#[test]
fn test_pdf_pages_in_row_major_order() {
    let source = create_test_source(300, 200);
    let plan = create_plan(&source, "3x2");
    let bytes = pdf::build_pdf(&source, &plan, &fast_options()).expect("PDF生成に失敗");
    let doc = parse_pdf(&bytes);

    // 表紙 + 6ページ
    assert_eq!(doc.pages.len(), 7);
    assert_page_size(&doc, A4);
    assert!(page_text(&doc, 0).contains("POSTER CONFIGURATION"));
    for (i, (cell, _)) in plan.clips().iter().enumerate() {
        let text = page_text(&doc, i + 1);
        assert_eq!(cell.sequence as usize, i + 1);
        assert!(text.contains(&format!("{}/6", i + 1)), "page {}: {:?}", i + 1, text);
    }
}

#[test]
fn test_pdf_page_size_follows_paper() {
    let source = create_test_source(200, 300);
    let plan = plan(source.dims(), A3, GridSpec::new(2, 1).unwrap()).unwrap();
    let doc = parse_pdf(&pdf::build_pdf(&source, &plan, &fast_options()).unwrap());
    assert_eq!(doc.pages.len(), 3);
    assert_page_size(&doc, A3);
}

#[test]
fn test_tiles_embedded_at_requested_resolution() {
    // 2MBを超えるラスタでも縮小されずに埋め込まれる
    let source = create_test_source(400, 300);
    let plan = create_plan(&source, "1x1");
    let options = ExportOptions { dpi: 150.0, ..fast_options() };
    let target = RasterTarget::print(A4, options.dpi).unwrap();
    assert!(target.width_px as usize * target.height_px as usize * 3 > 2 * 1024 * 1024);

    let bytes = pdf::build_pdf(&source, &plan, &options).expect("PDF生成に失敗");
    let width = format!("/Width {}", target.width_px);
    let height = format!("/Height {}", target.height_px);
    assert!(contains_bytes(&bytes, width.as_bytes()), "{} が見つからない", width);
    assert!(contains_bytes(&bytes, height.as_bytes()), "{} が見つからない", height);
}

#[test]
fn test_jpeg_quality_changes_output_size() {
    let noise = RgbImage::from_fn(400, 300, |x, y| {
        let v = ((x * 7919 + y * 104_729) % 251) as u8;
        Rgb([v, v.wrapping_mul(3), v.wrapping_add(97)])
    });
    let source = SourceImage::from_rgb(noise).unwrap();
    let plan = create_plan(&source, "1x1");
    let low = pdf::build_pdf(&source, &plan, &ExportOptions { jpeg_quality: 10, ..fast_options() }).unwrap();
    let high = pdf::build_pdf(&source, &plan, &ExportOptions { jpeg_quality: 100, ..fast_options() }).unwrap();
    assert!(high.len() > low.len() * 2, "low={} high={}", low.len(), high.len());
}
