use super::cover;
use super::ExportOptions;
use crate::error::{PosterError, Result};
use crate::raster;
use crate::source::SourceImage;
use image::RgbImage;
use indicatif::{ProgressBar, ProgressStyle};
use poster_tiler_common::{LayoutPlan, RasterTarget, Summary};
use printpdf::{
    BuiltinFont, Color, ImageCompression, ImageOptimizationOptions, Mm, Op, PdfDocument, PdfPage,
    PdfSaveOptions, Point, Pt, RawImage, RawImageData, RawImageFormat, Rgb, TextItem, XObjectId,
    XObjectTransform,
};
use rayon::prelude::*;

/// 表紙サムネイルのラスタサイズ（px）
pub const THUMBNAIL_PX: u32 = 200;

/// ページ番号スタンプ位置（ページ左上から、mm）
const STAMP_X_MM: f64 = 5.0;
const STAMP_BASELINE_MM: f64 = 15.0;
const STAMP_SIZE_PT: f32 = 12.0;
const STAMP_GRAY: f32 = 0.3;

/// mm → pt 変換
#[inline]
pub fn mm_to_pt(mm: f64) -> f32 {
    (mm * 72.0 / 25.4) as f32
}

/// ページ左上基準のmm座標をPDF座標（左下原点、pt）に変換
pub fn pdf_point(x_mm: f64, y_from_top_mm: f64, page_height_mm: f64) -> Point {
    Point {
        x: Pt(mm_to_pt(x_mm)),
        y: Pt(mm_to_pt(page_height_mm - y_from_top_mm)),
    }
}

pub fn gray(level: f32) -> Color {
    Color::Rgb(Rgb { r: level, g: level, b: level, icc_profile: None })
}

/// テキスト1行を描画するオペレーション
pub fn text_ops(
    text: &str,
    pos: Point,
    size_pt: f32,
    font: BuiltinFont,
    color: Color,
) -> Vec<Op> {
    vec![
        Op::SaveGraphicsState,
        Op::SetFillColor { col: color },
        Op::StartTextSection,
        Op::SetTextCursor { pos },
        Op::SetFontSizeBuiltinFont { size: Pt(size_pt), font },
        Op::WriteTextBuiltinFont { items: vec![TextItem::Text(text.to_string())], font },
        Op::EndTextSection,
        Op::RestoreGraphicsState,
    ]
}

/// 画像XObjectを指定矩形（左下原点、pt）に配置
pub fn place_image(id: XObjectId, width_px: u32, height_px: u32, origin: Point, width_pt: f32, height_pt: f32) -> Op {
    // dpi=72 なら 1px = 1pt
    Op::UseXobject {
        id,
        transform: XObjectTransform {
            translate_x: Some(origin.x),
            translate_y: Some(origin.y),
            scale_x: Some(width_pt / width_px as f32),
            scale_y: Some(height_pt / height_px as f32),
            dpi: Some(72.0),
            ..Default::default()
        },
    }
}

/// ラスタをそのままPDF画像にする（圧縮は保存時に一度だけ）
fn to_pdf_image(raster: RgbImage) -> RawImage {
    let (width, height) = raster.dimensions();
    RawImage {
        pixels: RawImageData::U8(raster.into_raw()),
        width: width as usize,
        height: height as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    }
}

/// 保存設定。縮小はせず、指定品質のJPEGで埋め込む。
pub fn save_options(jpeg_quality: u8) -> PdfSaveOptions {
    PdfSaveOptions {
        image_optimization: Some(ImageOptimizationOptions {
            quality: Some(f32::from(jpeg_quality.clamp(1, 100)) / 100.0),
            max_image_size: None,
            dither_greyscale: Some(false),
            convert_to_greyscale: Some(false),
            auto_optimize: Some(false),
            format: Some(ImageCompression::Jpeg),
        }),
        ..PdfSaveOptions::default()
    }
}

fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::with_template("  {spinner} [{bar:30}] {pos}/{len} ページ描画中")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    pb.set_style(style);
    pb
}

/// 表紙 + 各タイルページのPDFをメモリ上に生成
pub fn build_pdf(source: &SourceImage, plan: &LayoutPlan, options: &ExportOptions) -> Result<Vec<u8>> {
    let paper = plan.paper;
    let target = RasterTarget::print(paper, options.dpi)?;
    let total = plan.page_count();
    tracing::info!(
        pages = total,
        width_px = target.width_px,
        height_px = target.height_px,
        dpi = options.dpi,
        "PDF生成開始"
    );

    let clips = plan.clips();
    let pb = progress_bar(clips.len(), options.progress);

    // 各ページは独立に描画できる。collect は元の順序（行優先）を保つ。
    let tiles: Vec<RawImage> = clips
        .par_iter()
        .map(|(cell, region)| {
            let raster = raster::composite(source.pixels(), region.as_ref(), target);
            tracing::debug!(sequence = cell.sequence, empty = region.is_none(), "タイル描画");
            pb.inc(1);
            to_pdf_image(raster)
        })
        .collect();
    pb.finish_and_clear();

    let mut doc = PdfDocument::new(&options.title);
    let width_pt = mm_to_pt(paper.width_mm);
    let height_pt = mm_to_pt(paper.height_mm);

    let thumb = raster::thumbnail(source.pixels(), THUMBNAIL_PX);
    let thumb_id = doc.add_image(&to_pdf_image(thumb));
    let summary = Summary::from_plan(plan);
    let cover_ops = cover::cover_ops(&summary, paper, options, thumb_id, THUMBNAIL_PX);

    let mut pages = Vec::with_capacity(total + 1);
    pages.push(PdfPage::new(Mm(paper.width_mm as f32), Mm(paper.height_mm as f32), cover_ops));

    for ((cell, _), tile) in clips.iter().zip(tiles) {
        let id = doc.add_image(&tile);
        let origin = Point { x: Pt(0.0), y: Pt(0.0) };

        let mut ops = vec![place_image(id, target.width_px, target.height_px, origin, width_pt, height_pt)];
        ops.extend(text_ops(
            &format!("{}/{}", cell.sequence, total),
            pdf_point(STAMP_X_MM, STAMP_BASELINE_MM, paper.height_mm),
            STAMP_SIZE_PT,
            BuiltinFont::Helvetica,
            gray(STAMP_GRAY),
        ));
        pages.push(PdfPage::new(Mm(paper.width_mm as f32), Mm(paper.height_mm as f32), ops));
    }

    let mut warnings = Vec::new();
    let bytes = doc.with_pages(pages).save(&save_options(options.jpeg_quality), &mut warnings);
    if !warnings.is_empty() {
        tracing::debug!(count = warnings.len(), "PDF保存時の警告");
    }
    if bytes.is_empty() {
        return Err(PosterError::PdfGeneration("PDFの出力が空です".into()));
    }

    Ok(bytes)
}
