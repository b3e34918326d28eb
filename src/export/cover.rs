//! 表紙ページ（ポスター情報 + サムネイル）

use super::pdf::{gray, mm_to_pt, pdf_point, place_image, text_ops};
use super::ExportOptions;
use poster_tiler_common::{PaperSize, Summary, SummaryLine};
use printpdf::{BuiltinFont, Line, LinePoint, Op, Pt, XObjectId};

// レイアウト（ページ上端からのmm）
const TITLE_Y_MM: f64 = 40.0;
const SUBTITLE_Y_MM: f64 = 55.0;
const RULE_Y_MM: f64 = 70.0;
const INFO_START_Y_MM: f64 = 85.0;
const LINE_HEIGHT_MM: f64 = 7.0;
const LEFT_MM: f64 = 20.0;

const THUMB_MAX_MM: f64 = 60.0;
const THUMB_MIN_MM: f64 = 20.0;
const THUMB_GAP_MM: f64 = 6.0;
/// サムネイル下端からページ下端までに確保する余白（ラベル + フッター）
const THUMB_BOTTOM_RESERVE_MM: f64 = 22.0;
const FOOTER_BASELINE_MM: f64 = 8.0;

pub const SUBTITLE: &str = "Poster technical information";
pub const THUMB_LABEL: &str = "Image preview";
pub const FOOTER: &str = "Generated with poster-tiler";

/// Helvetica の平均文字幅（em）による概算幅（mm）
fn approx_text_width_mm(text: &str, size_pt: f32) -> f64 {
    text.chars().count() as f64 * size_pt as f64 * 0.5 * 25.4 / 72.0
}

fn centered_text(text: &str, y_mm: f64, size_pt: f32, font: BuiltinFont, level: f32, paper: PaperSize) -> Vec<Op> {
    let x_mm = (paper.width_mm - approx_text_width_mm(text, size_pt)) / 2.0;
    text_ops(text, pdf_point(x_mm.max(0.0), y_mm, paper.height_mm), size_pt, font, gray(level))
}

fn outline(points: &[(f64, f64)], closed: bool, paper: PaperSize) -> Op {
    Op::DrawLine {
        line: Line {
            points: points
                .iter()
                .map(|&(x, y)| LinePoint { p: pdf_point(x, y, paper.height_mm), bezier: false })
                .collect(),
            is_closed: closed,
        },
    }
}

/// サムネイル枠の一辺（mm）。本文の下に収まらなければ None。
pub fn thumbnail_size_mm(text_end_mm: f64, paper: PaperSize) -> Option<f64> {
    let top = text_end_mm + THUMB_GAP_MM;
    let available = paper.height_mm - THUMB_BOTTOM_RESERVE_MM - top;
    let size = available.min(THUMB_MAX_MM);
    (size >= THUMB_MIN_MM).then_some(size)
}

/// 情報欄の最終行の次の位置（mm）
pub fn info_end_mm(lines: &[SummaryLine]) -> f64 {
    // 日時2行 + 空行
    let mut y = INFO_START_Y_MM + LINE_HEIGHT_MM * 2.5;
    for line in lines {
        y += match line {
            SummaryLine::Blank => LINE_HEIGHT_MM * 0.5,
            _ => LINE_HEIGHT_MM,
        };
    }
    y
}

pub fn cover_ops(
    summary: &Summary,
    paper: PaperSize,
    options: &ExportOptions,
    thumbnail: XObjectId,
    thumbnail_px: u32,
) -> Vec<Op> {
    let mut ops = Vec::new();

    ops.extend(centered_text(&options.title, TITLE_Y_MM, 24.0, BuiltinFont::Helvetica, 40.0 / 255.0, paper));
    ops.extend(centered_text(SUBTITLE, SUBTITLE_Y_MM, 16.0, BuiltinFont::Helvetica, 100.0 / 255.0, paper));

    ops.push(Op::SaveGraphicsState);
    ops.push(Op::SetOutlineColor { col: gray(200.0 / 255.0) });
    ops.push(Op::SetOutlineThickness { pt: Pt(0.5) });
    ops.push(outline(&[(LEFT_MM, RULE_Y_MM), (paper.width_mm - LEFT_MM, RULE_Y_MM)], false, paper));
    ops.push(Op::RestoreGraphicsState);

    // 情報欄
    let body = 60.0 / 255.0;
    let generated = options.generated_at;
    let mut y = INFO_START_Y_MM;
    for text in [
        format!("Created on: {}", generated.format("%Y-%m-%d")),
        format!("Created at: {}", generated.format("%H:%M:%S")),
    ] {
        ops.extend(text_ops(&text, pdf_point(LEFT_MM, y, paper.height_mm), 12.0, BuiltinFont::Helvetica, gray(body)));
        y += LINE_HEIGHT_MM;
    }
    y += LINE_HEIGHT_MM * 0.5;

    let lines = summary.cover_lines();
    for line in &lines {
        let pos = pdf_point(LEFT_MM, y, paper.height_mm);
        match line {
            SummaryLine::Blank => {
                y += LINE_HEIGHT_MM * 0.5;
                continue;
            }
            SummaryLine::Heading(text) => {
                ops.extend(text_ops(text, pos, 12.0, BuiltinFont::HelveticaBold, gray(body)));
            }
            SummaryLine::Bullet(text) => {
                ops.extend(text_ops(&format!("- {}", text), pos, 12.0, BuiltinFont::Helvetica, gray(body)));
            }
        }
        y += LINE_HEIGHT_MM;
    }

    if let Some(size) = thumbnail_size_mm(y, paper) {
        let left = (paper.width_mm - size) / 2.0;
        let top = y + THUMB_GAP_MM;
        let bottom = top + size;

        ops.push(place_image(
            thumbnail,
            thumbnail_px,
            thumbnail_px,
            pdf_point(left, bottom, paper.height_mm),
            mm_to_pt(size),
            mm_to_pt(size),
        ));

        ops.push(Op::SaveGraphicsState);
        ops.push(Op::SetOutlineColor { col: gray(150.0 / 255.0) });
        ops.push(Op::SetOutlineThickness { pt: Pt(0.5) });
        ops.push(outline(
            &[(left, top), (left + size, top), (left + size, bottom), (left, bottom)],
            true,
            paper,
        ));
        ops.push(Op::RestoreGraphicsState);

        ops.extend(centered_text(THUMB_LABEL, bottom + 8.0, 10.0, BuiltinFont::Helvetica, 100.0 / 255.0, paper));
    } else {
        tracing::debug!(text_end_mm = y, "表紙にサムネイルを置く余白がありません");
    }

    ops.extend(centered_text(
        FOOTER,
        paper.height_mm - FOOTER_BASELINE_MM,
        8.0,
        BuiltinFont::Helvetica,
        150.0 / 255.0,
        paper,
    ));

    ops
}
