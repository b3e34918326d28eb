//! ポスター情報のサマリー
//!
//! 画面表示（`Display`）と表紙ページ（`cover_lines`）の両方で使う。

use crate::error::Result;
use crate::layout::LayoutPlan;
use serde::Serialize;
use std::fmt;

/// 実効解像度の算出に使う基準DPI
pub const REFERENCE_DPI: f64 = 300.0;

/// レイアウトから導出される表示用の値
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_pages: usize,
    pub grid: String,
    pub cols: u32,
    pub rows: u32,
    pub paper_label: String,
    pub paper_width_mm: f64,
    pub paper_height_mm: f64,
    /// 仕上がりサイズ（cm、整数に丸め）
    pub poster_width_cm: i64,
    pub poster_height_cm: i64,
    pub print_area_width_cm: f64,
    pub print_area_height_cm: f64,
    /// ポスター上の画像サイズ（cm）
    pub image_width_cm: f64,
    pub image_height_cm: f64,
    pub original_width_px: u32,
    pub original_height_px: u32,
    pub aspect_ratio: f64,
    pub scale_percent: f64,
    pub effective_dpi: f64,
}

/// 表紙の情報欄1行
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryLine {
    Heading(String),
    Bullet(String),
    Blank,
}

impl Summary {
    pub fn from_plan(plan: &LayoutPlan) -> Self {
        let image = plan.image;
        Self {
            total_pages: plan.page_count(),
            grid: plan.grid.to_string(),
            cols: plan.grid.cols,
            rows: plan.grid.rows,
            paper_label: plan.paper.label.to_string(),
            paper_width_mm: plan.paper.width_mm,
            paper_height_mm: plan.paper.height_mm,
            poster_width_cm: (plan.poster_width_mm / 10.0).round() as i64,
            poster_height_cm: (plan.poster_height_mm / 10.0).round() as i64,
            print_area_width_cm: plan.poster_width_mm / 10.0,
            print_area_height_cm: plan.poster_height_mm / 10.0,
            image_width_cm: plan.scaled_width_mm() / 10.0,
            image_height_cm: plan.scaled_height_mm() / 10.0,
            original_width_px: image.width_px,
            original_height_px: image.height_px,
            aspect_ratio: image.width_px as f64 / image.height_px as f64,
            scale_percent: plan.scale * 100.0,
            effective_dpi: plan.scale * REFERENCE_DPI,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 表紙ページに並べる情報（見出し・項目・空行）
    pub fn cover_lines(&self) -> Vec<SummaryLine> {
        use SummaryLine::{Blank, Bullet, Heading};

        vec![
            Heading("POSTER CONFIGURATION:".into()),
            Bullet(format!("Selected grid: {} x {}", self.cols, self.rows)),
            Bullet(format!("Total pages: {}", self.total_pages)),
            Bullet(format!("Paper format: {}", self.paper_label)),
            Bullet(format!("Paper size: {} x {} mm", self.paper_width_mm, self.paper_height_mm)),
            Blank,
            Heading("FINAL DIMENSIONS:".into()),
            Bullet(format!("Total poster size: {} x {} cm", self.poster_width_cm, self.poster_height_cm)),
            Bullet(format!(
                "Total print area: {:.1} x {:.1} cm",
                self.print_area_width_cm, self.print_area_height_cm
            )),
            Blank,
            Heading("ORIGINAL IMAGE:".into()),
            Bullet(format!(
                "Resolution: {} x {} pixels",
                self.original_width_px, self.original_height_px
            )),
            Bullet(format!("Aspect ratio: {:.2}:1", self.aspect_ratio)),
            Blank,
            Heading("IMAGE ON POSTER:".into()),
            Bullet(format!("Scaled size: {:.1} x {:.1} cm", self.image_width_cm, self.image_height_cm)),
            Bullet(format!("Applied scale factor: {:.1}%", self.scale_percent)),
            Bullet(format!("Effective resolution: {:.0} DPI", self.effective_dpi)),
        ]
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total pages: {}", self.total_pages)?;
        writeln!(f, "Final poster size: {}cm x {}cm", self.poster_width_cm, self.poster_height_cm)?;
        writeln!(
            f,
            "Image size on poster: {:.1}cm x {:.1}cm",
            self.image_width_cm, self.image_height_cm
        )?;
        writeln!(
            f,
            "Original resolution: {} x {}px",
            self.original_width_px, self.original_height_px
        )?;
        writeln!(f, "Scale factor: {:.1}%", self.scale_percent)?;
        write!(f, "Effective resolution: {:.0} DPI", self.effective_dpi)
    }
}
