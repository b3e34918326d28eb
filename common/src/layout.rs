//! ポスターのレイアウト計算
//!
//! 座標系はすべてポスター全体の左上を原点とするmm単位。
//! 画像は縮尺を保ったままポスター内に収まる最大サイズで中央配置される。

use crate::clip::{clip, ClipRegion};
use crate::error::{Error, Result};
use crate::grid::GridSpec;
use crate::paper::PaperSize;
use serde::Serialize;

/// 元画像のピクセル寸法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ImageDims {
    pub width_px: u32,
    pub height_px: u32,
}

impl ImageDims {
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self { width_px, height_px }
    }

    pub fn is_empty(&self) -> bool {
        self.width_px == 0 || self.height_px == 0
    }
}

/// レイアウト計算結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutPlan {
    pub image: ImageDims,
    pub paper: PaperSize,
    pub grid: GridSpec,
    pub poster_width_mm: f64,
    pub poster_height_mm: f64,
    /// 画像1pxあたりのmm
    pub scale: f64,
    pub offset_x_mm: f64,
    pub offset_y_mm: f64,
}

/// グリッド上の1ページ（ポスター座標、mm）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageCell {
    pub row: u32,
    pub col: u32,
    /// 表示用の通し番号（行優先、1始まり）
    pub sequence: usize,
    pub left_mm: f64,
    pub top_mm: f64,
    pub right_mm: f64,
    pub bottom_mm: f64,
}

impl PageCell {
    pub fn width_mm(&self) -> f64 {
        self.right_mm - self.left_mm
    }

    pub fn height_mm(&self) -> f64 {
        self.bottom_mm - self.top_mm
    }
}

/// 画像・用紙・グリッドからレイアウトを計算
pub fn plan(image: ImageDims, paper: PaperSize, grid: GridSpec) -> Result<LayoutPlan> {
    if image.is_empty() {
        return Err(Error::EmptyImage);
    }
    if grid.cols == 0 || grid.rows == 0 {
        return Err(Error::InvalidGrid(grid.to_string()));
    }

    let poster_width_mm = paper.width_mm * grid.cols as f64;
    let poster_height_mm = paper.height_mm * grid.rows as f64;

    let scale_x = poster_width_mm / image.width_px as f64;
    let scale_y = poster_height_mm / image.height_px as f64;
    let scale = scale_x.min(scale_y);

    let scaled_width = image.width_px as f64 * scale;
    let scaled_height = image.height_px as f64 * scale;

    Ok(LayoutPlan {
        image,
        paper,
        grid,
        poster_width_mm,
        poster_height_mm,
        scale,
        offset_x_mm: (poster_width_mm - scaled_width) / 2.0,
        offset_y_mm: (poster_height_mm - scaled_height) / 2.0,
    })
}

impl LayoutPlan {
    /// ポスター上の画像幅（mm）
    pub fn scaled_width_mm(&self) -> f64 {
        self.image.width_px as f64 * self.scale
    }

    /// ポスター上の画像高さ（mm）
    pub fn scaled_height_mm(&self) -> f64 {
        self.image.height_px as f64 * self.scale
    }

    pub fn page_count(&self) -> usize {
        self.grid.page_count()
    }

    pub fn cell(&self, row: u32, col: u32) -> PageCell {
        let left_mm = col as f64 * self.paper.width_mm;
        let top_mm = row as f64 * self.paper.height_mm;
        PageCell {
            row,
            col,
            sequence: (row * self.grid.cols + col) as usize + 1,
            left_mm,
            top_mm,
            right_mm: left_mm + self.paper.width_mm,
            bottom_mm: top_mm + self.paper.height_mm,
        }
    }

    /// 全ページを行優先で列挙
    pub fn cells(&self) -> impl Iterator<Item = PageCell> + '_ {
        (0..self.grid.rows).flat_map(move |row| (0..self.grid.cols).map(move |col| self.cell(row, col)))
    }

    /// 全ページとその切り出し領域（画像と重ならないページは None）
    pub fn clips(&self) -> Vec<(PageCell, Option<ClipRegion>)> {
        self.cells().map(|cell| (cell, clip(self, &cell))).collect()
    }
}
