//! 出力ラスタの解像度定義
//!
//! mm基準のレイアウトをpxへ落とす唯一の係数が `Density`（px/mm）。

use crate::error::{Error, Result};
use crate::paper::PaperSize;
use serde::Serialize;

/// 1インチ = 25.4mm
pub const MM_PER_INCH: f64 = 25.4;

/// プレビュー1ページの既定幅（px）
pub const DEFAULT_PREVIEW_WIDTH_PX: u32 = 200;

/// 印刷用ラスタの既定解像度
pub const DEFAULT_PRINT_DPI: f64 = 300.0;

/// 印刷用ラスタに指定できる解像度の範囲
pub const MIN_PRINT_DPI: f64 = 1.0;
pub const MAX_PRINT_DPI: f64 = 1200.0;

/// DPIが印刷用の範囲内か確認する
pub fn check_print_dpi(dpi: f64) -> Result<f64> {
    if (MIN_PRINT_DPI..=MAX_PRINT_DPI).contains(&dpi) {
        Ok(dpi)
    } else {
        Err(Error::DpiOutOfRange(dpi))
    }
}

/// 画素密度（px/mm）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Density(f64);

impl Density {
    pub fn new(px_per_mm: f64) -> Result<Self> {
        if !px_per_mm.is_finite() || px_per_mm <= 0.0 {
            return Err(Error::InvalidDensity(px_per_mm));
        }
        Ok(Self(px_per_mm))
    }

    pub fn from_dpi(dpi: f64) -> Result<Self> {
        Self::new(dpi / MM_PER_INCH)
    }

    pub fn px_per_mm(&self) -> f64 {
        self.0
    }

    pub fn dpi(&self) -> f64 {
        self.0 * MM_PER_INCH
    }

    #[inline]
    pub fn to_px(&self, mm: f64) -> f64 {
        mm * self.0
    }
}

/// 出力ラスタ上の矩形（px）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// 1ページ分の出力ラスタ
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RasterTarget {
    pub width_px: u32,
    pub height_px: u32,
    pub density: Density,
}

impl RasterTarget {
    /// 幅固定のプレビュー。高さは用紙の縦横比から決める。
    pub fn preview(paper: PaperSize, width_px: u32) -> Self {
        let width_px = width_px.max(1);
        let height_px = ((width_px as f64 * paper.aspect()).round() as u32).max(1);
        Self {
            width_px,
            height_px,
            density: Density(width_px as f64 / paper.width_mm),
        }
    }

    /// 指定DPIの印刷用ラスタ
    pub fn print(paper: PaperSize, dpi: f64) -> Result<Self> {
        let density = Density::from_dpi(check_print_dpi(dpi)?)?;
        Ok(Self {
            width_px: (density.to_px(paper.width_mm).round() as u32).max(1),
            height_px: (density.to_px(paper.height_mm).round() as u32).max(1),
            density,
        })
    }
}
