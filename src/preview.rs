//! 低解像度プレビュー
//!
//! 各ページを幅固定の小さなラスタに描画する。配置計算はPDF出力と共通。

use crate::error::Result;
use crate::raster;
use crate::source::SourceImage;
use image::RgbImage;
use poster_tiler_common::{LayoutPlan, RasterTarget};
use std::path::{Path, PathBuf};

/// プレビュー1枚
#[derive(Debug, Clone)]
pub struct PreviewTile {
    /// 通し番号（1始まり）
    pub sequence: usize,
    pub total: usize,
    pub image: RgbImage,
}

impl PreviewTile {
    pub fn file_name(&self) -> String {
        format!("tile_{:02}_of_{:02}.png", self.sequence, self.total)
    }
}

/// 全ページのプレビューを行優先で生成
pub fn render_previews(source: &SourceImage, plan: &LayoutPlan, width_px: u32) -> Vec<PreviewTile> {
    let target = RasterTarget::preview(plan.paper, width_px);
    let total = plan.page_count();

    plan.cells()
        .map(|cell| {
            let image = raster::render_page(source.pixels(), plan, &cell, target);
            tracing::debug!(sequence = cell.sequence, width = image.width(), height = image.height(), "プレビュー生成");
            PreviewTile { sequence: cell.sequence, total, image }
        })
        .collect()
}

/// プレビューをPNGで保存し、保存先パスを返す
pub fn write_previews(tiles: &[PreviewTile], dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut paths = Vec::with_capacity(tiles.len());
    for tile in tiles {
        let path = dir.join(tile.file_name());
        tile.image.save(&path)?;
        paths.push(path);
    }
    Ok(paths)
}

/// 列数に合わせて通し番号を並べた表（端末表示用）
pub fn sequence_table(plan: &LayoutPlan) -> String {
    let cols = plan.grid.cols as usize;
    let width = plan.page_count().to_string().len();

    plan.cells()
        .map(|cell| format!("[{:>width$}]", cell.sequence, width = width))
        .collect::<Vec<_>>()
        .chunks(cols)
        .map(|row| row.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}
