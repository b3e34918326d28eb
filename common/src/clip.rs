//! ページごとの切り出し領域計算
//!
//! ページ矩形（ポスターmm）を画像px空間へ逆写像し、画像範囲と交差させ、
//! 交差部分をページ内mm座標へ戻す。プレビューとPDF出力はどちらもこの結果を
//! 密度（px/mm）だけ変えて使う。

use crate::layout::{LayoutPlan, PageCell};
use crate::target::{Density, PixelRect};
use serde::Serialize;

/// 画像px空間の矩形（画像範囲内）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SourceRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl SourceRect {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// ページ内の描画先（ページ左上原点、mm）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DestRect {
    pub left_mm: f64,
    pub top_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
}

impl DestRect {
    pub fn right_mm(&self) -> f64 {
        self.left_mm + self.width_mm
    }

    pub fn bottom_mm(&self) -> f64 {
        self.top_mm + self.height_mm
    }

    /// 出力ラスタ上のpx矩形に変換
    ///
    /// 左右（上下）の辺をそれぞれ丸めてから幅を求めるので、mm空間で接する
    /// 矩形はpx空間でも接する。最小1px。
    pub fn to_pixels(&self, density: Density) -> PixelRect {
        let x0 = density.to_px(self.left_mm).round();
        let y0 = density.to_px(self.top_mm).round();
        let x1 = density.to_px(self.right_mm()).round();
        let y1 = density.to_px(self.bottom_mm()).round();

        PixelRect {
            x: x0 as i64,
            y: y0 as i64,
            width: ((x1 - x0) as u32).max(1),
            height: ((y1 - y0) as u32).max(1),
        }
    }
}

/// 1ページ分の切り出し情報
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClipRegion {
    pub source: SourceRect,
    pub dest: DestRect,
}

/// ページに載る画像領域を計算。画像と重ならなければ None（白紙ページ）。
pub fn clip(plan: &LayoutPlan, cell: &PageCell) -> Option<ClipRegion> {
    let scale = plan.scale;
    let to_src_x = |mm: f64| (mm - plan.offset_x_mm) / scale;
    let to_src_y = |mm: f64| (mm - plan.offset_y_mm) / scale;

    let left = to_src_x(cell.left_mm).max(0.0);
    let top = to_src_y(cell.top_mm).max(0.0);
    let right = to_src_x(cell.right_mm).min(plan.image.width_px as f64);
    let bottom = to_src_y(cell.bottom_mm).min(plan.image.height_px as f64);

    if left >= right || top >= bottom {
        return None;
    }

    let source = SourceRect { left, top, right, bottom };
    let dest = DestRect {
        left_mm: (plan.offset_x_mm + left * scale - cell.left_mm).max(0.0),
        top_mm: (plan.offset_y_mm + top * scale - cell.top_mm).max(0.0),
        width_mm: source.width() * scale,
        height_mm: source.height() * scale,
    };

    Some(ClipRegion { source, dest })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSpec;
    use crate::layout::{plan, ImageDims};
    use crate::paper::{A4, LETTER};
    use crate::target::RasterTarget;

    const EPS: f64 = 1e-6;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    fn reference_plan() -> LayoutPlan {
        plan(ImageDims::new(4000, 3000), A4, GridSpec::new(2, 2).unwrap()).unwrap()
    }

    #[test]
    fn test_reference_scenario_clips() {
        // scale=0.105, offset=(0, 139.5)。画像はポスター上で y=139.5..454.5mm
        let plan = reference_plan();
        let clips = plan.clips();
        assert_eq!(clips.len(), 4);

        // 上段: ページ y=0..297 → 画像 y=0..(297-139.5)/0.105=1500px
        let (_, top_left) = clips[0];
        let top_left = top_left.unwrap();
        assert!(approx(top_left.source.left, 0.0));
        assert!(approx(top_left.source.right, 2000.0));
        assert!(approx(top_left.source.top, 0.0));
        assert!(approx(top_left.source.bottom, 1500.0));
        assert!(approx(top_left.dest.left_mm, 0.0));
        assert!(approx(top_left.dest.top_mm, 139.5));
        assert!(approx(top_left.dest.width_mm, 210.0));
        assert!(approx(top_left.dest.height_mm, 157.5));

        let top_right = clips[1].1.unwrap();
        assert!(approx(top_right.source.left, 2000.0));
        assert!(approx(top_right.source.right, 4000.0));
        assert!(approx(top_right.dest.left_mm, 0.0));
        assert!(approx(top_right.dest.top_mm, 139.5));

        // 下段: ページ y=297..594 → 画像 y=1500..3000px、ページ上端から描画
        let bottom_left = clips[2].1.unwrap();
        assert!(approx(bottom_left.source.top, 1500.0));
        assert!(approx(bottom_left.source.bottom, 3000.0));
        assert!(approx(bottom_left.dest.top_mm, 0.0));
        assert!(approx(bottom_left.dest.height_mm, 157.5));

        let bottom_right = clips[3].1.unwrap();
        assert!(approx(bottom_right.source.left, 2000.0));
        assert!(approx(bottom_right.source.top, 1500.0));
        assert!(approx(bottom_right.dest.width_mm, 210.0));
    }

    #[test]
    fn test_clips_cover_whole_image_exactly_once() {
        for (w, h) in [(4000, 3000), (1080, 1920), (500, 500), (123, 4567)] {
            let plan = plan(ImageDims::new(w, h), LETTER, GridSpec::new(3, 2).unwrap()).unwrap();
            let area: f64 = plan
                .clips()
                .iter()
                .filter_map(|(_, c)| *c)
                .map(|c| c.source.width() * c.source.height())
                .sum();
            assert!((area - (w as f64 * h as f64)).abs() < 1e-3, "{}x{}", w, h);
        }
    }

    #[test]
    fn test_source_stays_inside_image() {
        let plan = plan(ImageDims::new(1080, 1920), A4, GridSpec::new(3, 3).unwrap()).unwrap();
        for (cell, clip) in plan.clips() {
            let Some(clip) = clip else { continue };
            assert!(clip.source.left >= 0.0 && clip.source.top >= 0.0);
            assert!(clip.source.right <= 1080.0 && clip.source.bottom <= 1920.0);
            assert!(clip.dest.left_mm >= 0.0 && clip.dest.top_mm >= 0.0);
            assert!(clip.dest.right_mm() <= cell.width_mm() + EPS);
            assert!(clip.dest.bottom_mm() <= cell.height_mm() + EPS);
        }
    }

    #[test]
    fn test_margin_pages_are_empty() {
        // 横長画像を縦3段に: 上下の段は余白のみ
        let plan = plan(ImageDims::new(3000, 500), A4, GridSpec::new(1, 3).unwrap()).unwrap();
        let clips = plan.clips();
        assert_eq!(clips.len(), 3);
        assert!(clips[0].1.is_none());
        assert!(clips[1].1.is_some());
        assert!(clips[2].1.is_none());
        // 空ページも通し番号は維持
        let seq: Vec<usize> = clips.iter().map(|(c, _)| c.sequence).collect();
        assert_eq!(seq, vec![1, 2, 3]);
    }

    #[test]
    fn test_single_page_covers_entire_image_centered() {
        let plan = plan(ImageDims::new(1000, 500), A4, GridSpec::new(1, 1).unwrap()).unwrap();
        let cell = plan.cell(0, 0);
        let clip = clip(&plan, &cell).unwrap();

        assert!(approx(clip.source.left, 0.0));
        assert!(approx(clip.source.top, 0.0));
        assert!(approx(clip.source.right, 1000.0));
        assert!(approx(clip.source.bottom, 500.0));
        assert!(approx(clip.dest.width_mm, 210.0));
        assert!(approx(clip.dest.height_mm, 105.0));
        assert!(approx(clip.dest.left_mm, 0.0));
        assert!(approx(clip.dest.top_mm, (297.0 - 105.0) / 2.0));
    }

    #[test]
    fn test_placement_is_density_independent() {
        let plan = reference_plan();
        let preview = RasterTarget::preview(A4, 200);
        let print = RasterTarget::print(A4, 300.0).unwrap();

        for (cell, clip) in plan.clips() {
            let clip = clip.unwrap();
            // ページ幅に対する相対位置は密度に依存しない
            let rel_preview = preview.density.to_px(clip.dest.left_mm) / preview.density.to_px(cell.width_mm());
            let rel_print = print.density.to_px(clip.dest.left_mm) / print.density.to_px(cell.width_mm());
            assert!(approx(rel_preview, rel_print));

            let rel_preview = preview.density.to_px(clip.dest.height_mm) / preview.density.to_px(cell.height_mm());
            let rel_print = print.density.to_px(clip.dest.height_mm) / print.density.to_px(cell.height_mm());
            assert!(approx(rel_preview, rel_print));

            // px矩形は丸め誤差（1px）以内で密度比に比例
            let p = clip.dest.to_pixels(preview.density);
            let q = clip.dest.to_pixels(print.density);
            let ratio = print.density.px_per_mm() / preview.density.px_per_mm();
            assert!((q.y as f64 - p.y as f64 * ratio).abs() <= ratio + 1.0);
            assert!((q.height as f64 - p.height as f64 * ratio).abs() <= 2.0 * ratio + 1.0);
        }
    }

    #[test]
    fn test_to_pixels_adjacent_edges_meet() {
        let density = Density::from_dpi(300.0).unwrap();
        let a = DestRect { left_mm: 0.0, top_mm: 0.0, width_mm: 33.3, height_mm: 10.0 };
        let b = DestRect { left_mm: 33.3, top_mm: 0.0, width_mm: 33.3, height_mm: 10.0 };
        let pa = a.to_pixels(density);
        let pb = b.to_pixels(density);
        assert_eq!(pa.x + pa.width as i64, pb.x);
    }

    #[test]
    fn test_to_pixels_minimum_size() {
        let density = Density::from_dpi(72.0).unwrap();
        let tiny = DestRect { left_mm: 1.0, top_mm: 1.0, width_mm: 0.001, height_mm: 0.001 };
        let px = tiny.to_pixels(density);
        assert_eq!(px.width, 1);
        assert_eq!(px.height, 1);
    }
}
