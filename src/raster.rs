//! ページラスタの合成
//!
//! 切り出し領域（mm）を出力ラスタの密度でpxへ変換し、白紙の上に描画する。
//! プレビューとPDF出力は同じ関数を異なる `RasterTarget` で呼ぶ。

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use poster_tiler_common::{clip, ClipRegion, LayoutPlan, PageCell, RasterTarget};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// 1ページ分のラスタを生成。`clip` が None なら白紙。
pub fn composite(source: &RgbImage, clip: Option<&ClipRegion>, target: RasterTarget) -> RgbImage {
    let mut page = RgbImage::from_pixel(target.width_px, target.height_px, WHITE);
    let Some(clip) = clip else {
        return page;
    };

    // 元画像の範囲外は読まない
    let sx0 = (clip.source.left.floor().max(0.0) as u32).min(source.width().saturating_sub(1));
    let sy0 = (clip.source.top.floor().max(0.0) as u32).min(source.height().saturating_sub(1));
    let sx1 = (clip.source.right.ceil() as u32).clamp(sx0 + 1, source.width());
    let sy1 = (clip.source.bottom.ceil() as u32).clamp(sy0 + 1, source.height());

    // 整数pxで切り出した分だけ描画先も広げる。はみ出しは overlay がページ外として捨てる。
    let (left_mm, right_mm) = widen(
        clip.dest.left_mm,
        clip.dest.right_mm(),
        clip.source.left,
        clip.source.right,
        sx0 as f64,
        sx1 as f64,
    );
    let (top_mm, bottom_mm) = widen(
        clip.dest.top_mm,
        clip.dest.bottom_mm(),
        clip.source.top,
        clip.source.bottom,
        sy0 as f64,
        sy1 as f64,
    );

    let ppm = target.density.px_per_mm();
    let x0 = (left_mm * ppm).round() as i64;
    let y0 = (top_mm * ppm).round() as i64;
    let width = ((right_mm * ppm).round() as i64 - x0).max(1) as u32;
    let height = ((bottom_mm * ppm).round() as i64 - y0).max(1) as u32;

    let region = imageops::crop_imm(source, sx0, sy0, sx1 - sx0, sy1 - sy0).to_image();
    let scaled = imageops::resize(&region, width, height, FilterType::Triangle);
    imageops::overlay(&mut page, &scaled, x0, y0);

    page
}

/// 1軸分: 元画像の区間 [src_lo, src_hi] を整数区間 [crop_lo, crop_hi] へ広げたときの描画先（mm）
fn widen(dest_lo: f64, dest_hi: f64, src_lo: f64, src_hi: f64, crop_lo: f64, crop_hi: f64) -> (f64, f64) {
    let span = src_hi - src_lo;
    if span <= 0.0 {
        return (dest_lo, dest_hi);
    }
    let mm_per_src = (dest_hi - dest_lo) / span;
    (
        dest_lo - (src_lo - crop_lo) * mm_per_src,
        dest_hi + (crop_hi - src_hi) * mm_per_src,
    )
}

/// ページの切り出しから合成までをまとめて行う
pub fn render_page(source: &RgbImage, plan: &LayoutPlan, cell: &PageCell, target: RasterTarget) -> RgbImage {
    let region = clip(plan, cell);
    tracing::debug!(sequence = cell.sequence, ?region, "ページ切り出し");
    composite(source, region.as_ref(), target)
}

/// 正方形のサムネイル（白背景、縦横比を保って中央配置）
pub fn thumbnail(source: &RgbImage, size_px: u32) -> RgbImage {
    let size_px = size_px.max(1);
    let mut thumb = RgbImage::from_pixel(size_px, size_px, WHITE);

    let scale = (size_px as f64 / source.width() as f64).min(size_px as f64 / source.height() as f64);
    let width = ((source.width() as f64 * scale).round() as u32).clamp(1, size_px);
    let height = ((source.height() as f64 * scale).round() as u32).clamp(1, size_px);

    let scaled = imageops::resize(source, width, height, FilterType::Triangle);
    let x = (size_px - width) / 2;
    let y = (size_px - height) / 2;
    imageops::overlay(&mut thumb, &scaled, x as i64, y as i64);

    thumb
}
