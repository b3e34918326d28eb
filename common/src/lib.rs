//! Poster Tiler Common Library
//!
//! 1枚の画像を用紙グリッドに分割するための幾何計算。
//! CLIと将来のフロントエンドで共有される（画像処理・I/Oは含まない）。

pub mod clip;
pub mod error;
pub mod grid;
pub mod layout;
pub mod paper;
pub mod summary;
pub mod target;

pub use clip::{clip, ClipRegion, DestRect, SourceRect};
pub use error::{Error, Result};
pub use grid::{GridSpec, GRID_PRESETS};
pub use layout::{plan, ImageDims, LayoutPlan, PageCell};
pub use paper::{PaperSize, PAPER_SIZES};
pub use summary::{Summary, SummaryLine, REFERENCE_DPI};
pub use target::{
    check_print_dpi, Density, PixelRect, RasterTarget, DEFAULT_PREVIEW_WIDTH_PX, DEFAULT_PRINT_DPI,
    MAX_PRINT_DPI, MIN_PRINT_DPI,
};
