//! poster-tiler
//!
//! 1枚の画像を用紙グリッドに分割し、プレビュー画像と表紙付きPDFを生成する。
//! 幾何計算は `poster_tiler_common` にあり、ここでは画像の読み込み・合成・出力を扱う。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod preview;
pub mod prompt;
pub mod raster;
pub mod source;
