//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("image has no pixels")]
    EmptyImage,

    #[error("invalid grid: {0} (expected COLSxROWS, e.g. 2x3)")]
    InvalidGrid(String),

    #[error("unknown grid preset: {0}")]
    UnknownGrid(String),

    #[error("unknown paper size: {0}")]
    UnknownPaper(String),

    #[error("invalid density: {0} px/mm")]
    InvalidDensity(f64),

    #[error("print resolution must be between 1 and 1200 dpi: {0}")]
    DpiOutOfRange(f64),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
