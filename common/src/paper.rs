//! 用紙サイズカタログ
//!
//! mm基準の用紙定義。ポスター全体の寸法はここから導出される。

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// 用紙サイズ（mm）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaperSize {
    /// CLI/設定ファイルで使うキー ("a4" など)
    pub key: &'static str,
    /// 表示名
    pub label: &'static str,
    pub width_mm: f64,
    pub height_mm: f64,
}

pub const A4: PaperSize = PaperSize { key: "a4", label: "A4", width_mm: 210.0, height_mm: 297.0 };
pub const LETTER: PaperSize = PaperSize { key: "letter", label: "Letter", width_mm: 215.9, height_mm: 279.4 };
pub const A3: PaperSize = PaperSize { key: "a3", label: "A3", width_mm: 297.0, height_mm: 420.0 };

/// 選択可能な用紙一覧（表示順）
pub const PAPER_SIZES: &[PaperSize] = &[A4, LETTER, A3];

impl PaperSize {
    /// 高さ / 幅
    pub fn aspect(&self) -> f64 {
        self.height_mm / self.width_mm
    }
}

impl Default for PaperSize {
    fn default() -> Self {
        A4
    }
}

impl FromStr for PaperSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase();
        PAPER_SIZES
            .iter()
            .find(|p| p.key == key)
            .copied()
            .ok_or_else(|| Error::UnknownPaper(s.to_string()))
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} x {} mm)", self.label, self.width_mm, self.height_mm)
    }
}
