//! グリッド（列 × 行）定義

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// ポスターの分割数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridSpec {
    pub cols: u32,
    pub rows: u32,
}

const fn preset(cols: u32, rows: u32) -> GridSpec {
    GridSpec { cols, rows }
}

/// 選択可能なプリセット
pub const GRID_PRESETS: &[GridSpec] = &[
    preset(1, 1),
    preset(1, 2),
    preset(2, 1),
    preset(2, 2),
    preset(2, 3),
    preset(3, 2),
    preset(3, 3),
    preset(3, 4),
    preset(4, 3),
    preset(4, 4),
    preset(4, 5),
    preset(5, 4),
    preset(5, 5),
];

impl GridSpec {
    /// 任意の正のグリッドを作成（プリセット外も可）
    pub fn new(cols: u32, rows: u32) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(Error::InvalidGrid(format!("{}x{}", cols, rows)));
        }
        Ok(Self { cols, rows })
    }

    /// 総ページ数
    pub fn page_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    pub fn is_preset(&self) -> bool {
        GRID_PRESETS.contains(self)
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        preset(2, 2)
    }
}

/// "2x3" 形式をパース（"2X3", "2×3" も許容）。プリセット外はエラー。
impl FromStr for GridSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().replace(['X', '×'], "x");
        let (cols, rows) = normalized
            .split_once('x')
            .ok_or_else(|| Error::InvalidGrid(s.to_string()))?;

        let cols: u32 = cols.trim().parse().map_err(|_| Error::InvalidGrid(s.to_string()))?;
        let rows: u32 = rows.trim().parse().map_err(|_| Error::InvalidGrid(s.to_string()))?;
        let grid = Self::new(cols, rows).map_err(|_| Error::InvalidGrid(s.to_string()))?;

        if !grid.is_preset() {
            return Err(Error::UnknownGrid(grid.to_string()));
        }
        Ok(grid)
    }
}

impl fmt::Display for GridSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}
