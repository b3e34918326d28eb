use crate::error::{PosterError, Result};
use poster_tiler_common::{GridSpec, PaperSize, DEFAULT_PREVIEW_WIDTH_PX, DEFAULT_PRINT_DPI};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_TITLE: &str = "Poster Generator";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 用紙キー (a4/letter/a3)
    pub paper: String,
    /// グリッド ("2x2" など)
    pub grid: String,
    pub export_dpi: f64,
    pub preview_width: u32,
    /// JPEG品質 (1-100)
    pub jpeg_quality: u8,
    pub title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paper: "a4".into(),
            grid: "2x2".into(),
            export_dpi: DEFAULT_PRINT_DPI,
            preview_width: DEFAULT_PREVIEW_WIDTH_PX,
            jpeg_quality: 95,
            title: DEFAULT_TITLE.into(),
        }
    }
}

impl Config {
    /// 設定ファイルがあれば読み込み、なければデフォルト
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PosterError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("poster-tiler").join("config.json"))
    }

    pub fn paper_size(&self) -> Result<PaperSize> {
        Ok(self.paper.parse()?)
    }

    pub fn grid_spec(&self) -> Result<GridSpec> {
        Ok(self.grid.parse()?)
    }

    fn validate(&self) -> Result<()> {
        self.paper_size()?;
        self.grid_spec()?;
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(PosterError::Config(format!(
                "jpeg_quality は 1〜100 で指定してください: {}",
                self.jpeg_quality
            )));
        }
        poster_tiler_common::check_print_dpi(self.export_dpi)?;
        if self.preview_width == 0 {
            return Err(PosterError::Config("preview_width は1以上で指定してください".into()));
        }
        Ok(())
    }
}
