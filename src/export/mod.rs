pub mod cover;
pub mod pdf;

use crate::config::{Config, DEFAULT_TITLE};
use crate::error::Result;
use crate::source::SourceImage;
use chrono::{DateTime, Local, NaiveDate, Utc};
use poster_tiler_common::{GridSpec, LayoutPlan, DEFAULT_PRINT_DPI};
use std::path::{Path, PathBuf};

/// PDF出力設定
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub dpi: f64,
    /// JPEG品質 (1-100)
    pub jpeg_quality: u8,
    pub title: String,
    pub generated_at: DateTime<Local>,
    /// 進捗バーを表示するか
    pub progress: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_PRINT_DPI,
            jpeg_quality: 95,
            title: DEFAULT_TITLE.into(),
            generated_at: Local::now(),
            progress: false,
        }
    }
}

impl ExportOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            dpi: config.export_dpi,
            jpeg_quality: config.jpeg_quality,
            title: config.title.clone(),
            ..Self::default()
        }
    }
}

/// ファイル名に使う日付（UTC）。表紙の日時はローカル時刻のまま。
pub fn export_date(generated_at: &DateTime<Local>) -> NaiveDate {
    generated_at.with_timezone(&Utc).date_naive()
}

/// 既定のファイル名: poster_{cols}x{rows}_{YYYY-MM-DD}.pdf
pub fn export_filename(grid: GridSpec, date: NaiveDate) -> String {
    format!("poster_{}x{}_{}.pdf", grid.cols, grid.rows, date.format("%Y-%m-%d"))
}

/// 出力先の決定。ディレクトリ（または拡張子なし）なら既定ファイル名を付ける。
pub fn resolve_output_path(output: Option<&Path>, grid: GridSpec, date: NaiveDate) -> PathBuf {
    let file_name = export_filename(grid, date);
    match output {
        None => PathBuf::from(file_name),
        Some(path) if path.is_dir() || path.extension().is_none() => path.join(file_name),
        Some(path) => path.to_path_buf(),
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}

/// PDFを生成して保存する。途中で失敗した場合は何も残さない。
pub fn export_pdf(source: &SourceImage, plan: &LayoutPlan, options: &ExportOptions, path: &Path) -> Result<()> {
    let bytes = pdf::build_pdf(source, plan, options)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let part = partial_path(path);
    let written = std::fs::write(&part, &bytes).and_then(|_| std::fs::rename(&part, path));
    if let Err(e) = written {
        std::fs::remove_file(&part).ok();
        return Err(e.into());
    }

    tracing::info!(path = %path.display(), bytes = bytes.len(), "PDF保存");
    Ok(())
}
