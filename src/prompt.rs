//! 用紙・グリッドの対話的選択

use crate::error::{PosterError, Result};
use dialoguer::Select;
use poster_tiler_common::{GridSpec, PaperSize, GRID_PRESETS, PAPER_SIZES};

pub fn select_paper(default: PaperSize) -> Result<PaperSize> {
    let labels: Vec<String> = PAPER_SIZES.iter().map(|p| p.to_string()).collect();
    let default_idx = PAPER_SIZES.iter().position(|p| *p == default).unwrap_or(0);

    let idx = Select::new()
        .with_prompt("用紙サイズ")
        .items(&labels)
        .default(default_idx)
        .interact()
        .map_err(|e| PosterError::Prompt(e.to_string()))?;
    Ok(PAPER_SIZES[idx])
}

pub fn select_grid(default: GridSpec) -> Result<GridSpec> {
    let labels: Vec<String> = GRID_PRESETS
        .iter()
        .map(|g| format!("{} ({}ページ)", g, g.page_count()))
        .collect();
    let default_idx = GRID_PRESETS.iter().position(|g| *g == default).unwrap_or(0);

    let idx = Select::new()
        .with_prompt("グリッド（列x行）")
        .items(&labels)
        .default(default_idx)
        .interact()
        .map_err(|e| PosterError::Prompt(e.to_string()))?;
    Ok(GRID_PRESETS[idx])
}
