//! 元画像の読み込み

use crate::error::{PosterError, Result};
use image::{ImageReader, RgbImage};
use poster_tiler_common::ImageDims;
use std::path::Path;

/// 読み込み済みの元画像（RGB8）。差し替えは丸ごと行い、変更はしない。
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: RgbImage,
}

impl SourceImage {
    /// 画像ファイルを開く。中身から形式を判定し、画像でなければ `NotAnImage`。
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(PosterError::FileNotFound(path.display().to_string()));
        }

        let reader = ImageReader::open(path)?.with_guessed_format()?;
        let Some(format) = reader.format() else {
            return Err(PosterError::NotAnImage(path.display().to_string()));
        };
        tracing::debug!(?format, path = %path.display(), "画像形式を判定");

        let decoded = reader
            .decode()
            .map_err(|e| PosterError::ImageLoad(format!("{}: {}", path.display(), e)))?;

        Self::from_rgb(decoded.to_rgb8())
    }

    pub fn from_rgb(pixels: RgbImage) -> Result<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(poster_tiler_common::Error::EmptyImage.into());
        }
        Ok(Self { pixels })
    }

    pub fn dims(&self) -> ImageDims {
        ImageDims::new(self.pixels.width(), self.pixels.height())
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }
}
