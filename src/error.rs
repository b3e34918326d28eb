use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosterError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像ファイルではありません: {0}")]
    NotAnImage(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("画像処理エラー: {0}")]
    Image(#[from] image::ImageError),

    #[error("PDF生成エラー: {0}")]
    PdfGeneration(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error(transparent)]
    Common(#[from] poster_tiler_common::Error),
}

pub type Result<T> = std::result::Result<T, PosterError>;
