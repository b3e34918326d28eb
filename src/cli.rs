use clap::{Args, Parser, Subcommand};
use poster_tiler_common::{check_print_dpi, GridSpec, PaperSize};
use std::path::PathBuf;

fn parse_dpi(s: &str) -> Result<f64, String> {
    let dpi: f64 = s.trim().parse().map_err(|e| format!("{}", e))?;
    check_print_dpi(dpi).map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(name = "poster-tiler")]
#[command(about = "画像を用紙グリッドに分割してポスター用PDFを生成するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 用紙・グリッド指定（省略時は設定ファイルの値）
#[derive(Args, Clone, Debug, Default)]
pub struct LayoutArgs {
    /// 用紙サイズ (a4/letter/a3)
    #[arg(short, long)]
    pub paper: Option<PaperSize>,

    /// グリッド（列x行、例: 2x3）
    #[arg(short, long)]
    pub grid: Option<GridSpec>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ポスター情報を表示
    Info {
        /// 元画像
        #[arg(required = true)]
        image: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// ページごとのプレビュー画像（PNG）を出力
    Preview {
        /// 元画像
        #[arg(required = true)]
        image: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        /// 出力ディレクトリ（デフォルト: ./preview）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// プレビュー1ページの幅（px）
        #[arg(long)]
        width: Option<u32>,
    },

    /// 表紙付きのポスターPDFを出力
    Export {
        /// 元画像
        #[arg(required = true)]
        image: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        /// 出力ファイル/ディレクトリ（デフォルト: poster_{列}x{行}_{日付}.pdf）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 印刷解像度（DPI, 1-1200）
        #[arg(long, value_parser = parse_dpi)]
        dpi: Option<f64>,

        /// JPEG品質 (1-100)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
        quality: Option<u8>,

        /// 表紙タイトル
        #[arg(short, long)]
        title: Option<String>,

        /// 用紙とグリッドを対話的に選択
        #[arg(short, long)]
        interactive: bool,
    },

    /// 選択可能な用紙サイズとグリッドを一覧表示
    Catalog,

    /// 設定を表示
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
