use anyhow::{Context, Result};
use clap::Parser;
use poster_tiler::cli::{Cli, Commands, LayoutArgs};
use poster_tiler::config::Config;
use poster_tiler::export::{self, ExportOptions};
use poster_tiler::source::SourceImage;
use poster_tiler::{preview, prompt};
use poster_tiler_common::{plan, LayoutPlan, Summary, GRID_PRESETS, PAPER_SIZES};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let level = if verbose {
        "poster_tiler=debug,poster_tiler_common=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// 画像を読み込み、レイアウトを計算する
fn load_and_plan(image: &Path, layout: &LayoutArgs, config: &Config) -> Result<(SourceImage, LayoutPlan)> {
    let paper = match layout.paper {
        Some(paper) => paper,
        None => config.paper_size()?,
    };
    let grid = match layout.grid {
        Some(grid) => grid,
        None => config.grid_spec()?,
    };

    let source = SourceImage::open(image).with_context(|| format!("画像を開けません: {}", image.display()))?;
    let plan = plan(source.dims(), paper, grid)?;
    tracing::info!(
        paper = paper.key,
        %grid,
        scale = plan.scale,
        offset_x_mm = plan.offset_x_mm,
        offset_y_mm = plan.offset_y_mm,
        "レイアウト計算"
    );
    Ok((source, plan))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Info { image, layout, json } => {
            let (_, plan) = load_and_plan(&image, &layout, &config)?;
            let summary = Summary::from_plan(&plan);
            if json {
                println!("{}", summary.to_json()?);
            } else {
                println!("🖼  poster-tiler - ポスター情報\n");
                println!("{}", summary);
            }
        }

        Commands::Preview { image, layout, output, width } => {
            println!("🖼  poster-tiler - プレビュー\n");

            println!("[1/2] 画像を読み込み中...");
            let (source, plan) = load_and_plan(&image, &layout, &config)?;
            let dims = source.dims();
            println!("✔ {} x {}px ({} / {})\n", dims.width_px, dims.height_px, plan.paper.label, plan.grid);

            println!("[2/2] プレビューを生成中...");
            let width = width.unwrap_or(config.preview_width);
            let tiles = preview::render_previews(&source, &plan, width);
            let dir = output.unwrap_or_else(|| PathBuf::from("preview"));
            let paths = preview::write_previews(&tiles, &dir)
                .with_context(|| format!("プレビューを保存できません: {}", dir.display()))?;
            println!("✔ {}枚を保存: {}\n", paths.len(), dir.display());

            println!("{}\n", preview::sequence_table(&plan));
            println!("{}", Summary::from_plan(&plan));
        }

        Commands::Export { image, layout, output, dpi, quality, title, interactive } => {
            println!("📄 poster-tiler - PDF出力\n");

            let layout = if interactive {
                let paper = layout.paper.map_or_else(|| config.paper_size(), Ok)?;
                let grid = layout.grid.map_or_else(|| config.grid_spec(), Ok)?;
                LayoutArgs {
                    paper: Some(prompt::select_paper(paper)?),
                    grid: Some(prompt::select_grid(grid)?),
                }
            } else {
                layout
            };

            println!("[1/3] 画像を読み込み中...");
            let (source, plan) = load_and_plan(&image, &layout, &config)?;
            println!("✔ {} / {} ({}ページ)\n", plan.paper.label, plan.grid, plan.page_count());

            let mut options = ExportOptions::from_config(&config);
            options.dpi = dpi.unwrap_or(options.dpi);
            options.jpeg_quality = quality.unwrap_or(options.jpeg_quality);
            options.title = title.unwrap_or(options.title);
            options.progress = true;

            let path = export::resolve_output_path(output.as_deref(), plan.grid, export::export_date(&options.generated_at));

            println!("[2/3] ページを描画中... ({} DPI)", options.dpi);
            println!("[3/3] PDFを保存中...");
            export::export_pdf(&source, &plan, &options, &path)
                .with_context(|| format!("PDFを出力できませんでした: {}", path.display()))?;
            println!("✔ PDF出力: {}", path.display());

            println!("\n{}", Summary::from_plan(&plan));
            println!("\n✅ 完了");
        }

        Commands::Catalog => {
            println!("用紙サイズ:");
            for paper in PAPER_SIZES {
                println!("  {:<8} {}", paper.key, paper);
            }
            println!("\nグリッド:");
            for grid in GRID_PRESETS {
                println!("  {:<8} {}ページ", grid.to_string(), grid.page_count());
            }
        }

        Commands::Config { show } => {
            let path = Config::config_path()?;
            if show || !path.exists() {
                println!("設定:");
                println!("  パス: {}{}", path.display(), if path.exists() { "" } else { " (未作成、デフォルト値)" });
                println!("  用紙: {}", config.paper);
                println!("  グリッド: {}", config.grid);
                println!("  出力DPI: {}", config.export_dpi);
                println!("  プレビュー幅: {}px", config.preview_width);
                println!("  JPEG品質: {}", config.jpeg_quality);
                println!("  タイトル: {}", config.title);
            } else {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}
