use anyhow::{bail, Result};
use clap::Parser;
use happiness_story::{cli, config, error, export, loader, render, session};
use happiness_story_common::{RenderingAdapter, Story, DATA_LOAD_FAILURE_MESSAGE};
use cli::{Cli, Commands};
use config::Config;
use error::StoryError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn load_story(config: &Config, data: Option<PathBuf>) -> Result<Story> {
    let path = config.resolve_data_path(data)?;
    let dataset = loader::load_dataset(&path).await?;
    Ok(Story::new(dataset, config.story_options())?)
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Play { data } => {
            println!("🌍 happiness-story - World Happiness Report 2019\n");
            let story = load_story(&config, data).await?;
            session::run_play(story, config.bar_width)?;
        }

        Commands::Scene { index, data, query } => {
            let mut story = load_story(&config, data).await?;

            let target = i64::try_from(index).unwrap_or(i64::MAX).saturating_sub(1);
            if !story.go_to(target)? {
                bail!("シーン番号は 1〜{} で指定してください", story.scene_count());
            }

            if let Some(query) = query {
                if story.search(&query).is_none() {
                    println!("⚠ 検索は最後のシーン（{}）でのみ使えます", story.scene_count());
                }
            }

            let mut renderer = render::TerminalRenderer::new(config.bar_width);
            let mut out = String::new();
            renderer
                .render(story.view(), &mut out)
                .map_err(|e| StoryError::Render(e.to_string()))?;
            println!("{}", out);
            println!("{}", session::progress_line(&story));
        }

        Commands::Export { data, format, output } => {
            println!("📄 happiness-story - エクスポート\n");

            let story = load_story(&config, data).await?;
            let views = export::all_views(&story)?;
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));

            export::export_views(&views, &format, &output_dir)?;

            println!("\n✅ エクスポート完了 ({}シーン)", views.len());
        }

        Commands::Config { show, set_data_path } => {
            let mut config = config;

            if let Some(path) = set_data_path {
                config.set_data_path(path)?;
                println!("✔ データファイルを設定しました");
            }

            if show {
                println!("設定:");
                println!(
                    "  データファイル: {}",
                    config
                        .data_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定".to_string())
                );
                println!("  上位件数: {}", config.top_n);
                println!("  比較グループの国数: {}", config.extremes_k);
                println!("  棒の幅: {}", config.bar_width);
                if let Ok(path) = Config::config_path() {
                    println!("  設定ファイル: {}", path.display());
                }
            }
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // 読み込みに失敗したらシーンの代わりに固定の文言を出す
            if err.downcast_ref::<StoryError>().is_some_and(StoryError::is_data_load) {
                eprintln!("{}", DATA_LOAD_FAILURE_MESSAGE);
            }
            eprintln!("❌ {:#}", err);
            ExitCode::FAILURE
        }
    }
}
