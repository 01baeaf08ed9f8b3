use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "happiness-story")]
#[command(about = "World Happiness Report 2019 をシーン形式でたどるデータストーリー", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 対話式でシーンを順にたどる
    Play {
        /// データファイル（CSV/XLSX）
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// 指定したシーンを1つだけ表示
    Scene {
        /// シーン番号（1始まり）
        #[arg(required = true)]
        index: usize,

        /// データファイル（CSV/XLSX）
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// 検索語（最後のシーンのみ有効）
        #[arg(short, long)]
        query: Option<String>,
    },

    /// 全シーンの派生データを書き出す
    Export {
        /// データファイル（CSV/XLSX）
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// 出力形式 (json/excel/svg/all)
        #[arg(short, long, default_value = "all")]
        format: ExportFormat,

        /// 出力ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 既定のデータファイルを設定
        #[arg(long)]
        set_data_path: Option<PathBuf>,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Excel,
    Svg,
    #[default]
    All,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "svg" => Ok(ExportFormat::Svg),
            "all" => Ok(ExportFormat::All),
            _ => Err(format!("Unknown format: {}. Use json, excel, svg, or all", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Svg => write!(f, "svg"),
            ExportFormat::All => write!(f, "all"),
        }
    }
}
