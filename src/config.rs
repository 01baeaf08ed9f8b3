use crate::error::{Result, StoryError};
use happiness_story_common::derivation::{EXTREMES_K, TOP_N};
use happiness_story_common::StoryOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// データファイルの場所を上書きする環境変数
pub const DATA_ENV_VAR: &str = "HAPPINESS_DATA";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_path: Option<PathBuf>,
    pub top_n: usize,
    pub extremes_k: usize,
    /// 端末描画の棒の最大文字数
    pub bar_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            top_n: TOP_N,
            extremes_k: EXTREMES_K,
            bar_width: 50,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| StoryError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("happiness-story").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(StoryError::Config("top_n は1以上にしてください".into()));
        }
        if self.extremes_k == 0 {
            return Err(StoryError::Config("extremes_k は1以上にしてください".into()));
        }
        if self.bar_width == 0 {
            return Err(StoryError::Config("bar_width は1以上にしてください".into()));
        }
        Ok(())
    }

    /// 使用するデータファイル（引数 > 環境変数 > 設定ファイル）
    pub fn resolve_data_path(&self, cli_path: Option<PathBuf>) -> Result<PathBuf> {
        cli_path
            .or_else(|| std::env::var_os(DATA_ENV_VAR).map(PathBuf::from))
            .or_else(|| self.data_path.clone())
            .ok_or(StoryError::MissingDataPath)
    }

    pub fn set_data_path(&mut self, path: PathBuf) -> Result<()> {
        self.data_path = Some(path);
        self.save()
    }

    pub fn story_options(&self) -> StoryOptions {
        StoryOptions {
            top_n: self.top_n,
            extremes_k: self.extremes_k,
        }
    }
}
