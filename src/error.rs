use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoryError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("データファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("データファイルが指定されていません。`--data PATH` か `happiness-story config --set-data-path PATH` で指定してください")]
    MissingDataPath,

    #[error("未対応のファイル形式です: {0}（csv/xlsx に対応）")]
    UnsupportedFormat(String),

    #[error("ワークブック読み込みエラー: {0}")]
    Workbook(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("描画エラー: {0}")]
    Render(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] happiness_story_common::Error),
}

impl StoryError {
    /// 入力データに起因する失敗か（シーンの代わりに読み込み失敗を表示する）
    pub fn is_data_load(&self) -> bool {
        use happiness_story_common::Error as CommonError;
        match self {
            StoryError::FileNotFound(_)
            | StoryError::MissingDataPath
            | StoryError::UnsupportedFormat(_)
            | StoryError::Workbook(_)
            | StoryError::Io(_) => true,
            StoryError::Common(inner) => matches!(
                inner,
                CommonError::DataLoad(_) | CommonError::InvalidFieldCoercion { .. }
            ),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoryError>;
