//! データセット読み込み（CSV / XLSX）

use crate::error::{Result, StoryError};
use calamine::{open_workbook_auto, Reader};
use happiness_story_common::Dataset;
use std::path::Path;

const CSV_EXTENSIONS: &[&str] = &["csv", "txt"];
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// 拡張子に応じてデータセットを読み込む
pub async fn load_dataset(path: &Path) -> Result<Dataset> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(StoryError::FileNotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let dataset = if CSV_EXTENSIONS.contains(&extension.as_str()) {
        let content = tokio::fs::read_to_string(path).await?;
        Dataset::from_csv_str(&content)?
    } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        load_workbook(path)?
    } else {
        return Err(StoryError::UnsupportedFormat(path.display().to_string()));
    };

    tracing::info!(path = %path.display(), records = dataset.len(), "loaded dataset");
    Ok(dataset)
}

/// 先頭シートの1行目をヘッダとして読み込む
pub fn load_workbook(path: &Path) -> Result<Dataset> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| StoryError::Workbook(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| StoryError::Workbook("シートがありません".into()))?
        .map_err(|e| StoryError::Workbook(e.to_string()))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<String>>());

    let header = rows
        .next()
        .ok_or_else(|| StoryError::Workbook("ヘッダ行がありません".into()))?;

    Ok(Dataset::from_rows(&header[..], rows)?)
}
