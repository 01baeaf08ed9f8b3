//! エラーケーステスト
//!
//! 読み込み失敗や不足データでのエラーハンドリングを検証

mod fixtures;

use happiness_story::error::StoryError;
use happiness_story::loader::load_dataset;
use happiness_story_common::{Error, Story, StoryOptions};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないファイルを読み込んだ場合
#[tokio::test]
async fn test_load_nonexistent_file() {
    let result = load_dataset(Path::new("/nonexistent/path/2019.csv")).await;
    let err = result.unwrap_err();
    assert!(matches!(err, StoryError::FileNotFound(_)));
    assert!(err.is_data_load());
}

/// 数値に変換できないセルがある場合
#[tokio::test]
async fn test_load_bad_number() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.csv");
    let content = format!("{}\n1,Finland,high,1.340,1.587,0.986,0.596,0.153,0.393\n", fixtures::HEADER);
    std::fs::write(&path, content).unwrap();

    let err = load_dataset(&path).await.unwrap_err();
    assert!(err.is_data_load());
    match err {
        StoryError::Common(Error::InvalidFieldCoercion { row, field, value }) => {
            assert_eq!(row, 1);
            assert_eq!(field, "Score");
            assert_eq!(value, "high");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

/// 必須列が欠けている場合
#[tokio::test]
async fn test_load_missing_column() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("no-score.csv");
    std::fs::write(&path, "Overall rank,Country or region\n1,Finland\n").unwrap();

    let err = load_dataset(&path).await.unwrap_err();
    assert!(err.is_data_load());
    assert!(err.to_string().contains("Score"));
}

/// ヘッダしかない場合
#[tokio::test]
async fn test_load_header_only() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, format!("{}\n", fixtures::HEADER)).unwrap();

    let err = load_dataset(&path).await.unwrap_err();
    assert!(matches!(err, StoryError::Common(Error::DataLoad(_))));
}

/// 比較シーンに必要な国数が足りない場合、移動は失敗し位置は変わらない
#[tokio::test]
async fn test_too_few_countries_for_comparison() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("small.csv");
    let content = format!("{}\n{}\n", fixtures::HEADER, fixtures::ROWS[..5].join("\n"));
    std::fs::write(&path, content).unwrap();

    let dataset = load_dataset(&path).await.unwrap();
    let mut story = Story::new(dataset, StoryOptions::default()).unwrap();
    story.go_to(2).unwrap();

    let err = story.next().unwrap_err();
    assert!(matches!(err, Error::InsufficientData { needed: 20, available: 5 }));
    assert_eq!(story.current_index(), 2);
}

/// エラーメッセージの表示形式
#[test]
fn test_error_display() {
    let err = StoryError::UnsupportedFormat("data.parquet".into());
    assert!(err.to_string().contains("data.parquet"));
    assert!(err.is_data_load());

    let err = StoryError::Config("top_n は1以上にしてください".into());
    assert!(err.to_string().starts_with("設定エラー"));
    assert!(!err.is_data_load());
}
