//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 入力データが読めない・形式が不正
    #[error("Data load error: {0}")]
    DataLoad(String),

    /// 数値列が数値に変換できない
    #[error("Invalid value {value:?} in column '{field}' (row {row})")]
    InvalidFieldCoercion {
        row: usize,
        field: String,
        value: String,
    },

    /// 上位/下位グループを分離するのにレコードが足りない
    #[error("Insufficient data: need at least {needed} records, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// 空入力が許されない計算に空集合が渡された
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    #[cfg(feature = "excel")]
    #[error("Excel error: {0}")]
    Excel(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
