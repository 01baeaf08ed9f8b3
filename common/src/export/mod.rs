//! 出力用のコア（ファイル書き込みは呼び出し側）

#[cfg(feature = "excel")]
pub mod excel_core;
