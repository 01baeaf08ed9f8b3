//! Excel出力（CLI版）
//!
//! ワークブックの中身は共通ライブラリで組み立て、ここではファイルに書き出すだけ。

use anyhow::{Context, Result};
use happiness_story_common::export::excel_core::generate_workbook_buffer;
use happiness_story_common::SceneView;
use std::path::Path;

pub fn generate_excel(views: &[SceneView], output_path: &Path) -> Result<()> {
    let buffer = generate_workbook_buffer(views)?;
    std::fs::write(output_path, buffer)
        .with_context(|| format!("Excelを書き込めません: {}", output_path.display()))?;
    Ok(())
}
