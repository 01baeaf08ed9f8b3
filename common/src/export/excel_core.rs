//! Excel生成（共通ライブラリ）
//!
//! シーンごとに1シートを作り、そのシーンの派生データを表として書き出す。

use crate::error::{Error, Result};
use crate::story::{SceneData, SceneView};
use crate::types::{Metric, Record};
use rust_xlsxwriter::*;

const NAME_COL_WIDTH: f64 = 28.0;
const VALUE_COL_WIDTH: f64 = 16.0;

fn excel_err(context: &str) -> impl Fn(XlsxError) -> Error + '_ {
    move |e| Error::Excel(format!("{}: {}", context, e))
}

/// シート名（31文字以内、記号を含まない）
fn sheet_name(view: &SceneView) -> String {
    format!("{} {}", view.scene.id + 1, view.chart_kind().as_str())
}

/// 全シーンのワークブックをバッファに生成
pub fn generate_workbook_buffer(views: &[SceneView]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let title_format = Format::new().set_bold().set_font_size(14.0);
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));
    let number_format = Format::new().set_num_format("0.000");

    for view in views {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(sheet_name(view))
            .map_err(excel_err("シート名設定エラー"))?;
        worksheet
            .set_column_width(0, NAME_COL_WIDTH)
            .map_err(excel_err("列幅設定エラー"))?;
        for col in 1..=9 {
            worksheet
                .set_column_width(col, VALUE_COL_WIDTH)
                .map_err(excel_err("列幅設定エラー"))?;
        }

        worksheet
            .write_string_with_format(0, 0, view.scene.title, &title_format)
            .map_err(excel_err("タイトル書き込みエラー"))?;
        worksheet
            .write_string(1, 0, &view.narrative)
            .map_err(excel_err("説明文書き込みエラー"))?;

        let table_row = 3;
        match &view.data {
            SceneData::TopCountries { records } => {
                write_records(worksheet, table_row, records, &header_format, &number_format)?;
            }
            SceneData::Scatter { x, records, correlation } => {
                worksheet
                    .write_string(table_row, 0, format!("r ({} vs Score)", x.label()))
                    .map_err(excel_err("相関書き込みエラー"))?;
                worksheet
                    .write_number_with_format(table_row, 1, *correlation, &number_format)
                    .map_err(excel_err("相関書き込みエラー"))?;
                write_records(worksheet, table_row + 2, records, &header_format, &number_format)?;
            }
            SceneData::FreedomComparison { extremes, groups, .. } => {
                let headers = ["Group", "Average Score", "Average Value", "Countries"];
                for (col, header) in headers.iter().enumerate() {
                    worksheet
                        .write_string_with_format(table_row, col as u16, *header, &header_format)
                        .map_err(excel_err("ヘッダ書き込みエラー"))?;
                }
                for (i, group) in groups.iter().enumerate() {
                    let row = table_row + 1 + i as u32;
                    worksheet
                        .write_string(row, 0, &group.label)
                        .map_err(excel_err("グループ書き込みエラー"))?;
                    worksheet
                        .write_number_with_format(row, 1, group.mean_score, &number_format)
                        .map_err(excel_err("グループ書き込みエラー"))?;
                    worksheet
                        .write_number_with_format(row, 2, group.mean_field, &number_format)
                        .map_err(excel_err("グループ書き込みエラー"))?;
                    worksheet
                        .write_number(row, 3, group.count as f64)
                        .map_err(excel_err("グループ書き込みエラー"))?;
                }
                let mut combined = extremes.high.clone();
                combined.extend(extremes.low.iter().cloned());
                write_records(worksheet, table_row + 4, &combined, &header_format, &number_format)?;
            }
            SceneData::Interactive(ctx) => {
                let outcome = ctx.outcome();
                worksheet
                    .write_string(table_row, 0, &outcome.status_text)
                    .map_err(excel_err("ステータス書き込みエラー"))?;
                write_records(
                    worksheet,
                    table_row + 2,
                    &outcome.visible_records,
                    &header_format,
                    &number_format,
                )?;
            }
        }
    }

    workbook
        .save_to_buffer()
        .map_err(excel_err("Excel保存エラー"))
}

/// 国名・順位・全指標の表を書き込む
fn write_records(
    worksheet: &mut Worksheet,
    start_row: u32,
    records: &[Record],
    header_format: &Format,
    number_format: &Format,
) -> Result<()> {
    worksheet
        .write_string_with_format(start_row, 0, "Country or region", header_format)
        .map_err(excel_err("ヘッダ書き込みエラー"))?;
    worksheet
        .write_string_with_format(start_row, 1, "Overall rank", header_format)
        .map_err(excel_err("ヘッダ書き込みエラー"))?;
    for (i, metric) in Metric::ALL.iter().enumerate() {
        worksheet
            .write_string_with_format(start_row, 2 + i as u16, metric.column(), header_format)
            .map_err(excel_err("ヘッダ書き込みエラー"))?;
    }

    for (offset, record) in records.iter().enumerate() {
        let row = start_row + 1 + offset as u32;
        worksheet
            .write_string(row, 0, &record.name)
            .map_err(excel_err("値書き込みエラー"))?;
        worksheet
            .write_number(row, 1, record.rank as f64)
            .map_err(excel_err("値書き込みエラー"))?;
        for (i, metric) in Metric::ALL.iter().enumerate() {
            worksheet
                .write_number_with_format(row, 2 + i as u16, metric.value(record), number_format)
                .map_err(excel_err("値書き込みエラー"))?;
        }
    }

    Ok(())
}
