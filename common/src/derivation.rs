//! シーン別の派生ビュー生成
//!
//! どの関数も入力スライスを変更せず、並べ替えたコピーを返す。
//! 共有データセットの順序は常に読み込み順のまま保たれる。

use crate::error::{Error, Result};
use crate::stats::group_mean;
use crate::types::{Metric, Record};
use serde::Serialize;

/// 上位国シーンで表示する件数
pub const TOP_N: usize = 20;
/// 自由度比較シーンの各グループの件数
pub const EXTREMES_K: usize = 10;

/// 指定列の降順に並べたコピー（同値は入力順を保持）
pub fn sorted_descending_by(records: &[Record], metric: Metric) -> Vec<Record> {
    let mut sorted = records.to_vec();
    // sort_by は安定ソート
    sorted.sort_by(|a, b| metric.value(b).total_cmp(&metric.value(a)));
    sorted
}

/// スコア降順の全件
pub fn full_sorted_descending_by_score(records: &[Record]) -> Vec<Record> {
    sorted_descending_by(records, Metric::Score)
}

/// スコア上位 `n` 件
///
/// 入力が整列済みかどうかに関わらず、スコア降順に並べてから切り出す。
pub fn top_n(records: &[Record], n: usize) -> Vec<Record> {
    let mut sorted = full_sorted_descending_by_score(records);
    sorted.truncate(n);
    sorted
}

/// 指定列の上位・下位グループ
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extremes {
    pub metric: Metric,
    /// 値が大きい `k` 件（降順）
    pub high: Vec<Record>,
    /// 値が小さい `k` 件（降順）
    pub low: Vec<Record>,
}

/// 指定列の上位 `k` 件と下位 `k` 件
///
/// # Errors
/// * `k == 0` は `Error::EmptyInput`
/// * `records.len() < 2k` は `Error::InsufficientData`（グループを重複させない）
pub fn extremes_by_field(records: &[Record], metric: Metric, k: usize) -> Result<Extremes> {
    if k == 0 {
        return Err(Error::EmptyInput("extremes group size must be at least 1"));
    }
    let needed = k * 2;
    if records.len() < needed {
        return Err(Error::InsufficientData {
            needed,
            available: records.len(),
        });
    }

    let sorted = sorted_descending_by(records, metric);
    let low_start = sorted.len() - k;
    Ok(Extremes {
        metric,
        high: sorted[..k].to_vec(),
        low: sorted[low_start..].to_vec(),
    })
}

/// 国名の部分一致（大文字小文字を区別しない）
///
/// 空クエリは全件を元の順序のまま返す。
pub fn filter_by_name_substring(records: &[Record], query: &str) -> Vec<Record> {
    let query = query.to_lowercase();
    records
        .iter()
        .filter(|r| r.name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// 上位/下位グループの要約
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub label: String,
    pub metric: Metric,
    pub mean_score: f64,
    pub mean_field: f64,
    pub count: usize,
}

/// 2グループの平均スコア・平均指標値を比較用にまとめる
pub fn group_comparison(extremes: &Extremes) -> Result<[GroupSummary; 2]> {
    let summarize = |label: String, group: &[Record]| -> Result<GroupSummary> {
        Ok(GroupSummary {
            label,
            metric: extremes.metric,
            mean_score: group_mean(group, Metric::Score)?,
            mean_field: group_mean(group, extremes.metric)?,
            count: group.len(),
        })
    };

    let name = extremes.metric.label();
    Ok([
        summarize(format!("Highest {} Countries", name), &extremes.high)?,
        summarize(format!("Lowest {} Countries", name), &extremes.low)?,
    ])
}
