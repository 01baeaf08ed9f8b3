//! 検索フィルタ（対話シーン専用）
//!
//! 対話シーンの間だけ存在するコンテキスト。シーンを離れると破棄される。
//! 表示レコードはクエリから毎回導出し、独立した状態として保持しない。

use crate::derivation::{filter_by_name_substring, full_sorted_descending_by_score};
use crate::stats::max_value;
use crate::types::{Metric, Record};
use serde::Serialize;

/// 対話シーンの状態
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractiveSceneContext {
    /// スコア降順に並べたコピー
    sorted: Vec<Record>,
    /// 縦軸の上限（常に全件の最大スコア）
    y_max: f64,
    /// 小文字化済みのクエリ
    query: String,
}

/// 1回の入力に対する結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub visible_records: Vec<Record>,
    pub status_text: String,
    pub y_max: f64,
}

impl InteractiveSceneContext {
    pub fn new(records: &[Record]) -> Self {
        Self {
            sorted: full_sorted_descending_by_score(records),
            y_max: max_value(records, Metric::Score).unwrap_or(0.0),
            query: String::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sorted_records(&self) -> &[Record] {
        &self.sorted
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// 現在のクエリに一致するレコード（スコア降順）
    pub fn visible_records(&self) -> Vec<Record> {
        filter_by_name_substring(&self.sorted, &self.query)
    }

    /// 入力変更ごとに呼ばれる
    pub fn on_query_change(&mut self, raw_input: &str) -> SearchOutcome {
        self.query = raw_input.to_lowercase();
        tracing::debug!(query = %self.query, "search query changed");
        self.outcome()
    }

    /// 現在のクエリでの表示レコードとステータス文
    pub fn outcome(&self) -> SearchOutcome {
        let visible_records = self.visible_records();
        let status_text = status_text(&self.query, &visible_records, self.sorted.len());
        SearchOutcome {
            visible_records,
            status_text,
            y_max: self.y_max,
        }
    }
}

fn status_text(query: &str, visible: &[Record], total: usize) -> String {
    if query.is_empty() {
        return format!(
            "All {} countries shown. Use the search box to filter and see specific countries.",
            total
        );
    }
    match visible {
        [] => format!(
            "No countries found matching \"{}\". Try a different search term.",
            query
        ),
        [only] => format!(
            "Showing {} (Rank: {}, Score: {:.3})",
            only.name, only.rank, only.score
        ),
        _ => format!("Showing {} countries matching \"{}\".", visible.len(), query),
    }
}
