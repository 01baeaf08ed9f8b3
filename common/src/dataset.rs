//! データセット読み込みモジュール
//!
//! 区切りテキスト（CSV）または任意の表形式の行から `Record` を組み立てる。
//! 数値変換に失敗した値は NaN にせず、行と列を示すエラーで即座に失敗させる。

use crate::error::{Error, Result};
use crate::types::{Metric, Record};
use std::collections::HashSet;

pub const RANK_COLUMN: &str = "Overall rank";
pub const NAME_COLUMN: &str = "Country or region";

/// 読み込み済みのデータセット（読み込み順を保持）
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

/// ヘッダ行から求めた列位置
struct ColumnMap {
    rank: usize,
    name: usize,
    metrics: Vec<(Metric, usize)>,
}

impl ColumnMap {
    fn from_header<S: AsRef<str>>(header: &[S]) -> Result<Self> {
        let find = |column: &str| {
            header
                .iter()
                .position(|h| h.as_ref().trim().trim_start_matches('\u{feff}') == column)
                .ok_or_else(|| Error::DataLoad(format!("missing column '{}'", column)))
        };

        let mut metrics = Vec::with_capacity(Metric::ALL.len());
        for metric in Metric::ALL {
            metrics.push((metric, find(metric.column())?));
        }

        Ok(Self {
            rank: find(RANK_COLUMN)?,
            name: find(NAME_COLUMN)?,
            metrics,
        })
    }
}

impl Dataset {
    /// CSV文字列から読み込み
    pub fn from_csv_str(content: &str) -> Result<Self> {
        // 空行もそのまま渡す（行番号を保つため、スキップは from_rows 側）
        let mut lines = content.lines().skip_while(|line| line.trim().is_empty());

        let header = lines
            .next()
            .map(parse_csv_line)
            .ok_or_else(|| Error::DataLoad("input has no header row".into()))?;

        Self::from_rows(&header[..], lines.map(parse_csv_line))
    }

    /// ヘッダと行の列から読み込み（XLSXなど他の表形式用）
    pub fn from_rows<H, I, R, S>(header: &[H], rows: I) -> Result<Self>
    where
        H: AsRef<str>,
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let columns = ColumnMap::from_header(header)?;
        let mut records = Vec::new();

        for (index, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            let row_number = index + 1;

            // 完全な空行はスキップ
            if row.iter().all(|cell| cell.as_ref().trim().is_empty()) {
                continue;
            }

            records.push(parse_record(row, row_number, &columns)?);
        }

        Self::from_records(records)
    }

    /// レコード列から構築
    ///
    /// 名前と順位の一意性に加え、順位の並びがスコアの降順と矛盾しないことを検証する。
    pub fn from_records(records: Vec<Record>) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::DataLoad("dataset contains no records".into()));
        }

        let mut names = HashSet::new();
        let mut ranks = HashSet::new();
        for record in &records {
            if !names.insert(record.name.as_str()) {
                return Err(Error::DataLoad(format!("duplicate country '{}'", record.name)));
            }
            if !ranks.insert(record.rank) {
                return Err(Error::DataLoad(format!("duplicate rank {}", record.rank)));
            }
        }

        let mut by_rank: Vec<&Record> = records.iter().collect();
        by_rank.sort_by_key(|r| r.rank);
        for pair in by_rank.windows(2) {
            let (above, below) = (pair[0], pair[1]);
            if below.score > above.score {
                return Err(Error::DataLoad(format!(
                    "rank {} '{}' has score {} above rank {} '{}' ({})",
                    below.rank, below.name, below.score, above.rank, above.name, above.score
                )));
            }
        }

        tracing::info!(records = records.len(), "dataset loaded");
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 名前で検索（完全一致）
    pub fn find(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.name == name)
    }
}

fn parse_record<S: AsRef<str>>(row: &[S], row_number: usize, columns: &ColumnMap) -> Result<Record> {
    let cell = |index: usize| row.get(index).map(|c| c.as_ref().trim()).unwrap_or("");

    let name = cell(columns.name);
    if name.is_empty() {
        return Err(Error::InvalidFieldCoercion {
            row: row_number,
            field: NAME_COLUMN.to_string(),
            value: String::new(),
        });
    }

    let raw_rank = cell(columns.rank);
    let rank = parse_rank(raw_rank).ok_or_else(|| Error::InvalidFieldCoercion {
        row: row_number,
        field: RANK_COLUMN.to_string(),
        value: raw_rank.to_string(),
    })?;

    let mut record = Record {
        name: name.to_string(),
        rank,
        ..Default::default()
    };

    for (metric, index) in &columns.metrics {
        let raw = cell(*index);
        let value = parse_metric(raw).ok_or_else(|| Error::InvalidFieldCoercion {
            row: row_number,
            field: metric.column().to_string(),
            value: raw.to_string(),
        })?;
        metric.set(&mut record, value);
    }

    Ok(record)
}

/// 正の整数。表計算ソフト由来の "1.0" も受け付ける
fn parse_rank(raw: &str) -> Option<u32> {
    if let Ok(rank) = raw.parse::<u32>() {
        return (rank > 0).then_some(rank);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.fract() == 0.0 && value >= 1.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}

fn parse_metric(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// CSV行をパース（ダブルクォート内のカンマと "" エスケープに対応）
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    // 最後のフィールド
    fields.push(current.trim().to_string());
    fields
}
