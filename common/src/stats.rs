//! 記述統計モジュール
//!
//! ピアソン相関係数とグループ平均。いずれも入力を変更しない。

use crate::error::{Error, Result};
use crate::types::{Metric, Record};

/// ピアソンの積率相関係数
///
/// 和による公式 r = (nΣxy − ΣxΣy) / sqrt((nΣx² − (Σx)²)(nΣy² − (Σy)²)) で計算する。
///
/// # Returns
/// * 空入力、または分母がちょうど0（定数列）の場合は `0.0`
pub fn pearson_correlation(records: &[Record], x: Metric, y: Metric) -> f64 {
    let n = records.len();
    if n == 0 || is_constant(records, x) || is_constant(records, y) {
        return 0.0;
    }

    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2, mut sum_y2) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for record in records {
        let xv = x.value(record);
        let yv = y.value(record);
        sum_x += xv;
        sum_y += yv;
        sum_xy += xv * yv;
        sum_x2 += xv * xv;
        sum_y2 += yv * yv;
    }

    let n = n as f64;
    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();

    // 丸め誤差で分散項がわずかに負になると NaN になる
    if denominator == 0.0 || denominator.is_nan() {
        return 0.0;
    }
    numerator / denominator
}

/// 全レコードで値が同一か（分散0）
fn is_constant(records: &[Record], metric: Metric) -> bool {
    let mut values = records.iter().map(|r| metric.value(r));
    match values.next() {
        Some(first) => values.all(|v| v == first),
        None => true,
    }
}

/// 数値列の平均
///
/// # Errors
/// * 空入力は `Error::EmptyInput`
pub fn group_mean(records: &[Record], metric: Metric) -> Result<f64> {
    if records.is_empty() {
        return Err(Error::EmptyInput("mean of an empty group"));
    }
    let sum: f64 = records.iter().map(|r| metric.value(r)).sum();
    Ok(sum / records.len() as f64)
}

/// 数値列の最大値（空なら `None`）
pub fn max_value(records: &[Record], metric: Metric) -> Option<f64> {
    records.iter().map(|r| metric.value(r)).reduce(f64::max)
}
