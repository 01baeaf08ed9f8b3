//! 端末向けレンダラ
//!
//! 棒グラフは文字の棒、散布図は文字グリッドで描く。

use happiness_story_common::derivation::GroupSummary;
use happiness_story_common::render::{ElementId, HoverRegistry, RenderingAdapter, TooltipHandle};
use happiness_story_common::stats::max_value;
use happiness_story_common::tooltip::group_tooltip;
use happiness_story_common::{ChartKind, Metric, Record, SceneData, SceneView};
use std::fmt::{self, Write};

const PLOT_COLUMNS: usize = 60;
const PLOT_ROWS: usize = 16;

pub struct TerminalRenderer {
    bar_width: usize,
    kind: ChartKind,
    hover: HoverRegistry,
}

impl TerminalRenderer {
    pub fn new(bar_width: usize) -> Self {
        Self {
            bar_width: bar_width.max(1),
            kind: ChartKind::TopCountries,
            hover: HoverRegistry::default(),
        }
    }

    /// ツールチップの表示行
    pub fn tooltip(&self, handle: TooltipHandle) -> Option<&[String]> {
        self.hover.lines(handle)
    }

    fn bars(&self, out: &mut String, records: &[Record], max: f64) -> fmt::Result {
        let name_width = records.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);
        for record in records {
            writeln!(
                out,
                "{:>4} {:<name_width$} {:<bar_width$} {:.3}",
                record.rank,
                record.name,
                bar(record.score, max, self.bar_width),
                record.score,
                name_width = name_width,
                bar_width = self.bar_width,
            )?;
        }
        Ok(())
    }

    fn scatter(&self, out: &mut String, x: Metric, records: &[Record], highlight: Option<&Record>) -> fmt::Result {
        let x_max = max_value(records, x).unwrap_or(0.0);
        let y_max = max_value(records, Metric::Score).unwrap_or(0.0);
        let mut grid = vec![vec![' '; PLOT_COLUMNS]; PLOT_ROWS];

        let cell = |record: &Record| {
            let col = scale_index(x.value(record), x_max, PLOT_COLUMNS);
            let row = PLOT_ROWS - 1 - scale_index(record.score, y_max, PLOT_ROWS);
            (row, col)
        };

        for record in records {
            let (row, col) = cell(record);
            grid[row][col] = '•';
        }
        if let Some(record) = highlight {
            let (row, col) = cell(record);
            grid[row][col] = '◎';
        }

        writeln!(out, "Happiness Score (0 to {:.3})", y_max)?;
        for line in grid {
            writeln!(out, "│{}", line.into_iter().collect::<String>())?;
        }
        writeln!(out, "└{}", "─".repeat(PLOT_COLUMNS))?;
        writeln!(out, " {} (0 to {:.3})", x.column(), x_max)?;
        if let Some(record) = highlight {
            writeln!(out, " ◎ {} (rank {})", record.name, record.rank)?;
        }
        Ok(())
    }

    fn comparison(&self, out: &mut String, groups: &[GroupSummary; 2], high: &[Record], low: &[Record]) -> fmt::Result {
        // 元のグラフと同じく最大値の1.1倍を上限にする
        let max = groups.iter().map(|g| g.mean_score).fold(0.0, f64::max) * 1.1;
        for group in groups {
            writeln!(
                out,
                "{:<28} {:<width$} {:.3}",
                group.label,
                bar(group.mean_score, max, self.bar_width),
                group.mean_score,
                width = self.bar_width,
            )?;
        }
        writeln!(out)?;
        for group in groups {
            writeln!(out, "  {}", group_tooltip(group)[1..].join(" / "))?;
        }
        writeln!(out)?;
        writeln!(out, "{}: {}", groups[0].label, names(high))?;
        writeln!(out, "{}: {}", groups[1].label, names(low))?;
        Ok(())
    }
}

impl RenderingAdapter for TerminalRenderer {
    type Container = String;
    type Error = fmt::Error;

    fn render(&mut self, view: &SceneView, out: &mut String) -> fmt::Result {
        self.kind = view.chart_kind();
        self.hover.clear();

        writeln!(out, "{}", view.scene.title)?;
        writeln!(out, "{}", "=".repeat(view.scene.title.chars().count()))?;
        writeln!(out, "{}", view.narrative)?;
        writeln!(out)?;

        match &view.data {
            SceneData::TopCountries { records } => {
                let max = max_value(records, Metric::Score).unwrap_or(0.0);
                self.bars(out, records, max)?;
            }
            SceneData::Scatter { x, records, correlation } => {
                self.scatter(out, *x, records, view.highlight.as_ref())?;
                writeln!(out, " r = {:.3}", correlation)?;
            }
            SceneData::FreedomComparison { extremes, groups, .. } => {
                self.comparison(out, groups, &extremes.high, &extremes.low)?;
            }
            SceneData::Interactive(ctx) => {
                let outcome = ctx.outcome();
                writeln!(out, "{}", outcome.status_text)?;
                writeln!(out)?;
                // 絞り込んでも縦軸は全件の最大スコアに固定
                self.bars(out, &outcome.visible_records, outcome.y_max)?;
            }
        }
        Ok(())
    }

    fn attach_hover(&mut self, element: ElementId, record: &Record) -> TooltipHandle {
        self.hover.attach(self.kind, element, record)
    }

    fn detach_hover(&mut self, handle: TooltipHandle) {
        self.hover.detach(handle);
    }
}

fn names(records: &[Record]) -> String {
    records.iter().map(|r| r.name.as_str()).collect::<Vec<_>>().join(", ")
}

/// 値を `[0, max]` で正規化した棒
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * width as f64).round().clamp(0.0, width as f64) as usize;
    "█".repeat(len)
}

fn scale_index(value: f64, max: f64, cells: usize) -> usize {
    if max <= 0.0 {
        return 0;
    }
    (((value / max) * (cells - 1) as f64).round() as usize).min(cells - 1)
}
