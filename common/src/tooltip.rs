//! ツールチップ文言

use crate::derivation::GroupSummary;
use crate::scene::ChartKind;
use crate::types::{Metric, Record};

fn metric_line(metric: Metric, record: &Record) -> String {
    format!("{}: {:.3}", metric.label(), metric.value(record))
}

/// レコードにカーソルを合わせたときの表示行
///
/// 1行目は国名、2行目は順位。以降はチャートの種類に応じた指標（小数3桁）。
pub fn record_tooltip(kind: ChartKind, record: &Record) -> Vec<String> {
    let mut lines = vec![record.name.clone(), format!("Rank: {}", record.rank)];

    match kind {
        ChartKind::TopCountries => {
            lines.push(metric_line(Metric::Score, record));
        }
        ChartKind::GdpScatter => {
            lines.push(metric_line(Metric::GdpPerCapita, record));
            lines.push(format!("Happiness Score: {:.3}", record.score));
        }
        ChartKind::SocialSupport => {
            lines.push(metric_line(Metric::SocialSupport, record));
            lines.push(format!("Happiness Score: {:.3}", record.score));
        }
        ChartKind::FreedomComparison => {
            lines.push(metric_line(Metric::Freedom, record));
        }
        ChartKind::Interactive => {
            lines.extend(Metric::ALL.iter().map(|m| metric_line(*m, record)));
        }
    }

    lines
}

/// 比較グラフの棒に対する表示行
pub fn group_tooltip(summary: &GroupSummary) -> Vec<String> {
    vec![
        summary.label.clone(),
        format!("Average Happiness Score: {:.3}", summary.mean_score),
        format!("Average {} Score: {:.3}", summary.metric.label(), summary.mean_field),
        format!("Number of Countries: {}", summary.count),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finland() -> Record {
        Record {
            name: "Finland".to_string(),
            rank: 1,
            score: 7.769,
            gdp_per_capita: 1.34,
            social_support: 1.587,
            life_expectancy: 0.986,
            freedom: 0.596,
            generosity: 0.153,
            corruption: 0.393,
        }
    }

    #[test]
    fn test_top_countries_tooltip() {
        let lines = record_tooltip(ChartKind::TopCountries, &finland());
        assert_eq!(lines, vec!["Finland", "Rank: 1", "Score: 7.769"]);
    }

    #[test]
    fn test_gdp_tooltip() {
        let lines = record_tooltip(ChartKind::GdpScatter, &finland());
        assert_eq!(lines[2], "GDP: 1.340");
        assert_eq!(lines[3], "Happiness Score: 7.769");
    }

    #[test]
    fn test_interactive_tooltip_lists_every_metric() {
        let lines = record_tooltip(ChartKind::Interactive, &finland());
        assert_eq!(lines.len(), 2 + Metric::ALL.len());
        assert!(lines.contains(&"Corruption: 0.393".to_string()));
        assert!(lines.contains(&"Life Expectancy: 0.986".to_string()));
    }

    #[test]
    fn test_group_tooltip() {
        let summary = GroupSummary {
            label: "Highest Freedom Countries".to_string(),
            metric: Metric::Freedom,
            mean_score: 6.5,
            mean_field: 0.6126,
            count: 10,
        };
        let lines = group_tooltip(&summary);
        assert_eq!(lines[1], "Average Happiness Score: 6.500");
        assert_eq!(lines[2], "Average Freedom Score: 0.613");
        assert_eq!(lines[3], "Number of Countries: 10");
    }
}
