//! シーン定義
//!
//! ストーリーを構成する各ステップの静的な記述子。起動時に固定され、
//! 実行中に追加・削除されることはない。

use serde::Serialize;

/// シーンで描画するチャートの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    TopCountries,
    GdpScatter,
    SocialSupport,
    FreedomComparison,
    Interactive,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::TopCountries => "topCountries",
            ChartKind::GdpScatter => "gdpScatter",
            ChartKind::SocialSupport => "socialSupport",
            ChartKind::FreedomComparison => "freedomComparison",
            ChartKind::Interactive => "interactive",
        }
    }
}

/// シーン記述子
///
/// `description_template` のプレースホルダ:
/// `{r}` 相関係数, `{high_mean}` / `{low_mean}` グループ平均, `{k}` グループ件数,
/// `{count}` データセット件数
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: usize,
    pub title: &'static str,
    pub description_template: &'static str,
    pub chart_kind: ChartKind,
    /// 注目させる国（データにあれば強調表示）
    pub highlight: Option<&'static str>,
}

/// ストーリーの全シーン（表示順）
pub fn default_scenes() -> Vec<Scene> {
    vec![
        Scene {
            id: 0,
            title: "The Happiest Nations in 2019",
            description_template: "Let's start by exploring the top 20 happiest countries according to the 2019 World Happiness Report. Nordic countries dominate the list with Finland, Denmark, Norway, Iceland, and Sweden in the top 20.",
            chart_kind: ChartKind::TopCountries,
            highlight: None,
        },
        Scene {
            id: 1,
            title: "Does Money Buy Happiness?",
            description_template: "GDP per capita shows a strong positive correlation (r={r}) with happiness. However, one country that sticks out is Costa Rica (rank 12), which has lower GDP but higher happiness than many wealthier nations.",
            chart_kind: ChartKind::GdpScatter,
            highlight: Some("Costa Rica"),
        },
        Scene {
            id: 2,
            title: "The Power of Social Support",
            description_template: "Social support also shows a strong positive correlation (r={r}) with happiness scores. Countries with stronger social networks tend to be happier. Iceland, for example, has the highest social support score in the world and one of the highest happiness scores.",
            chart_kind: ChartKind::SocialSupport,
            highlight: Some("Iceland"),
        },
        Scene {
            id: 3,
            title: "Freedom and Happiness",
            description_template: "Freedom to make life choices shows a positive correlation (r={r}) with happiness. The {k} countries with the most freedom average a happiness score of {high_mean}, against {low_mean} for the {k} with the least. Countries where people feel they have more control over their lives tend to be happier.",
            chart_kind: ChartKind::FreedomComparison,
            highlight: None,
        },
        Scene {
            id: 4,
            title: "Explore All Countries",
            description_template: "Now you can explore all {count} countries in an interactive bar chart. Countries are sorted by happiness score, with the happiest countries at the top. Use the search box to filter and find specific countries - when you search, only matching countries will be displayed.",
            chart_kind: ChartKind::Interactive,
            highlight: None,
        },
    ]
}

/// テンプレートに埋め込む値
#[derive(Debug, Clone, Copy, Default)]
pub struct NarrativeValues {
    pub correlation: Option<f64>,
    pub high_mean: Option<f64>,
    pub low_mean: Option<f64>,
    pub group_size: Option<usize>,
    pub count: Option<usize>,
}

impl Scene {
    /// テンプレートに値を埋め込んだ説明文（数値は小数3桁）
    pub fn narrative(&self, values: &NarrativeValues) -> String {
        let mut text = self.description_template.to_string();
        let decimals = [
            ("{r}", values.correlation),
            ("{high_mean}", values.high_mean),
            ("{low_mean}", values.low_mean),
        ];
        for (placeholder, value) in decimals {
            if let Some(value) = value {
                text = text.replace(placeholder, &format!("{:.3}", value));
            }
        }
        if let Some(k) = values.group_size {
            text = text.replace("{k}", &k.to_string());
        }
        if let Some(count) = values.count {
            text = text.replace("{count}", &count.to_string());
        }
        text
    }
}
