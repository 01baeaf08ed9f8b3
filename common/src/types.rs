//! レコード型の定義
//!
//! CLIとレンダラで共有される型:
//! - Record: データセットの1行（1か国分の幸福度指標）
//! - Metric: レコードの数値列を指すセレクタ

use serde::{Deserialize, Serialize};

/// 1か国分の幸福度データ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub name: String,

    /// 1始まりの順位（スコア降順）
    pub rank: u32,

    pub score: f64,

    #[serde(default)]
    pub gdp_per_capita: f64,

    #[serde(default)]
    pub social_support: f64,

    #[serde(default)]
    pub life_expectancy: f64,

    #[serde(default)]
    pub freedom: f64,

    #[serde(default)]
    pub generosity: f64,

    #[serde(default)]
    pub corruption: f64,
}

/// 数値列のセレクタ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Score,
    GdpPerCapita,
    SocialSupport,
    LifeExpectancy,
    Freedom,
    Generosity,
    Corruption,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::Score,
        Metric::GdpPerCapita,
        Metric::SocialSupport,
        Metric::LifeExpectancy,
        Metric::Freedom,
        Metric::Generosity,
        Metric::Corruption,
    ];

    /// レコードから値を取り出す
    pub fn value(&self, record: &Record) -> f64 {
        match self {
            Metric::Score => record.score,
            Metric::GdpPerCapita => record.gdp_per_capita,
            Metric::SocialSupport => record.social_support,
            Metric::LifeExpectancy => record.life_expectancy,
            Metric::Freedom => record.freedom,
            Metric::Generosity => record.generosity,
            Metric::Corruption => record.corruption,
        }
    }

    /// 入力ファイルのヘッダ名
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Score => "Score",
            Metric::GdpPerCapita => "GDP per capita",
            Metric::SocialSupport => "Social support",
            Metric::LifeExpectancy => "Healthy life expectancy",
            Metric::Freedom => "Freedom to make life choices",
            Metric::Generosity => "Generosity",
            Metric::Corruption => "Perceptions of corruption",
        }
    }

    /// 表示用の短いラベル
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Score => "Score",
            Metric::GdpPerCapita => "GDP",
            Metric::SocialSupport => "Social Support",
            Metric::LifeExpectancy => "Life Expectancy",
            Metric::Freedom => "Freedom",
            Metric::Generosity => "Generosity",
            Metric::Corruption => "Corruption",
        }
    }

    pub(crate) fn set(&self, record: &mut Record, value: f64) {
        match self {
            Metric::Score => record.score = value,
            Metric::GdpPerCapita => record.gdp_per_capita = value,
            Metric::SocialSupport => record.social_support = value,
            Metric::LifeExpectancy => record.life_expectancy = value,
            Metric::Freedom => record.freedom = value,
            Metric::Generosity => record.generosity = value,
            Metric::Corruption => record.corruption = value,
        }
    }
}
