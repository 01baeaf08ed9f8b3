//! 統合テスト用の2019年データ（抜粋）

#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub const HEADER: &str = "Overall rank,Country or region,Score,GDP per capita,Social support,Healthy life expectancy,Freedom to make life choices,Generosity,Perceptions of corruption";

pub const ROWS: &[&str] = &[
    "1,Finland,7.769,1.340,1.587,0.986,0.596,0.153,0.393",
    "2,Denmark,7.600,1.383,1.573,0.996,0.592,0.252,0.410",
    "3,Norway,7.554,1.488,1.582,1.028,0.603,0.271,0.341",
    "4,Iceland,7.494,1.380,1.624,1.026,0.591,0.354,0.118",
    "5,Netherlands,7.488,1.396,1.522,0.999,0.557,0.322,0.298",
    "6,Switzerland,7.480,1.452,1.526,1.052,0.572,0.263,0.343",
    "7,Sweden,7.343,1.387,1.487,1.009,0.574,0.267,0.373",
    "8,New Zealand,7.307,1.303,1.557,1.026,0.585,0.330,0.380",
    "9,Canada,7.278,1.365,1.505,1.039,0.584,0.285,0.308",
    "10,Austria,7.246,1.376,1.475,1.016,0.532,0.244,0.226",
    "11,Australia,7.228,1.372,1.548,1.036,0.557,0.332,0.290",
    "12,Costa Rica,7.167,1.034,1.441,0.963,0.558,0.144,0.093",
    "13,Israel,7.139,1.276,1.455,1.029,0.371,0.261,0.082",
    "14,Luxembourg,7.090,1.609,1.479,1.012,0.526,0.194,0.316",
    "15,United Kingdom,7.054,1.333,1.538,0.996,0.450,0.348,0.278",
    "16,Ireland,7.021,1.499,1.553,0.999,0.516,0.298,0.310",
    "17,Germany,6.985,1.373,1.454,0.987,0.495,0.261,0.265",
    "18,Belgium,6.923,1.356,1.504,0.986,0.473,0.160,0.210",
    "19,United States,6.892,1.433,1.457,0.874,0.454,0.280,0.128",
    "20,Czech Republic,6.852,1.269,1.487,0.920,0.457,0.046,0.036",
    "152,Rwanda,3.334,0.359,0.711,0.614,0.555,0.217,0.411",
    "153,Tanzania,3.231,0.476,0.885,0.499,0.417,0.276,0.147",
    "154,Afghanistan,3.203,0.350,0.517,0.361,0.000,0.158,0.025",
    "155,Central African Republic,3.083,0.026,0.000,0.105,0.225,0.235,0.035",
    "156,South Sudan,2.853,0.306,0.575,0.295,0.010,0.202,0.091",
];

pub fn csv_content() -> String {
    let mut content = String::from(HEADER);
    for row in ROWS {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    content
}

pub fn write_csv(dir: &Path) -> PathBuf {
    let path = dir.join("2019.csv");
    std::fs::write(&path, csv_content()).expect("Failed to write fixture");
    path
}
