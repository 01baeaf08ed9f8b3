//! Happiness Story Common Library
//!
//! シーン単位のデータストーリーのコア。
//! 統計・派生ビュー・シーン遷移・検索フィルタを提供し、描画は
//! `RenderingAdapter` の実装に任せる。

pub mod types;
pub mod error;
pub mod dataset;
pub mod stats;
pub mod derivation;
pub mod scene;
pub mod search;
pub mod story;
pub mod tooltip;
pub mod render;
pub mod export;

pub use types::{Metric, Record};
pub use error::{Error, Result};
pub use dataset::Dataset;
pub use stats::{group_mean, pearson_correlation};
pub use derivation::{
    extremes_by_field, filter_by_name_substring, full_sorted_descending_by_score,
    group_comparison, top_n, Extremes, GroupSummary,
};
pub use scene::{default_scenes, ChartKind, Scene};
pub use search::{InteractiveSceneContext, SearchOutcome};
pub use story::{NavigationState, SceneData, SceneView, Story, StoryOptions};
pub use render::{ElementId, HoverRegistry, RenderingAdapter, TooltipHandle};

/// データ読み込み失敗時にシーンの代わりに表示する文言
pub const DATA_LOAD_FAILURE_MESSAGE: &str =
    "Error Loading Data. Please ensure the CSV file is available.";
