//! シーン状態機械
//!
//! 現在のシーン番号を保持し、遷移のたびにボタン状態・進捗率・派生ビューを
//! 再計算する。範囲外への遷移は巡回せずに無視する。

use crate::dataset::Dataset;
use crate::derivation::{
    extremes_by_field, group_comparison, top_n, Extremes, GroupSummary, EXTREMES_K, TOP_N,
};
use crate::error::{Error, Result};
use crate::scene::{default_scenes, ChartKind, NarrativeValues, Scene};
use crate::search::{InteractiveSceneContext, SearchOutcome};
use crate::stats::pearson_correlation;
use crate::types::{Metric, Record};
use serde::Serialize;

/// 派生ビューのパラメータ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryOptions {
    pub top_n: usize,
    pub extremes_k: usize,
}

impl Default for StoryOptions {
    fn default() -> Self {
        Self {
            top_n: TOP_N,
            extremes_k: EXTREMES_K,
        }
    }
}

/// 現在位置（`0 <= current < scene_count` を常に満たす）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    current: usize,
    scene_count: usize,
}

impl NavigationState {
    /// `scene_count` は1以上
    fn new(scene_count: usize) -> Self {
        Self {
            current: 0,
            scene_count,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn scene_count(&self) -> usize {
        self.scene_count
    }

    pub fn next(&mut self) -> bool {
        if self.current + 1 < self.scene_count {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub fn previous(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    pub fn go_to(&mut self, index: i64) -> bool {
        match usize::try_from(index) {
            Ok(index) if index < self.scene_count => {
                self.current = index;
                true
            }
            _ => false,
        }
    }

    pub fn is_previous_enabled(&self) -> bool {
        self.current > 0
    }

    pub fn is_next_enabled(&self) -> bool {
        self.current + 1 < self.scene_count
    }

    /// (current + 1) / scene_count
    pub fn progress_ratio(&self) -> f64 {
        (self.current + 1) as f64 / self.scene_count as f64
    }
}

/// チャートに渡す派生データ
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SceneData {
    #[serde(rename_all = "camelCase")]
    TopCountries { records: Vec<Record> },
    /// 指標 `x` 対スコアの散布図
    #[serde(rename_all = "camelCase")]
    Scatter {
        x: Metric,
        records: Vec<Record>,
        correlation: f64,
    },
    #[serde(rename_all = "camelCase")]
    FreedomComparison {
        extremes: Extremes,
        groups: [GroupSummary; 2],
        correlation: f64,
    },
    Interactive(InteractiveSceneContext),
}

/// 1シーン分の表示内容
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneView {
    pub scene: Scene,
    pub narrative: String,
    pub highlight: Option<Record>,
    pub data: SceneData,
}

impl SceneView {
    pub fn chart_kind(&self) -> ChartKind {
        self.scene.chart_kind
    }
}

/// シーンの派生ビューと説明文を計算する
pub fn derive_scene(scene: &Scene, records: &[Record], options: StoryOptions) -> Result<SceneView> {
    let scatter = |x: Metric| {
        let correlation = pearson_correlation(records, x, Metric::Score);
        let values = NarrativeValues {
            correlation: Some(correlation),
            ..Default::default()
        };
        let data = SceneData::Scatter {
            x,
            records: records.to_vec(),
            correlation,
        };
        (values, data)
    };

    let (values, data) = match scene.chart_kind {
        ChartKind::TopCountries => (
            NarrativeValues::default(),
            SceneData::TopCountries {
                records: top_n(records, options.top_n),
            },
        ),
        ChartKind::GdpScatter => scatter(Metric::GdpPerCapita),
        ChartKind::SocialSupport => scatter(Metric::SocialSupport),
        ChartKind::FreedomComparison => {
            let extremes = extremes_by_field(records, Metric::Freedom, options.extremes_k)?;
            let groups = group_comparison(&extremes)?;
            let correlation = pearson_correlation(records, Metric::Freedom, Metric::Score);
            let values = NarrativeValues {
                correlation: Some(correlation),
                high_mean: Some(groups[0].mean_score),
                low_mean: Some(groups[1].mean_score),
                group_size: Some(options.extremes_k),
                ..Default::default()
            };
            let data = SceneData::FreedomComparison {
                extremes,
                groups,
                correlation,
            };
            (values, data)
        }
        ChartKind::Interactive => {
            // コンテキスト側でスコア降順のコピーを持つ
            let ctx = InteractiveSceneContext::new(records);
            let values = NarrativeValues {
                count: Some(ctx.sorted_records().len()),
                ..Default::default()
            };
            (values, SceneData::Interactive(ctx))
        }
    };

    let highlight = scene
        .highlight
        .and_then(|name| records.iter().find(|r| r.name == name))
        .cloned();

    Ok(SceneView {
        scene: scene.clone(),
        narrative: scene.narrative(&values),
        highlight,
        data,
    })
}

/// ストーリー全体（データセット・シーン列・現在位置）
#[derive(Debug, Clone)]
pub struct Story {
    dataset: Dataset,
    scenes: Vec<Scene>,
    options: StoryOptions,
    nav: NavigationState,
    view: SceneView,
}

impl Story {
    /// 既定のシーン列で開始（シーン0）
    pub fn new(dataset: Dataset, options: StoryOptions) -> Result<Self> {
        Self::with_scenes(dataset, default_scenes(), options)
    }

    pub fn with_scenes(dataset: Dataset, scenes: Vec<Scene>, options: StoryOptions) -> Result<Self> {
        let first = scenes
            .first()
            .ok_or(Error::EmptyInput("story needs at least one scene"))?;
        let view = derive_scene(first, dataset.records(), options)?;
        let nav = NavigationState::new(scenes.len());
        Ok(Self {
            dataset,
            scenes,
            options,
            nav,
            view,
        })
    }

    /// 次のシーンへ（最後のシーンでは何もしない）
    pub fn next(&mut self) -> Result<bool> {
        let mut target = self.nav;
        if !target.next() {
            tracing::warn!(current = self.nav.current(), "already at the last scene");
            return Ok(false);
        }
        self.enter(target)
    }

    /// 前のシーンへ（最初のシーンでは何もしない）
    pub fn previous(&mut self) -> Result<bool> {
        let mut target = self.nav;
        if !target.previous() {
            tracing::warn!(current = self.nav.current(), "already at the first scene");
            return Ok(false);
        }
        self.enter(target)
    }

    /// 指定シーンへ（範囲外は何もしない）
    pub fn go_to(&mut self, index: i64) -> Result<bool> {
        let mut target = self.nav;
        if !target.go_to(index) {
            tracing::warn!(index, scene_count = self.nav.scene_count(), "scene index out of range");
            return Ok(false);
        }
        self.enter(target)
    }

    // 派生に失敗した場合は現在位置を変えない
    fn enter(&mut self, target: NavigationState) -> Result<bool> {
        let scene = &self.scenes[target.current()];
        let view = derive_scene(scene, self.dataset.records(), self.options)?;
        tracing::debug!(scene = scene.id, kind = scene.chart_kind.as_str(), "entered scene");
        self.nav = target;
        self.view = view;
        Ok(true)
    }

    pub fn navigation(&self) -> NavigationState {
        self.nav
    }

    pub fn current_index(&self) -> usize {
        self.nav.current()
    }

    pub fn scene_count(&self) -> usize {
        self.nav.scene_count()
    }

    pub fn is_previous_enabled(&self) -> bool {
        self.nav.is_previous_enabled()
    }

    pub fn is_next_enabled(&self) -> bool {
        self.nav.is_next_enabled()
    }

    pub fn progress_ratio(&self) -> f64 {
        self.nav.progress_ratio()
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn current_scene(&self) -> &Scene {
        &self.view.scene
    }

    pub fn view(&self) -> &SceneView {
        &self.view
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn options(&self) -> StoryOptions {
        self.options
    }

    /// 対話シーンのコンテキスト（他のシーンでは `None`）
    pub fn interactive(&self) -> Option<&InteractiveSceneContext> {
        match &self.view.data {
            SceneData::Interactive(ctx) => Some(ctx),
            _ => None,
        }
    }

    /// 検索入力（対話シーン以外では `None`）
    pub fn search(&mut self, raw_input: &str) -> Option<SearchOutcome> {
        match &mut self.view.data {
            SceneData::Interactive(ctx) => Some(ctx.on_query_change(raw_input)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(count: usize) -> Dataset {
        let records = (0..count)
            .map(|i| Record {
                name: format!("Country {:02}", i),
                rank: i as u32 + 1,
                score: 8.0 - i as f64 * 0.2,
                gdp_per_capita: 1.5 - i as f64 * 0.05,
                social_support: 1.6 - i as f64 * 0.04,
                freedom: ((i * 7) % count) as f64 / count as f64,
                ..Default::default()
            })
            .collect();
        Dataset::from_records(records).unwrap()
    }

    fn story() -> Story {
        Story::new(dataset(25), StoryOptions::default()).unwrap()
    }

    #[test]
    fn test_starts_at_first_scene() {
        let story = story();
        assert_eq!(story.current_index(), 0);
        assert_eq!(story.scene_count(), 5);
        assert!(!story.is_previous_enabled());
        assert!(story.is_next_enabled());
        assert!((story.progress_ratio() - 0.2).abs() < 1e-12);
        assert_eq!(story.view().chart_kind(), ChartKind::TopCountries);
    }

    #[test]
    fn test_previous_at_start_is_noop() {
        let mut story = story();
        assert!(!story.previous().unwrap());
        assert_eq!(story.current_index(), 0);
    }

    #[test]
    fn test_next_at_end_is_noop() {
        let mut story = story();
        assert!(story.go_to(4).unwrap());
        assert!(!story.next().unwrap());
        assert_eq!(story.current_index(), 4);
        assert!(story.is_previous_enabled());
        assert!(!story.is_next_enabled());
        assert_eq!(story.progress_ratio(), 1.0);
    }

    #[test]
    fn test_go_to_out_of_range_is_noop() {
        let mut story = story();
        story.go_to(2).unwrap();
        assert!(!story.go_to(-1).unwrap());
        assert!(!story.go_to(5).unwrap());
        assert_eq!(story.current_index(), 2);
    }

    #[test]
    fn test_walk_forward_and_back() {
        let mut story = story();
        let mut kinds = vec![story.view().chart_kind()];
        while story.next().unwrap() {
            kinds.push(story.view().chart_kind());
        }
        assert_eq!(
            kinds,
            vec![
                ChartKind::TopCountries,
                ChartKind::GdpScatter,
                ChartKind::SocialSupport,
                ChartKind::FreedomComparison,
                ChartKind::Interactive,
            ]
        );
        assert!(story.previous().unwrap());
        assert_eq!(story.current_index(), 3);
    }

    #[test]
    fn test_top_countries_view() {
        let story = story();
        match &story.view().data {
            SceneData::TopCountries { records } => {
                assert_eq!(records.len(), 20);
                assert_eq!(records[0].name, "Country 00");
            }
            other => panic!("unexpected data: {:?}", other),
        }
    }

    #[test]
    fn test_scatter_narrative_has_correlation() {
        let mut story = story();
        story.go_to(1).unwrap();
        let view = story.view();
        match &view.data {
            SceneData::Scatter { x, correlation, records } => {
                assert_eq!(*x, Metric::GdpPerCapita);
                assert_eq!(records.len(), 25);
                assert!(view.narrative.contains(&format!("(r={:.3})", correlation)));
            }
            other => panic!("unexpected data: {:?}", other),
        }
    }

    #[test]
    fn test_freedom_comparison_view() {
        let mut story = story();
        story.go_to(3).unwrap();
        match &story.view().data {
            SceneData::FreedomComparison { extremes, groups, .. } => {
                assert_eq!(extremes.high.len(), 10);
                assert_eq!(extremes.low.len(), 10);
                assert_eq!(groups[0].count, 10);
                assert!(groups[0].mean_field > groups[1].mean_field);
            }
            other => panic!("unexpected data: {:?}", other),
        }
        assert!(story.view().narrative.contains("The 10 countries with the most freedom"));
    }

    #[test]
    fn test_navigation_order_does_not_reorder_dataset() {
        let mut story = story();
        let before: Vec<_> = story.dataset().records().to_vec();
        story.go_to(3).unwrap();
        story.go_to(4).unwrap();
        story.go_to(0).unwrap();
        assert_eq!(story.dataset().records(), before.as_slice());
        match &story.view().data {
            SceneData::TopCountries { records } => assert_eq!(records[0].name, "Country 00"),
            other => panic!("unexpected data: {:?}", other),
        }
    }

    #[test]
    fn test_insufficient_data_keeps_position() {
        let mut story = Story::new(dataset(8), StoryOptions::default()).unwrap();
        story.go_to(2).unwrap();
        let err = story.go_to(3).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { needed: 20, available: 8 }));
        assert_eq!(story.current_index(), 2);
        assert_eq!(story.view().chart_kind(), ChartKind::SocialSupport);
    }

    #[test]
    fn test_search_only_in_interactive_scene() {
        let mut story = story();
        assert!(story.search("country").is_none());
        assert!(story.interactive().is_none());

        story.go_to(4).unwrap();
        let outcome = story.search("Country 0").unwrap();
        assert_eq!(outcome.visible_records.len(), 10);
        assert_eq!(story.interactive().unwrap().query(), "country 0");
    }

    #[test]
    fn test_interactive_context_discarded_on_exit() {
        let mut story = story();
        story.go_to(4).unwrap();
        story.search("zzz").unwrap();
        story.previous().unwrap();
        assert!(story.interactive().is_none());
        story.next().unwrap();
        assert_eq!(story.interactive().unwrap().query(), "");
    }

    #[test]
    fn test_interactive_status_counts_full_dataset() {
        let mut story = story();
        story.go_to(4).unwrap();
        let outcome = story.search("").unwrap();
        assert!(outcome.status_text.starts_with("All 25 countries shown"));
        assert!(story.view().narrative.contains("all 25 countries"));
    }

    #[test]
    fn test_highlight_found() {
        let mut records = dataset(25).records().to_vec();
        records[11].name = "Costa Rica".to_string();
        let dataset = Dataset::from_records(records).unwrap();
        let mut story = Story::new(dataset, StoryOptions::default()).unwrap();
        assert!(story.view().highlight.is_none());
        story.next().unwrap();
        assert_eq!(story.view().highlight.as_ref().unwrap().rank, 12);
        // Iceland は存在しない
        story.next().unwrap();
        assert!(story.view().highlight.is_none());
    }

    #[test]
    fn test_empty_scene_list_rejected() {
        let err = Story::with_scenes(dataset(3), Vec::new(), StoryOptions::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyInput(_)));
    }
}
