//! CSVを読み込んでストーリーを最初から最後までたどる統合テスト

mod fixtures;

use happiness_story::loader::load_dataset;
use happiness_story::render::TerminalRenderer;
use happiness_story::session::{Session, SessionAction};
use happiness_story_common::{
    pearson_correlation, ChartKind, Metric, RenderingAdapter, SceneData, Story, StoryOptions,
};
use tempfile::tempdir;

async fn load_story() -> Story {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = fixtures::write_csv(dir.path());
    let dataset = load_dataset(&path).await.expect("fixture should load");
    Story::new(dataset, StoryOptions::default()).expect("story should start")
}

#[tokio::test]
async fn test_first_scene_is_top_twenty() {
    let story = load_story().await;
    assert_eq!(story.dataset().len(), 25);
    assert_eq!(story.current_index(), 0);
    assert!(!story.is_previous_enabled());
    assert!(story.is_next_enabled());

    match &story.view().data {
        SceneData::TopCountries { records } => {
            assert_eq!(records.len(), 20);
            assert_eq!(records[0].name, "Finland");
            assert_eq!(records[19].name, "Czech Republic");
        }
        other => panic!("unexpected scene data: {:?}", other),
    }
}

#[tokio::test]
async fn test_scatter_scenes_highlight_and_narrate() {
    let mut story = load_story().await;

    assert!(story.next().unwrap());
    let view = story.view();
    assert_eq!(view.chart_kind(), ChartKind::GdpScatter);
    assert_eq!(view.highlight.as_ref().map(|r| r.rank), Some(12));
    let r = pearson_correlation(story.dataset().records(), Metric::GdpPerCapita, Metric::Score);
    assert!(r > 0.5);
    assert!(view.narrative.contains(&format!("(r={:.3})", r)));

    assert!(story.next().unwrap());
    let view = story.view();
    assert_eq!(view.chart_kind(), ChartKind::SocialSupport);
    assert_eq!(view.highlight.as_ref().map(|r| r.name.as_str()), Some("Iceland"));
    assert!(!view.narrative.contains("{r}"));
}

#[tokio::test]
async fn test_freedom_comparison() {
    let mut story = load_story().await;
    assert!(story.go_to(3).unwrap());

    match &story.view().data {
        SceneData::FreedomComparison { extremes, groups, correlation } => {
            assert_eq!(extremes.high.len(), 10);
            assert_eq!(extremes.low.len(), 10);
            assert_eq!(extremes.high[0].name, "Norway");
            assert!(extremes.high.iter().any(|r| r.name == "Costa Rica"));
            assert!(extremes.low.iter().any(|r| r.name == "Afghanistan"));
            assert!(extremes.low.iter().any(|r| r.name == "Israel"));
            assert!(groups[0].mean_score > groups[1].mean_score);
            assert_eq!(groups[0].label, "Highest Freedom Countries");
            assert_eq!(groups[1].count, 10);
            assert!(*correlation > 0.0);
        }
        other => panic!("unexpected scene data: {:?}", other),
    }
    assert!(story.view().narrative.contains("The 10 countries with the most freedom"));
}

#[tokio::test]
async fn test_interactive_search_keeps_scale() {
    let mut story = load_story().await;
    assert!(story.go_to(4).unwrap());
    assert!(!story.is_next_enabled());
    assert!((story.progress_ratio() - 1.0).abs() < 1e-12);
    assert!(story.view().narrative.contains("all 25 countries"));

    let outcome = story.search("LAND").unwrap();
    assert_eq!(outcome.visible_records.len(), 6);
    assert_eq!(outcome.status_text, "Showing 6 countries matching \"land\".");
    assert!((outcome.y_max - 7.769).abs() < 1e-12);

    let outcome = story.search("xyz").unwrap();
    assert!(outcome.visible_records.is_empty());
    assert_eq!(
        outcome.status_text,
        "No countries found matching \"xyz\". Try a different search term."
    );
    assert!((outcome.y_max - 7.769).abs() < 1e-12);

    // シーンを出ると検索状態は破棄される
    assert!(story.previous().unwrap());
    assert!(story.next().unwrap());
    assert_eq!(story.interactive().unwrap().query(), "");
}

#[tokio::test]
async fn test_terminal_render_uses_full_scale_after_search() {
    let mut story = load_story().await;
    story.go_to(4).unwrap();
    story.search("south sudan").unwrap();

    let mut renderer = TerminalRenderer::new(40);
    let mut out = String::new();
    renderer.render(story.view(), &mut out).unwrap();

    assert!(out.contains("Showing South Sudan (Rank: 156, Score: 2.853)"));
    // 2.853 / 7.769 * 40 ≒ 15
    let bar_line = out.lines().find(|l| l.contains("South Sudan") && l.contains('█')).unwrap();
    assert_eq!(bar_line.chars().filter(|c| *c == '█').count(), 15);
}

#[tokio::test]
async fn test_session_walkthrough() {
    let story = load_story().await;
    let mut session = Session::new(story, 30);

    let first = session.render_current().unwrap();
    assert!(first.contains("The Happiest Nations in 2019"));
    assert!(first.contains("1/5"));

    for _ in 0..4 {
        session.handle(SessionAction::Next).unwrap();
    }
    assert_eq!(session.story().current_index(), 4);

    let out = session.handle(SessionAction::Search("costa".into())).unwrap().unwrap();
    assert!(out.contains("Showing Costa Rica (Rank: 12, Score: 7.167)"));

    let out = session.handle(SessionAction::Inspect("iceland".into())).unwrap().unwrap();
    assert!(out.contains("Social Support: 1.624"));
}
