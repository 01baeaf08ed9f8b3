pub mod excel;

use crate::cli::ExportFormat;
use crate::render::SvgRenderer;
use anyhow::{Context, Result};
use happiness_story_common::story::derive_scene;
use happiness_story_common::{RenderingAdapter, SceneView, Story};
use serde::Serialize;
use std::path::{Path, PathBuf};

const BASE_NAME: &str = "happiness-story";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoryDocument<'a> {
    scene_count: usize,
    scenes: &'a [SceneView],
}

/// 全シーンのビューを先頭から順に導出する
pub fn all_views(story: &Story) -> happiness_story_common::Result<Vec<SceneView>> {
    story
        .scenes()
        .iter()
        .map(|scene| derive_scene(scene, story.dataset().records(), story.options()))
        .collect()
}

fn svg_file_name(view: &SceneView) -> String {
    format!("scene-{}-{}.svg", view.scene.id + 1, view.chart_kind().as_str())
}

pub fn export_json(views: &[SceneView], output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(format!("{}.json", BASE_NAME));
    let document = StoryDocument {
        scene_count: views.len(),
        scenes: views,
    };
    let json = serde_json::to_string_pretty(&document)?;
    std::fs::write(&path, json)
        .with_context(|| format!("JSONを書き込めません: {}", path.display()))?;
    Ok(path)
}

pub fn export_excel(views: &[SceneView], output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(format!("{}.xlsx", BASE_NAME));
    excel::generate_excel(views, &path)?;
    Ok(path)
}

pub fn export_svg(views: &[SceneView], output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut renderer = SvgRenderer::new();
    let mut paths = Vec::with_capacity(views.len());

    for view in views {
        let mut document = String::new();
        renderer
            .render(view, &mut document)
            .with_context(|| format!("SVG描画に失敗しました: {}", view.scene.title))?;

        let path = output_dir.join(svg_file_name(view));
        std::fs::write(&path, document)
            .with_context(|| format!("SVGを書き込めません: {}", path.display()))?;
        paths.push(path);
    }

    Ok(paths)
}

/// 指定形式で書き出し、作成したファイルを返す
pub fn export_views(views: &[SceneView], format: &ExportFormat, output_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("出力先を作成できません: {}", output_dir.display()))?;

    let mut written = Vec::new();
    match format {
        ExportFormat::Json => {
            println!("- JSONを生成中...");
            written.push(export_json(views, output_dir)?);
        }
        ExportFormat::Excel => {
            println!("- Excelを生成中...");
            written.push(export_excel(views, output_dir)?);
        }
        ExportFormat::Svg => {
            println!("- SVGを生成中...");
            written.extend(export_svg(views, output_dir)?);
        }
        ExportFormat::All => {
            println!("- JSONを生成中...");
            written.push(export_json(views, output_dir)?);
            println!("- Excelを生成中...");
            written.push(export_excel(views, output_dir)?);
            println!("- SVGを生成中...");
            written.extend(export_svg(views, output_dir)?);
        }
    }

    for path in &written {
        println!("✔ 出力: {}", path.display());
    }
    tracing::info!(files = written.len(), dir = %output_dir.display(), "export finished");
    Ok(written)
}
