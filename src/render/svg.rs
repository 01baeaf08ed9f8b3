//! SVGレンダラ
//!
//! シーンごとに単体のSVG文書を生成する。各要素の `<title>` にツールチップ文言を入れる。

use happiness_story_common::derivation::GroupSummary;
use happiness_story_common::render::{ElementId, HoverRegistry, RenderingAdapter, TooltipHandle};
use happiness_story_common::stats::max_value;
use happiness_story_common::tooltip::group_tooltip;
use happiness_story_common::{ChartKind, Metric, Record, SceneData, SceneView};
use std::fmt::{self, Write};

const WIDTH: f64 = 900.0;
const HEIGHT: f64 = 500.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 60.0;

const HIGHLIGHT_STROKE: &str = "#ff6b6b";
const HIGH_GROUP_FILL: &str = "#2E8B57";
const LOW_GROUP_FILL: &str = "#DC143C";

#[derive(Default)]
pub struct SvgRenderer {
    kind: Option<ChartKind>,
    hover: HoverRegistry,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

struct Plot {
    inner_width: f64,
    inner_height: f64,
}

impl Plot {
    fn new() -> Self {
        Self {
            inner_width: WIDTH - MARGIN_LEFT - MARGIN_RIGHT,
            inner_height: HEIGHT - MARGIN_TOP - MARGIN_BOTTOM,
        }
    }

    fn x(&self, value: f64, max: f64) -> f64 {
        MARGIN_LEFT + ratio(value, max) * self.inner_width
    }

    fn y(&self, value: f64, max: f64) -> f64 {
        MARGIN_TOP + self.inner_height - ratio(value, max) * self.inner_height
    }

    fn baseline(&self) -> f64 {
        MARGIN_TOP + self.inner_height
    }
}

fn ratio(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        0.0
    } else {
        (value / max).clamp(0.0, 1.0)
    }
}

/// SVGテキスト用のエスケープ
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn title_element(lines: &[String]) -> String {
    format!("<title>{}</title>", escape(&lines.join("\n")))
}

/// 0〜1の比率を白→指定色のグラデーションに
fn sequential_fill(t: f64, (r, g, b): (u8, u8, u8)) -> String {
    let t = t.clamp(0.0, 1.0);
    let mix = |c: u8| (255.0 - (255.0 - c as f64) * t).round() as u8;
    format!("#{:02x}{:02x}{:02x}", mix(r), mix(g), mix(b))
}

impl SvgRenderer {
    fn bars(&mut self, out: &mut String, records: &[Record], y_max: f64, color: (u8, u8, u8)) -> fmt::Result {
        let plot = Plot::new();
        if records.is_empty() {
            return Ok(());
        }
        let band = plot.inner_width / records.len() as f64;

        for (i, record) in records.iter().enumerate() {
            let handle = self.attach_hover(ElementId(i), record);
            let x = MARGIN_LEFT + i as f64 * band + band * 0.05;
            let y = plot.y(record.score, y_max);
            let tooltip = self.hover.lines(handle).map(title_element).unwrap_or_default();
            write!(
                out,
                r##"<rect class="bar" x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" opacity="0.8">{}</rect>"##,
                x,
                y,
                band * 0.9,
                plot.baseline() - y,
                sequential_fill(ratio(record.score, y_max), color),
                tooltip,
            )?;
        }
        Ok(())
    }

    fn scatter(&mut self, out: &mut String, x: Metric, records: &[Record], highlight: Option<&Record>) -> fmt::Result {
        let plot = Plot::new();
        let x_max = max_value(records, x).unwrap_or(0.0);
        let y_max = max_value(records, Metric::Score).unwrap_or(0.0);

        for (i, record) in records.iter().enumerate() {
            let handle = self.attach_hover(ElementId(i), record);
            let tooltip = self.hover.lines(handle).map(title_element).unwrap_or_default();
            write!(
                out,
                r##"<circle cx="{:.1}" cy="{:.1}" r="5" fill="{}" opacity="0.7">{}</circle>"##,
                plot.x(x.value(record), x_max),
                plot.y(record.score, y_max),
                sequential_fill(ratio(record.score, y_max), (8, 48, 107)),
                tooltip,
            )?;
        }

        if let Some(record) = highlight {
            write!(
                out,
                r##"<circle cx="{:.1}" cy="{:.1}" r="8" fill="none" stroke="{}" stroke-width="3"/>"##,
                plot.x(x.value(record), x_max),
                plot.y(record.score, y_max),
                HIGHLIGHT_STROKE,
            )?;
        }

        write!(
            out,
            r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12">{}</text>"##,
            MARGIN_LEFT + plot.inner_width / 2.0,
            HEIGHT - 15.0,
            escape(x.column()),
        )
    }

    fn comparison(&mut self, out: &mut String, groups: &[GroupSummary; 2]) -> fmt::Result {
        let plot = Plot::new();
        let y_max = groups.iter().map(|g| g.mean_score).fold(0.0, f64::max) * 1.1;
        let band = plot.inner_width / 2.0;

        for (i, (group, fill)) in groups.iter().zip([HIGH_GROUP_FILL, LOW_GROUP_FILL]).enumerate() {
            let x = MARGIN_LEFT + i as f64 * band + band * 0.15;
            let y = plot.y(group.mean_score, y_max);
            write!(
                out,
                r##"<rect class="bar" x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" opacity="0.8">{}</rect>"##,
                x,
                y,
                band * 0.7,
                plot.baseline() - y,
                fill,
                title_element(&group_tooltip(group)),
            )?;
            write!(
                out,
                r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="14">{:.3}</text>"##,
                x + band * 0.35,
                y - 6.0,
                group.mean_score,
            )?;
            write!(
                out,
                r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12">{}</text>"##,
                x + band * 0.35,
                plot.baseline() + 20.0,
                escape(&group.label),
            )?;
        }
        Ok(())
    }
}

impl RenderingAdapter for SvgRenderer {
    type Container = String;
    type Error = fmt::Error;

    fn render(&mut self, view: &SceneView, out: &mut String) -> fmt::Result {
        self.kind = Some(view.chart_kind());
        self.hover.clear();
        let plot = Plot::new();

        write!(
            out,
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" style="background:white">"##,
            WIDTH, HEIGHT
        )?;
        write!(
            out,
            r##"<text x="{:.1}" y="24" text-anchor="middle" font-size="16" font-weight="600">{}</text>"##,
            WIDTH / 2.0,
            escape(view.scene.title),
        )?;
        // 軸
        write!(
            out,
            r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#333"/><line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#333"/>"##,
            MARGIN_LEFT,
            plot.baseline(),
            WIDTH - MARGIN_RIGHT,
            plot.baseline(),
            MARGIN_LEFT,
            MARGIN_TOP,
            MARGIN_LEFT,
            plot.baseline(),
        )?;

        match &view.data {
            SceneData::TopCountries { records } => {
                let y_max = max_value(records, Metric::Score).unwrap_or(0.0);
                self.bars(out, records, y_max, (8, 48, 107))?;
            }
            SceneData::Scatter { x, records, .. } => {
                self.scatter(out, *x, records, view.highlight.as_ref())?;
            }
            SceneData::FreedomComparison { groups, .. } => {
                self.comparison(out, groups)?;
            }
            SceneData::Interactive(ctx) => {
                let outcome = ctx.outcome();
                // 絞り込んでも縦軸は全件の最大スコアに固定
                self.bars(out, &outcome.visible_records, outcome.y_max, (103, 0, 13))?;
                write!(
                    out,
                    r##"<text class="instruction-text" x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12">{}</text>"##,
                    WIDTH / 2.0,
                    HEIGHT - 15.0,
                    escape(&outcome.status_text),
                )?;
            }
        }

        write!(out, "</svg>")
    }

    fn attach_hover(&mut self, element: ElementId, record: &Record) -> TooltipHandle {
        let kind = self.kind.unwrap_or(ChartKind::Interactive);
        self.hover.attach(kind, element, record)
    }

    fn detach_hover(&mut self, handle: TooltipHandle) {
        self.hover.detach(handle);
    }
}
