//! 対話式ストーリー再生モジュール
//!
//! 1シーンずつ端末に描画し、入力に応じて前後移動・ジャンプ・検索・詳細表示を行う。

use crate::error::{Result, StoryError};
use crate::render::TerminalRenderer;
use dialoguer::Input;
use happiness_story_common::{ElementId, Record, RenderingAdapter, Story};

const PROGRESS_WIDTH: usize = 20;

/// 対話アクション
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// 次のシーンへ
    Next,
    /// 前のシーンへ
    Previous,
    /// 指定シーンへ（0始まり）
    GoTo(i64),
    /// 国名で絞り込み
    Search(String),
    /// 国の詳細（ツールチップ）を表示
    Inspect(String),
    Help,
    /// 終了
    Quit,
    Unknown(String),
}

/// 入力行をアクションに変換
///
/// シーン番号は1始まりで入力させる。
pub fn parse_action(input: &str) -> SessionAction {
    let trimmed = input.trim();

    if let Some(query) = trimmed.strip_prefix('/') {
        return SessionAction::Search(query.to_string());
    }
    if let Some(name) = trimmed.strip_prefix("i ") {
        return SessionAction::Inspect(name.trim().to_string());
    }
    if let Ok(number) = trimmed.parse::<i64>() {
        return SessionAction::GoTo(number.saturating_sub(1));
    }

    match trimmed {
        "" | "n" => SessionAction::Next,
        "p" => SessionAction::Previous,
        "h" | "?" => SessionAction::Help,
        "q" | "Q" => SessionAction::Quit,
        other => SessionAction::Unknown(other.to_string()),
    }
}

/// 進捗バーとボタン状態の1行
pub fn progress_line(story: &Story) -> String {
    let filled = (story.progress_ratio() * PROGRESS_WIDTH as f64).round() as usize;
    let filled = filled.min(PROGRESS_WIDTH);
    let previous = if story.is_previous_enabled() { "[p] ◀ 前へ" } else { "    (前へ)" };
    let next = if story.is_next_enabled() { "次へ ▶ [n]" } else { "(次へ)" };

    format!(
        "{}{} {}/{}   {}  {}",
        "■".repeat(filled),
        "□".repeat(PROGRESS_WIDTH - filled),
        story.current_index() + 1,
        story.scene_count(),
        previous,
        next,
    )
}

pub fn help_text() -> &'static str {
    "操作: [Enter/n]次へ [p]前へ [番号]シーンへ移動 [/語]検索 [i 国名]詳細 [q]終了"
}

/// 再生中の状態
pub struct Session {
    story: Story,
    renderer: TerminalRenderer,
}

impl Session {
    pub fn new(story: Story, bar_width: usize) -> Self {
        Self {
            story,
            renderer: TerminalRenderer::new(bar_width),
        }
    }

    pub fn story(&self) -> &Story {
        &self.story
    }

    /// 現在のシーンを描画した文字列
    pub fn render_current(&mut self) -> Result<String> {
        let mut out = String::new();
        self.renderer
            .render(self.story.view(), &mut out)
            .map_err(|e| StoryError::Render(e.to_string()))?;
        out.push('\n');
        out.push_str(&progress_line(&self.story));
        Ok(out)
    }

    /// アクションを適用し、表示する文字列を返す（終了時は `None`）
    pub fn handle(&mut self, action: SessionAction) -> Result<Option<String>> {
        let output = match action {
            SessionAction::Next => {
                if self.story.next()? {
                    self.render_current()?
                } else {
                    "最後のシーンです".to_string()
                }
            }
            SessionAction::Previous => {
                if self.story.previous()? {
                    self.render_current()?
                } else {
                    "最初のシーンです".to_string()
                }
            }
            SessionAction::GoTo(index) => {
                if self.story.go_to(index)? {
                    self.render_current()?
                } else {
                    format!("シーン番号は 1〜{} で指定してください", self.story.scene_count())
                }
            }
            SessionAction::Search(query) => match self.story.search(&query) {
                Some(_) => self.render_current()?,
                None => "検索は最後のシーンでのみ使えます".to_string(),
            },
            SessionAction::Inspect(name) => self.inspect(&name),
            SessionAction::Help => help_text().to_string(),
            SessionAction::Quit => return Ok(None),
            SessionAction::Unknown(input) => format!("不明な操作です: {}\n{}", input, help_text()),
        };
        Ok(Some(output))
    }

    /// カーソルを合わせて離すのと同じ（表示後すぐに閉じる）
    fn inspect(&mut self, name: &str) -> String {
        let Some(record) = find_record(self.story.dataset().records(), name).cloned() else {
            return format!("見つかりません: {}", name);
        };

        let handle = self.renderer.attach_hover(ElementId(record.rank as usize), &record);
        let lines = self
            .renderer
            .tooltip(handle)
            .map(|lines| lines.join("\n  "))
            .unwrap_or_default();
        self.renderer.detach_hover(handle);

        format!("  {}", lines)
    }
}

fn find_record<'a>(records: &'a [Record], name: &str) -> Option<&'a Record> {
    let wanted = name.trim().to_lowercase();
    records.iter().find(|r| r.name.to_lowercase() == wanted)
}

/// 対話式でストーリーを再生
pub fn run_play(story: Story, bar_width: usize) -> Result<()> {
    let mut session = Session::new(story, bar_width);

    println!("{}", help_text());
    println!("---\n");
    println!("{}\n", session.render_current()?);

    loop {
        let input: String = Input::new()
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| StoryError::Prompt(e.to_string()))?;

        let action = parse_action(&input);
        tracing::debug!(?action, "session input");

        match session.handle(action)? {
            Some(output) => println!("\n{}\n", output),
            None => {
                println!("終了します");
                break;
            }
        }
    }

    Ok(())
}
