//! レンダリングアダプタのインターフェース
//!
//! コアは派生ビューを作るだけで、描画はこのトレイトの実装に任せる。

use crate::scene::ChartKind;
use crate::story::SceneView;
use crate::tooltip::record_tooltip;
use crate::types::Record;
use std::collections::BTreeMap;

/// 描画済み要素の識別子（棒・点など、描画順の番号）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub usize);

/// 表示中のツールチップ
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TooltipHandle(pub u64);

/// チャート描画を担当する外部コンポーネント
pub trait RenderingAdapter {
    /// 描画先（端末の文字列バッファ、SVG文書など）
    type Container: ?Sized;
    type Error;

    fn render(&mut self, view: &SceneView, container: &mut Self::Container) -> Result<(), Self::Error>;

    fn attach_hover(&mut self, element: ElementId, record: &Record) -> TooltipHandle;

    fn detach_hover(&mut self, handle: TooltipHandle);
}

/// 表示中ツールチップの管理（アダプタ実装の共通部品）
#[derive(Debug, Default)]
pub struct HoverRegistry {
    next_id: u64,
    active: BTreeMap<TooltipHandle, (ElementId, Vec<String>)>,
}

impl HoverRegistry {
    pub fn attach(&mut self, kind: ChartKind, element: ElementId, record: &Record) -> TooltipHandle {
        let handle = TooltipHandle(self.next_id);
        self.next_id += 1;
        self.active.insert(handle, (element, record_tooltip(kind, record)));
        handle
    }

    /// 未知のハンドルは無視する
    pub fn detach(&mut self, handle: TooltipHandle) {
        self.active.remove(&handle);
    }

    pub fn lines(&self, handle: TooltipHandle) -> Option<&[String]> {
        self.active.get(&handle).map(|(_, lines)| lines.as_slice())
    }

    pub fn element(&self, handle: TooltipHandle) -> Option<ElementId> {
        self.active.get(&handle).map(|(element, _)| *element)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// シーン切り替え時に全て閉じる
    pub fn clear(&mut self) {
        self.active.clear();
    }
}
