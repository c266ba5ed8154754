// crates/core/src/scan/event.rs
//! スキャンイベントモデル
//!
//! 行イベント（code / comment / blank）とエンティティスパンを定義します。
//! 行イベントの範囲は終端の改行を含み、最終行が未終端の場合は
//! バッファ末尾までを範囲とします。

use serde::Serialize;

use crate::language::Language;

/// 行の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineKind {
    LineCode,
    LineComment,
    LineBlank,
}

impl LineKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LineCode => "line-code",
            Self::LineComment => "line-comment",
            Self::LineBlank => "line-blank",
        }
    }
}

/// 字句エンティティの種別
///
/// `InternalNewline` と `CheckBlankEntry` は全言語共通の擬似種別で、
/// イベントとして外部に出力されることはありません。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Entity {
    Space,
    Comment,
    String,
    Number,
    Keyword,
    Identifier,
    Operator,
    Preproc,
    EscapedNewline,
    Newline,
    Any,
    /// 複数行エンティティ内部の改行（擬似種別）
    InternalNewline,
    /// 埋め込み遷移の境界マーカー（擬似種別）
    CheckBlankEntry,
}

impl Entity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Space => "space",
            Self::Comment => "comment",
            Self::String => "string",
            Self::Number => "number",
            Self::Keyword => "keyword",
            Self::Identifier => "identifier",
            Self::Operator => "operator",
            Self::Preproc => "preproc",
            Self::EscapedNewline => "escaped-newline",
            Self::Newline => "newline",
            Self::Any => "any",
            Self::InternalNewline => "internal-newline",
            Self::CheckBlankEntry => "check-blank-entry",
        }
    }

    /// 擬似種別（イベントとして出力しない）かどうか
    #[must_use]
    pub const fn is_pseudo(self) -> bool {
        matches!(self, Self::InternalNewline | Self::CheckBlankEntry)
    }
}

/// 行イベント: 範囲 `[start, end)` は終端改行を含む
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineEvent {
    pub lang: Language,
    pub kind: LineKind,
    pub start: usize,
    pub end: usize,
}

/// エンティティスパン: 範囲 `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntitySpan {
    pub lang: Language,
    pub entity: Entity,
    pub start: usize,
    pub end: usize,
}

/// スキャンイベントの受け口
///
/// カウントモードでは `line` のみ、エンティティモードでは `entity` のみが
/// 呼ばれます。
pub trait EventSink {
    fn line(&mut self, event: LineEvent);
    fn entity(&mut self, span: EntitySpan);
}

/// 両モードのイベントをそのまま貯めるシンク（テスト・注釈出力用）
#[derive(Debug, Default)]
pub struct VecSink {
    pub lines: Vec<LineEvent>,
    pub entities: Vec<EntitySpan>,
}

impl EventSink for VecSink {
    fn line(&mut self, event: LineEvent) {
        self.lines.push(event);
    }

    fn entity(&mut self, span: EntitySpan) {
        self.entities.push(span);
    }
}
