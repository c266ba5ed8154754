// crates/core/src/measure.rs
//! 行イベントの集計
//!
//! カウントモードのイベントを言語ごとの code/comment/blank 合計へ畳み込み
//! ます。ファイル間の集計は可換な加算です。

use hashbrown::HashMap;
use serde::Serialize;

use crate::language::Language;
use crate::scan::{self, EventSink, LineEvent, LineKind, ScanMode};

/// 1 言語分の行数集計
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocCounts {
    pub code: usize,
    pub comment: usize,
    pub blank: usize,
}

impl LocCounts {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.code + self.comment + self.blank
    }

    pub fn bump(&mut self, kind: LineKind) {
        match kind {
            LineKind::LineCode => self.code += 1,
            LineKind::LineComment => self.comment += 1,
            LineKind::LineBlank => self.blank += 1,
        }
    }

    pub fn merge(&mut self, other: &Self) {
        self.code += other.code;
        self.comment += other.comment;
        self.blank += other.blank;
    }
}

/// 1 バッファの言語別内訳（言語名順）
pub type Composition = Vec<(Language, LocCounts)>;

/// 行イベントを言語別に畳み込むシンク
#[derive(Debug, Default)]
pub struct CountSink {
    totals: HashMap<Language, LocCounts>,
}

impl CountSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 言語名順に並べた内訳を返す
    #[must_use]
    pub fn into_composition(self) -> Composition {
        let mut entries: Composition = self.totals.into_iter().collect();
        entries.sort_by_key(|(lang, _)| lang.as_str());
        entries
    }
}

impl EventSink for CountSink {
    fn line(&mut self, event: LineEvent) {
        self.totals.entry(event.lang).or_default().bump(event.kind);
    }

    fn entity(&mut self, _span: crate::scan::EntitySpan) {}
}

/// バッファを走査して言語別内訳を得る
///
/// 埋め込みを含むファイルでは複数言語のエントリが返ります。
#[must_use]
pub fn measure(lang: Language, buf: &[u8]) -> Composition {
    let mut sink = CountSink::new();
    scan::scan(lang, buf, ScanMode::Count, &mut sink);
    sink.into_composition()
}
