// crates/core/src/scan/kernel.rs
//! スキャナカーネル
//!
//! 全言語スキャナが共有する状態機械ランタイムです。バッファカーソル、
//! 行頭オフセット、行分類フラグを保持し、文法側はトークン固有の処理だけを
//! 記述します。行会計の原始アクションをここに集約することで、約 40 言語で
//! 同一のセマンティクスを保証します。
//!
//! 不変条件: `line_contains_code` と `whole_line_comment` が同時に真になる
//! ことはなく、行イベントの放出種別は code > comment > blank の優先順で
//! 決まります。フラグは実改行・内部改行のたびにリセットされます。

use crate::language::Language;
use crate::scan::event::{Entity, EntitySpan, EventSink, LineEvent, LineKind};

/// スキャンモード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// 行イベントを放出する
    Count,
    /// エンティティスパンを放出する
    Entity,
}

/// 行分類フラグのスナップショット（埋め込み遷移用）
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFlags {
    pub contains_code: bool,
    pub whole_line_comment: bool,
}

/// スキャナカーネル
///
/// バッファへの参照はカーネルと独立したライフタイムを持つため、
/// スキャナは `buf()` で得たスライスを保持したままカーネルを変更できます。
pub struct Kernel<'a, 's> {
    buf: &'a [u8],
    mode: ScanMode,
    sink: &'s mut dyn EventSink,
    line_start: usize,
    contains_code: bool,
    whole_line_comment: bool,
}

impl<'a, 's> Kernel<'a, 's> {
    #[must_use]
    pub fn new(buf: &'a [u8], mode: ScanMode, sink: &'s mut dyn EventSink) -> Self {
        Self {
            buf,
            mode,
            sink,
            line_start: 0,
            contains_code: false,
            whole_line_comment: false,
        }
    }

    #[must_use]
    pub fn buf(&self) -> &'a [u8] {
        self.buf
    }

    #[must_use]
    pub const fn mode(&self) -> ScanMode {
        self.mode
    }

    /// 現在の行の先頭オフセット
    #[must_use]
    pub const fn line_start(&self) -> usize {
        self.line_start
    }

    /// この行でまだ何もマークされていないか
    #[must_use]
    pub const fn line_untouched(&self) -> bool {
        !self.contains_code && !self.whole_line_comment
    }

    /// 行をコードとしてマークする（行内で冪等）
    pub fn mark_code(&mut self) {
        self.contains_code = true;
        self.whole_line_comment = false;
    }

    /// 行をコメントとしてマークする
    ///
    /// コード行をコメントへ降格することはありません。
    pub fn mark_comment(&mut self) {
        if !self.contains_code {
            self.whole_line_comment = true;
        }
    }

    /// 実改行での行イベント放出
    ///
    /// `te` は改行バイトの直後。範囲 `[line_start, te)` を現在のフラグから
    /// 導いた種別で放出し、フラグをクリアして `line_start := te` とします。
    pub fn emit_newline(&mut self, lang: Language, te: usize) {
        if self.mode == ScanMode::Count {
            let kind = self.current_kind();
            self.sink.line(LineEvent {
                lang,
                kind,
                start: self.line_start,
                end: te,
            });
        }
        self.contains_code = false;
        self.whole_line_comment = false;
        self.line_start = te;
    }

    /// 複数行トークン内部の改行での行イベント放出
    ///
    /// 放出内容は `emit_newline` と同一です。フラグはリセットされるため、
    /// 囲んでいるトークンは以降の非空白バイトで行を再マークする必要が
    /// あります。
    pub fn emit_internal_newline(&mut self, lang: Language, p: usize) {
        self.emit_newline(lang, p);
    }

    /// スキャナ停止後の最終行放出
    ///
    /// バッファが改行で終わらない場合にのみ、残りのバイト範囲
    /// `[line_start, pe)` をちょうど一度放出します。
    pub fn emit_final(&mut self, lang: Language, pe: usize) {
        if self.line_start < pe {
            self.emit_newline(lang, pe);
        }
    }

    /// エンティティスパンの放出（エンティティモードのみ・擬似種別は抑止）
    pub fn emit_entity(&mut self, lang: Language, entity: Entity, ts: usize, te: usize) {
        if self.mode == ScanMode::Entity && !entity.is_pseudo() {
            self.sink.entity(EntitySpan {
                lang,
                entity,
                start: ts,
                end: te,
            });
        }
    }

    /// 埋め込み遷移用: フラグのスナップショット取得
    #[must_use]
    pub const fn flags(&self) -> LineFlags {
        LineFlags {
            contains_code: self.contains_code,
            whole_line_comment: self.whole_line_comment,
        }
    }

    /// 埋め込み遷移用: フラグの復元
    pub fn set_flags(&mut self, flags: LineFlags) {
        self.contains_code = flags.contains_code;
        self.whole_line_comment = flags.whole_line_comment;
    }

    /// 埋め込み遷移用: ゲストに渡す前のフラグクリア
    pub fn clear_flags(&mut self) {
        self.contains_code = false;
        self.whole_line_comment = false;
    }

    /// 空白エントリ判定
    ///
    /// エントリデリミタ直後 `after` から行末まで空白しかない場合、
    /// ホスト行をその改行まで確定して次の行頭オフセットを返します。
    /// デリミタと同じ行にゲスト内容が続く場合は `None` を返します。
    pub fn check_blank_entry(&mut self, host: Language, after: usize) -> Option<usize> {
        let mut j = after;
        while j < self.buf.len() && is_inline_space(self.buf[j]) {
            j += 1;
        }
        if j < self.buf.len() && self.buf[j] == b'\n' {
            self.emit_entity(host, Entity::CheckBlankEntry, after, j + 1);
            self.emit_newline(host, j + 1);
            return Some(j + 1);
        }
        None
    }

    fn current_kind(&self) -> LineKind {
        if self.contains_code {
            LineKind::LineCode
        } else if self.whole_line_comment {
            LineKind::LineComment
        } else {
            LineKind::LineBlank
        }
    }
}

/// 改行以外の空白バイトか
#[must_use]
pub const fn is_inline_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | 0x0c)
}
