// crates/core/src/scan/script.rs
//! スクリプト系言語の機械
//!
//! `#` 系の行コメントに加えて、行頭アンカー付きブロック
//! (Ruby の `=begin`/`=end`、Octave/MATLAB の `%{`/`%}`)、Perl の POD、
//! Python の三連引用文字列といったスクリプト固有の構文を扱います。

use crate::language::Language;
use crate::scan::event::Entity;
use crate::scan::grammar::{
    consume_string, escaped_newline_len, is_ascii_operator, starts_with_ci, Stop, StringRule,
};
use crate::scan::kernel::{is_inline_space, Kernel};

/// 行頭アンカーの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// 1桁目から始まる必要がある (Ruby `=begin`)
    Column0,
    /// 行にマーカーと空白しか無い場合のみ有効 (Octave `%{`)
    MarkerOnlyLine,
}

/// 行頭アンカー付きブロックコメント
#[derive(Debug, Clone, Copy)]
pub struct AnchoredBlock {
    pub open: &'static str,
    pub close: &'static str,
    pub anchor: Anchor,
}

/// スクリプト系言語のトークン文法
#[derive(Debug)]
pub struct ScriptGrammar {
    pub lang: Language,
    pub line_comments: &'static [&'static str],
    pub anchored_block: Option<AnchoredBlock>,
    /// Perl の `=pod` .. `=cut` ブロックを解釈するか
    pub pod: bool,
    pub strings: &'static [StringRule],
    pub continuation: bool,
    /// `$#` / `${#...}` の `#` をコメントとして扱わない
    pub hash_guard: bool,
}

/// バッファ全体を走査して最終行まで放出する
pub fn scan_script(g: &ScriptGrammar, k: &mut Kernel<'_, '_>) {
    let pe = k.buf().len();
    scan_script_until(g, k, 0, None);
    k.emit_final(g.lang, pe);
}

/// `from` から停止パターンまで走査し、停止位置を返す
pub fn scan_script_until(
    g: &ScriptGrammar,
    k: &mut Kernel<'_, '_>,
    from: usize,
    stop: Option<Stop>,
) -> usize {
    let buf = k.buf();
    let pe = buf.len();
    let mut p = from;

    while p < pe {
        if let Some(s) = stop {
            if s.matches(buf, p) {
                return p;
            }
        }

        let b = buf[p];

        if b == b'\n' {
            k.emit_entity(g.lang, Entity::Newline, p, p + 1);
            k.emit_newline(g.lang, p + 1);
            p += 1;
            continue;
        }

        if is_inline_space(b) {
            let ts = p;
            while p < pe && is_inline_space(buf[p]) {
                p += 1;
            }
            k.emit_entity(g.lang, Entity::Space, ts, p);
            continue;
        }

        if let Some(block) = g.anchored_block {
            if anchor_matches(buf, p, k, block) {
                p = consume_anchored_block(g.lang, k, p, block);
                continue;
            }
        }

        if g.pod && p == k.line_start() && b == b'=' {
            if let Some(&next) = buf.get(p + 1) {
                if next.is_ascii_alphabetic() {
                    p = consume_pod(g.lang, k, p);
                    continue;
                }
            }
        }

        if let Some(prefix) = g
            .line_comments
            .iter()
            .find(|c| buf[p..].starts_with(c.as_bytes()))
        {
            if !(g.hash_guard && *prefix == "#" && hash_guarded(buf, p)) {
                let ts = p;
                k.mark_comment();
                while p < pe && buf[p] != b'\n' {
                    p += 1;
                }
                k.emit_entity(g.lang, Entity::Comment, ts, p);
                continue;
            }
        }

        if let Some(rule) = g
            .strings
            .iter()
            .find(|r| buf[p..].starts_with(r.open.as_bytes()))
        {
            p = consume_string(g.lang, k, p, rule);
            continue;
        }

        if b.is_ascii_digit() {
            let ts = p;
            while p < pe && (buf[p].is_ascii_alphanumeric() || buf[p] == b'.' || buf[p] == b'_') {
                p += 1;
            }
            k.mark_code();
            k.emit_entity(g.lang, Entity::Number, ts, p);
            continue;
        }

        if b == b'_' || b.is_ascii_alphabetic() {
            let ts = p;
            while p < pe && (buf[p] == b'_' || buf[p].is_ascii_alphanumeric()) {
                p += 1;
            }
            k.mark_code();
            k.emit_entity(g.lang, Entity::Identifier, ts, p);
            continue;
        }

        if g.continuation && b == b'\\' {
            if let Some(skip) = escaped_newline_len(buf, p) {
                k.mark_code();
                k.emit_entity(g.lang, Entity::EscapedNewline, p, p + skip);
                p += skip;
                continue;
            }
        }

        let ts = p;
        p += 1;
        k.mark_code();
        let kind = if is_ascii_operator(b) {
            Entity::Operator
        } else {
            Entity::Any
        };
        k.emit_entity(g.lang, kind, ts, p);
    }

    pe
}

/// `$#` / `{#` の `#` はコメントではない
fn hash_guarded(buf: &[u8], p: usize) -> bool {
    p > 0 && matches!(buf[p - 1], b'$' | b'{')
}

fn anchor_matches(buf: &[u8], p: usize, k: &Kernel<'_, '_>, block: AnchoredBlock) -> bool {
    if !buf[p..].starts_with(block.open.as_bytes()) {
        return false;
    }
    match block.anchor {
        Anchor::Column0 => {
            // マーカーは行頭から始まり、直後は空白か行末
            p == k.line_start()
                && buf
                    .get(p + block.open.len())
                    .is_none_or(|&b| is_inline_space(b) || b == b'\n')
        }
        Anchor::MarkerOnlyLine => {
            k.line_untouched() && rest_of_line_is_blank(buf, p + block.open.len())
        }
    }
}

fn rest_of_line_is_blank(buf: &[u8], mut p: usize) -> bool {
    while p < buf.len() {
        match buf[p] {
            b'\n' => return true,
            b if is_inline_space(b) => p += 1,
            _ => return false,
        }
    }
    true
}

/// 行頭アンカー付きブロックを消費する（終了マーカー行を含む）
fn consume_anchored_block(
    lang: Language,
    k: &mut Kernel<'_, '_>,
    start: usize,
    block: AnchoredBlock,
) -> usize {
    let buf = k.buf();
    let pe = buf.len();
    k.mark_comment();
    let mut p = start + block.open.len();

    while p < pe {
        if buf[p] == b'\n' {
            k.emit_entity(lang, Entity::InternalNewline, p, p + 1);
            k.emit_internal_newline(lang, p + 1);
            p += 1;
            // 終了マーカーの判定は行頭でのみ行う
            let close_here = match block.anchor {
                Anchor::Column0 => buf[p..].starts_with(block.close.as_bytes()),
                Anchor::MarkerOnlyLine => {
                    let mut q = p;
                    while q < pe && is_inline_space(buf[q]) {
                        q += 1;
                    }
                    buf[q..].starts_with(block.close.as_bytes())
                        && rest_of_line_is_blank(buf, q + block.close.len())
                }
            };
            if close_here {
                k.mark_comment();
                while p < pe && buf[p] != b'\n' {
                    p += 1;
                }
                break;
            }
            continue;
        }
        if !is_inline_space(buf[p]) {
            k.mark_comment();
        }
        p += 1;
    }

    k.emit_entity(lang, Entity::Comment, start, p);
    p
}

/// POD ブロック (`=pod` .. `=cut`) を消費する
fn consume_pod(lang: Language, k: &mut Kernel<'_, '_>, start: usize) -> usize {
    let buf = k.buf();
    let pe = buf.len();
    k.mark_comment();
    let mut p = start;

    while p < pe {
        if buf[p] == b'\n' {
            k.emit_entity(lang, Entity::InternalNewline, p, p + 1);
            k.emit_internal_newline(lang, p + 1);
            p += 1;
            if starts_with_ci(buf, p, b"=cut") {
                k.mark_comment();
                while p < pe && buf[p] != b'\n' {
                    p += 1;
                }
                break;
            }
            continue;
        }
        if !is_inline_space(buf[p]) {
            k.mark_comment();
        }
        p += 1;
    }

    k.emit_entity(lang, Entity::Comment, start, p);
    p
}

// ---------------------------------------------------------------------------
// 文法テーブル
// ---------------------------------------------------------------------------

const DQ: StringRule = StringRule {
    open: "\"",
    close: "\"",
    escape: true,
    multiline: false,
};

const SQ: StringRule = StringRule {
    open: "'",
    close: "'",
    escape: true,
    multiline: false,
};

const TRIPLE_DQ: StringRule = StringRule {
    open: "\"\"\"",
    close: "\"\"\"",
    escape: true,
    multiline: true,
};

const TRIPLE_SQ: StringRule = StringRule {
    open: "'''",
    close: "'''",
    escape: true,
    multiline: true,
};

pub const SHELL: ScriptGrammar = ScriptGrammar {
    lang: Language::Shell,
    line_comments: &["#"],
    anchored_block: None,
    pod: false,
    strings: &[DQ, SQ],
    continuation: true,
    hash_guard: true,
};

pub const PYTHON: ScriptGrammar = ScriptGrammar {
    lang: Language::Python,
    line_comments: &["#"],
    anchored_block: None,
    pod: false,
    strings: &[TRIPLE_DQ, TRIPLE_SQ, DQ, SQ],
    continuation: true,
    hash_guard: false,
};

pub const RUBY: ScriptGrammar = ScriptGrammar {
    lang: Language::Ruby,
    line_comments: &["#"],
    anchored_block: Some(AnchoredBlock {
        open: "=begin",
        close: "=end",
        anchor: Anchor::Column0,
    }),
    pod: false,
    strings: &[DQ, SQ],
    continuation: true,
    hash_guard: false,
};

pub const PERL: ScriptGrammar = ScriptGrammar {
    lang: Language::Perl,
    line_comments: &["#"],
    anchored_block: None,
    pod: true,
    strings: &[DQ, SQ],
    continuation: false,
    hash_guard: true,
};

pub const MAKE: ScriptGrammar = ScriptGrammar {
    lang: Language::Make,
    line_comments: &["#"],
    anchored_block: None,
    pod: false,
    strings: &[],
    continuation: true,
    hash_guard: true,
};

pub const AUTOMAKE: ScriptGrammar = ScriptGrammar {
    lang: Language::Automake,
    line_comments: &["#"],
    anchored_block: None,
    pod: false,
    strings: &[],
    continuation: true,
    hash_guard: true,
};

pub const AUTOCONF: ScriptGrammar = ScriptGrammar {
    lang: Language::Autoconf,
    line_comments: &["#", "dnl "],
    anchored_block: None,
    pod: false,
    strings: &[],
    continuation: false,
    hash_guard: false,
};

pub const CMAKE: ScriptGrammar = ScriptGrammar {
    lang: Language::Cmake,
    line_comments: &["#"],
    anchored_block: None,
    pod: false,
    strings: &[DQ],
    continuation: false,
    hash_guard: false,
};

pub const TCL: ScriptGrammar = ScriptGrammar {
    lang: Language::Tcl,
    line_comments: &["#"],
    anchored_block: None,
    pod: false,
    strings: &[DQ],
    continuation: true,
    hash_guard: true,
};

pub const AWK: ScriptGrammar = ScriptGrammar {
    lang: Language::Awk,
    line_comments: &["#"],
    anchored_block: None,
    pod: false,
    strings: &[DQ],
    continuation: true,
    hash_guard: false,
};

pub const BOO: ScriptGrammar = ScriptGrammar {
    lang: Language::Boo,
    line_comments: &["#", "//"],
    anchored_block: None,
    pod: false,
    strings: &[TRIPLE_DQ, DQ, SQ],
    continuation: false,
    hash_guard: false,
};

pub const OCTAVE: ScriptGrammar = ScriptGrammar {
    lang: Language::Octave,
    line_comments: &["#", "%"],
    anchored_block: Some(AnchoredBlock {
        open: "%{",
        close: "%}",
        anchor: Anchor::MarkerOnlyLine,
    }),
    pod: false,
    strings: &[SQ, DQ],
    continuation: false,
    hash_guard: false,
};

pub const MATLAB: ScriptGrammar = ScriptGrammar {
    lang: Language::Matlab,
    line_comments: &["%"],
    anchored_block: Some(AnchoredBlock {
        open: "%{",
        close: "%}",
        anchor: Anchor::MarkerOnlyLine,
    }),
    pod: false,
    strings: &[SQ],
    continuation: false,
    hash_guard: false,
};

/// ASP.NET (VB) ゲスト用の Visual Basic 風文法
pub const VB_GUEST: ScriptGrammar = ScriptGrammar {
    lang: Language::Visualbasic,
    line_comments: &["'"],
    anchored_block: None,
    pod: false,
    strings: &[DQ],
    continuation: false,
    hash_guard: false,
};
