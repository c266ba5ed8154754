// crates/core/src/scan/grammar.rs
//! 宣言的トークン文法と汎用バイト機械
//!
//! C 系をはじめ、コメント構文と文字列構文で記述できる言語はすべて
//! `TokenGrammar` のテーブルで表現し、単一の機械 `scan_tokens` が解釈
//! します。トークン規則は宣言順に試行され、同順位では先頭一致が優先
//! されます（この順序が分類の安定性を決めるため変更しないこと）。

use crate::language::Language;
use crate::scan::event::Entity;
use crate::scan::kernel::{is_inline_space, Kernel};

/// 文字列リテラル規則
#[derive(Debug, Clone, Copy)]
pub struct StringRule {
    pub open: &'static str,
    pub close: &'static str,
    /// バックスラッシュエスケープを解釈するか
    pub escape: bool,
    /// 改行をまたげるか（またげない場合は行末で打ち切り）
    pub multiline: bool,
}

impl StringRule {
    const fn quote(delim: &'static str) -> Self {
        Self {
            open: delim,
            close: delim,
            escape: true,
            multiline: false,
        }
    }

    const fn raw(open: &'static str, close: &'static str) -> Self {
        Self {
            open,
            close,
            escape: false,
            multiline: true,
        }
    }
}

/// 言語ごとのトークン文法
#[derive(Debug)]
pub struct TokenGrammar {
    pub lang: Language,
    /// ブロックコメント（行コメントより先に試行される）
    pub block_comments: &'static [(&'static str, &'static str)],
    pub nested_blocks: bool,
    pub line_comments: &'static [&'static str],
    pub strings: &'static [StringRule],
    /// 行頭（空白のみ先行）でのみ有効なプリプロセッサ接頭辞
    pub preproc: Option<&'static str>,
    /// バックスラッシュ+改行を論理行の継続として扱うか
    pub continuation: bool,
    pub keywords: &'static [&'static str],
}

/// ゲスト走査の停止パターン
#[derive(Debug, Clone, Copy)]
pub struct Stop {
    pub pat: &'static [u8],
    pub case_insensitive: bool,
}

impl Stop {
    #[must_use]
    pub const fn new(pat: &'static [u8]) -> Self {
        Self {
            pat,
            case_insensitive: false,
        }
    }

    #[must_use]
    pub const fn ci(pat: &'static [u8]) -> Self {
        Self {
            pat,
            case_insensitive: true,
        }
    }

    #[must_use]
    pub fn matches(&self, buf: &[u8], p: usize) -> bool {
        if self.case_insensitive {
            starts_with_ci(buf, p, self.pat)
        } else {
            buf[p..].starts_with(self.pat)
        }
    }
}

/// バッファ全体を走査して最終行まで放出する
pub fn scan_tokens(g: &TokenGrammar, k: &mut Kernel<'_, '_>) {
    let pe = k.buf().len();
    scan_tokens_until(g, k, 0, None);
    k.emit_final(g.lang, pe);
}

/// `from` から停止パターンまで走査し、停止位置を返す
///
/// 停止パターンはトークン境界でのみ認識されます。見つからない場合は
/// バッファ末尾を返します（最終行の放出は呼び出し側の責務）。
pub fn scan_tokens_until(
    g: &TokenGrammar,
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

        if let Some((open, close)) = g
            .block_comments
            .iter()
            .find(|(open, _)| buf[p..].starts_with(open.as_bytes()))
        {
            p = consume_block_comment(g.lang, k, p, open, close, g.nested_blocks);
            continue;
        }

        if g.line_comments
            .iter()
            .any(|c| buf[p..].starts_with(c.as_bytes()))
        {
            let ts = p;
            k.mark_comment();
            while p < pe && buf[p] != b'\n' {
                p += 1;
            }
            k.emit_entity(g.lang, Entity::Comment, ts, p);
            continue;
        }

        if let Some(pp) = g.preproc {
            if k.line_untouched() && buf[p..].starts_with(pp.as_bytes()) {
                p = consume_preproc(g, k, p);
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
            let word = &buf[ts..p];
            let kind = if g.keywords.iter().any(|kw| kw.as_bytes() == word) {
                Entity::Keyword
            } else {
                Entity::Identifier
            };
            k.emit_entity(g.lang, kind, ts, p);
            continue;
        }

        if g.continuation && b == b'\\' {
            if let Some(skip) = escaped_newline_len(buf, p) {
                // 論理行は継続する: 行イベントは放出しない
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

/// `\` + 改行 (LF または CRLF) の長さ。継続でなければ `None`
pub(crate) fn escaped_newline_len(buf: &[u8], p: usize) -> Option<usize> {
    match buf.get(p + 1) {
        Some(b'\n') => Some(2),
        Some(b'\r') if buf.get(p + 2) == Some(&b'\n') => Some(3),
        _ => None,
    }
}

/// ブロックコメントを消費する
///
/// 内部改行の前に必ず `mark_comment` を済ませ、継続行がコメントとして
/// 会計されるようにします。未終端の場合はバッファ末尾まで消費します。
pub(crate) fn consume_block_comment(
    lang: Language,
    k: &mut Kernel<'_, '_>,
    start: usize,
    open: &str,
    close: &str,
    nested: bool,
) -> usize {
    let buf = k.buf();
    let pe = buf.len();
    k.mark_comment();
    let mut p = start + open.len();
    let mut depth = 1usize;

    while p < pe {
        if buf[p] == b'\n' {
            k.emit_entity(lang, Entity::InternalNewline, p, p + 1);
            k.emit_internal_newline(lang, p + 1);
            p += 1;
            continue;
        }
        if nested && buf[p..].starts_with(open.as_bytes()) {
            k.mark_comment();
            depth += 1;
            p += open.len();
            continue;
        }
        if buf[p..].starts_with(close.as_bytes()) {
            k.mark_comment();
            p += close.len();
            depth -= 1;
            if depth == 0 {
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

/// 文字列リテラルを消費する
///
/// 複数行文字列は内部改行のたびに行を確定し、以降の非空白バイトで
/// 再度コードとしてマークします。
pub(crate) fn consume_string(
    lang: Language,
    k: &mut Kernel<'_, '_>,
    start: usize,
    rule: &StringRule,
) -> usize {
    let buf = k.buf();
    let pe = buf.len();
    k.mark_code();
    let mut p = start + rule.open.len();

    while p < pe {
        if buf[p] == b'\n' {
            if !rule.multiline {
                // 未終端文字列は行末で打ち切る
                break;
            }
            k.emit_entity(lang, Entity::InternalNewline, p, p + 1);
            k.emit_internal_newline(lang, p + 1);
            p += 1;
            continue;
        }
        if rule.escape && buf[p] == b'\\' {
            p = (p + 2).min(pe);
            continue;
        }
        if buf[p..].starts_with(rule.close.as_bytes()) {
            k.mark_code();
            p += rule.close.len();
            k.emit_entity(lang, Entity::String, start, p);
            return p;
        }
        if !is_inline_space(buf[p]) {
            k.mark_code();
        }
        p += 1;
    }

    k.emit_entity(lang, Entity::String, start, p);
    p
}

fn consume_preproc(g: &TokenGrammar, k: &mut Kernel<'_, '_>, start: usize) -> usize {
    let buf = k.buf();
    let pe = buf.len();
    k.mark_code();
    let mut p = start;

    while p < pe && buf[p] != b'\n' {
        if buf[p] == b'\\' {
            if let Some(skip) = escaped_newline_len(buf, p) {
                p += skip;
                continue;
            }
        }
        p += 1;
    }

    k.emit_entity(g.lang, Entity::Preproc, start, p);
    p
}

pub(crate) fn is_ascii_operator(b: u8) -> bool {
    matches!(
        b,
        b'+' | b'-'
            | b'*'
            | b'/'
            | b'%'
            | b'='
            | b'<'
            | b'>'
            | b'!'
            | b'&'
            | b'|'
            | b'^'
            | b'~'
            | b'?'
            | b':'
            | b';'
            | b','
            | b'.'
    )
}

/// 大文字小文字を無視した前方一致
#[must_use]
pub fn starts_with_ci(buf: &[u8], p: usize, pat: &[u8]) -> bool {
    buf.len() - p >= pat.len()
        && buf[p..p + pat.len()]
            .iter()
            .zip(pat)
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
}

// ---------------------------------------------------------------------------
// 文法テーブル
// ---------------------------------------------------------------------------

const DQ: StringRule = StringRule::quote("\"");
const SQ: StringRule = StringRule::quote("'");

const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "int", "long", "register", "return", "short",
    "signed", "sizeof", "static", "struct", "switch", "typedef", "union", "unsigned", "void",
    "volatile", "while",
];

const CPP_KEYWORDS: &[&str] = &[
    "bool", "break", "case", "catch", "class", "const", "continue", "delete", "do", "double",
    "else", "enum", "explicit", "false", "for", "friend", "if", "inline", "int", "namespace",
    "new", "operator", "private", "protected", "public", "return", "static", "struct", "switch",
    "template", "this", "throw", "true", "try", "typedef", "typename", "using", "virtual", "void",
    "while",
];

const JS_KEYWORDS: &[&str] = &[
    "break", "case", "catch", "const", "continue", "default", "delete", "do", "else", "false",
    "finally", "for", "function", "if", "in", "instanceof", "let", "new", "null", "return",
    "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while",
];

pub const C: TokenGrammar = TokenGrammar {
    lang: Language::C,
    block_comments: &[("/*", "*/")],
    nested_blocks: false,
    line_comments: &["//"],
    strings: &[DQ, SQ],
    preproc: Some("#"),
    continuation: true,
    keywords: C_KEYWORDS,
};

pub const CPP: TokenGrammar = TokenGrammar {
    lang: Language::Cpp,
    block_comments: &[("/*", "*/")],
    nested_blocks: false,
    line_comments: &["//"],
    strings: &[DQ, SQ],
    preproc: Some("#"),
    continuation: true,
    keywords: CPP_KEYWORDS,
};

pub const OBJECTIVE_C: TokenGrammar = TokenGrammar {
    lang: Language::ObjectiveC,
    block_comments: &[("/*", "*/")],
    nested_blocks: false,
    line_comments: &["//"],
    strings: &[
        StringRule {
            open: "@\"",
            close: "\"",
            escape: true,
            multiline: false,
        },
        DQ,
        SQ,
    ],
    preproc: Some("#"),
    continuation: true,
    keywords: C_KEYWORDS,
};

pub const JAVA: TokenGrammar = TokenGrammar {
    lang: Language::Java,
    block_comments: &[("/*", "*/")],
    nested_blocks: false,
    line_comments: &["//"],
    strings: &[DQ, SQ],
    preproc: None,
    continuation: false,
    keywords: CPP_KEYWORDS,
};

pub const CSHARP: TokenGrammar = TokenGrammar {
    lang: Language::Csharp,
    block_comments: &[("/*", "*/")],
    nested_blocks: false,
    line_comments: &["//"],
    strings: &[StringRule::raw("@\"", "\""), DQ, SQ],
    preproc: Some("#"),
    continuation: false,
    keywords: CPP_KEYWORDS,
};

pub const JAVASCRIPT: TokenGrammar = TokenGrammar {
    lang: Language::Javascript,
    block_comments: &[("/*", "*/")],
    nested_blocks: false,
    line_comments: &["//"],
    strings: &[
        DQ,
        SQ,
        StringRule {
            open: "`",
            close: "`",
            escape: true,
            multiline: true,
        },
    ],
    preproc: None,
    continuation: false,
    keywords: JS_KEYWORDS,
};

pub const GO: TokenGrammar = TokenGrammar {
    lang: Language::Go,
    block_comments: &[("/*", "*/")],
    nested_blocks: false,
    line_comments: &["//"],
    strings: &[DQ, SQ, StringRule::raw("`", "`")],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const D: TokenGrammar = TokenGrammar {
    lang: Language::D,
    block_comments: &[("/*", "*/"), ("/+", "+/")],
    nested_blocks: true,
    line_comments: &["//"],
    strings: &[DQ, SQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const RUST: TokenGrammar = TokenGrammar {
    lang: Language::Rust,
    block_comments: &[("/*", "*/")],
    nested_blocks: true,
    line_comments: &["//"],
    strings: &[DQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const PIKE: TokenGrammar = TokenGrammar {
    lang: Language::Pike,
    block_comments: &[("/*", "*/")],
    nested_blocks: false,
    line_comments: &["//"],
    strings: &[DQ, SQ],
    preproc: Some("#"),
    continuation: true,
    keywords: &[],
};

pub const LIMBO: TokenGrammar = TokenGrammar {
    lang: Language::Limbo,
    block_comments: &[],
    nested_blocks: false,
    line_comments: &["#"],
    strings: &[DQ, SQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const VALA: TokenGrammar = TokenGrammar {
    lang: Language::Vala,
    block_comments: &[("/*", "*/")],
    nested_blocks: false,
    line_comments: &["//"],
    strings: &[DQ, SQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const SCALA: TokenGrammar = TokenGrammar {
    lang: Language::Scala,
    block_comments: &[("/*", "*/")],
    nested_blocks: true,
    line_comments: &["//"],
    strings: &[DQ, SQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const ACTIONSCRIPT: TokenGrammar = TokenGrammar {
    lang: Language::Actionscript,
    block_comments: &[("/*", "*/")],
    nested_blocks: false,
    line_comments: &["//"],
    strings: &[DQ, SQ],
    preproc: None,
    continuation: false,
    keywords: JS_KEYWORDS,
};

pub const GROOVY: TokenGrammar = TokenGrammar {
    lang: Language::Groovy,
    block_comments: &[("/*", "*/")],
    nested_blocks: false,
    line_comments: &["//"],
    strings: &[DQ, SQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const HAXE: TokenGrammar = TokenGrammar {
    lang: Language::Haxe,
    block_comments: &[("/*", "*/")],
    nested_blocks: false,
    line_comments: &["//"],
    strings: &[DQ, SQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const CSS: TokenGrammar = TokenGrammar {
    lang: Language::Css,
    block_comments: &[("/*", "*/")],
    nested_blocks: false,
    line_comments: &[],
    strings: &[DQ, SQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const PHP: TokenGrammar = TokenGrammar {
    lang: Language::Php,
    block_comments: &[("/*", "*/")],
    nested_blocks: false,
    line_comments: &["//", "#"],
    strings: &[DQ, SQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const CLEARSILVER: TokenGrammar = TokenGrammar {
    lang: Language::Clearsilver,
    block_comments: &[],
    nested_blocks: false,
    line_comments: &["#"],
    strings: &[DQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const PASCAL: TokenGrammar = TokenGrammar {
    lang: Language::Pascal,
    block_comments: &[("{", "}"), ("(*", "*)")],
    nested_blocks: false,
    line_comments: &["//"],
    strings: &[SQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const SQL: TokenGrammar = TokenGrammar {
    lang: Language::Sql,
    block_comments: &[("/*", "*/")],
    nested_blocks: false,
    line_comments: &["--"],
    strings: &[SQ, DQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const HASKELL: TokenGrammar = TokenGrammar {
    lang: Language::Haskell,
    block_comments: &[("{-", "-}")],
    nested_blocks: true,
    line_comments: &["--"],
    strings: &[DQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const OCAML: TokenGrammar = TokenGrammar {
    lang: Language::Ocaml,
    block_comments: &[("(*", "*)")],
    nested_blocks: true,
    line_comments: &[],
    strings: &[DQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const LUA: TokenGrammar = TokenGrammar {
    lang: Language::Lua,
    block_comments: &[("--[[", "]]")],
    nested_blocks: false,
    line_comments: &["--"],
    strings: &[DQ, SQ, StringRule::raw("[[", "]]")],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const ERLANG: TokenGrammar = TokenGrammar {
    lang: Language::Erlang,
    block_comments: &[],
    nested_blocks: false,
    line_comments: &["%"],
    strings: &[DQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const LISP: TokenGrammar = TokenGrammar {
    lang: Language::Lisp,
    block_comments: &[],
    nested_blocks: false,
    line_comments: &[";"],
    strings: &[DQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const SCHEME: TokenGrammar = TokenGrammar {
    lang: Language::Scheme,
    block_comments: &[("#|", "|#")],
    nested_blocks: true,
    line_comments: &[";"],
    strings: &[DQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const VIM: TokenGrammar = TokenGrammar {
    lang: Language::Vim,
    block_comments: &[],
    nested_blocks: false,
    line_comments: &["\""],
    strings: &[SQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const TEX: TokenGrammar = TokenGrammar {
    lang: Language::Tex,
    block_comments: &[],
    nested_blocks: false,
    line_comments: &["%"],
    strings: &[],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const SMALLTALK: TokenGrammar = TokenGrammar {
    lang: Language::Smalltalk,
    block_comments: &[("\"", "\"")],
    nested_blocks: false,
    line_comments: &[],
    strings: &[StringRule {
        open: "'",
        close: "'",
        escape: false,
        multiline: true,
    }],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const ADA: TokenGrammar = TokenGrammar {
    lang: Language::Ada,
    block_comments: &[],
    nested_blocks: false,
    line_comments: &["--"],
    strings: &[DQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const VHDL: TokenGrammar = TokenGrammar {
    lang: Language::Vhdl,
    block_comments: &[],
    nested_blocks: false,
    line_comments: &["--"],
    strings: &[DQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const EIFFEL: TokenGrammar = TokenGrammar {
    lang: Language::Eiffel,
    block_comments: &[],
    nested_blocks: false,
    line_comments: &["--"],
    strings: &[DQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const REXX: TokenGrammar = TokenGrammar {
    lang: Language::Rexx,
    block_comments: &[("/*", "*/")],
    nested_blocks: true,
    line_comments: &[],
    strings: &[SQ, DQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

pub const ASSEMBLER: TokenGrammar = TokenGrammar {
    lang: Language::Assembler,
    block_comments: &[("/*", "*/")],
    nested_blocks: false,
    line_comments: &[";", "//", "#"],
    strings: &[DQ, SQ],
    preproc: None,
    continuation: false,
    keywords: &[],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::event::{LineKind, VecSink};
    use crate::scan::kernel::ScanMode;

    fn line_kinds(g: &TokenGrammar, src: &[u8]) -> Vec<LineKind> {
        let mut sink = VecSink::default();
        let mut k = Kernel::new(src, ScanMode::Count, &mut sink);
        scan_tokens(g, &mut k);
        sink.lines.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_c_mixed_buffer() {
        // comment, comment, comment, code, blank
        let kinds = line_kinds(&C, b"// c\n/* block\nstill block */\ncode;\n\n");
        assert_eq!(
            kinds,
            vec![
                LineKind::LineComment,
                LineKind::LineComment,
                LineKind::LineComment,
                LineKind::LineCode,
                LineKind::LineBlank,
            ]
        );
    }

    #[test]
    fn test_c_line_coverage() {
        let src = b"int x;\n/* a\nb */\n\ncode;";
        let mut sink = VecSink::default();
        let mut k = Kernel::new(src, ScanMode::Count, &mut sink);
        scan_tokens(&C, &mut k);
        let mut pos = 0;
        for ev in &sink.lines {
            assert_eq!(ev.start, pos);
            pos = ev.end;
        }
        assert_eq!(pos, src.len());
    }

    #[test]
    fn test_comment_then_code_promotes() {
        let kinds = line_kinds(&C, b"/* c */ x();\n");
        assert_eq!(kinds, vec![LineKind::LineCode]);
    }

    #[test]
    fn test_code_before_comment_stays_code() {
        let kinds = line_kinds(&C, b"x(); // trailing\n");
        assert_eq!(kinds, vec![LineKind::LineCode]);
    }

    #[test]
    fn test_blank_inside_block_comment() {
        let kinds = line_kinds(&C, b"/*\n\n*/\n");
        assert_eq!(
            kinds,
            vec![
                LineKind::LineComment,
                LineKind::LineBlank,
                LineKind::LineComment,
            ]
        );
    }

    #[test]
    fn test_unterminated_block_comment_drains() {
        let kinds = line_kinds(&C, b"/* open\nstill\n");
        assert_eq!(kinds, vec![LineKind::LineComment, LineKind::LineComment]);
    }

    #[test]
    fn test_unterminated_string_stops_at_eol() {
        let kinds = line_kinds(&C, b"\"open\n// next\n");
        assert_eq!(kinds, vec![LineKind::LineCode, LineKind::LineComment]);
    }

    #[test]
    fn test_comment_marker_inside_string() {
        let kinds = line_kinds(&C, b"s = \"// not a comment\";\n");
        assert_eq!(kinds, vec![LineKind::LineCode]);
    }

    #[test]
    fn test_preproc_is_code() {
        let kinds = line_kinds(&C, b"#include <stdio.h>\n");
        assert_eq!(kinds, vec![LineKind::LineCode]);
    }

    #[test]
    fn test_preproc_continuation_spans_lines() {
        // The escaped newline keeps the logical line open: one event covers
        // both physical lines.
        let src = b"#define X \\\n  1\nint y;\n";
        let mut sink = VecSink::default();
        let mut k = Kernel::new(src, ScanMode::Count, &mut sink);
        scan_tokens(&C, &mut k);
        assert_eq!(sink.lines.len(), 2);
        assert_eq!(sink.lines[0].kind, LineKind::LineCode);
        assert_eq!((sink.lines[0].start, sink.lines[0].end), (0, 16));
    }

    #[test]
    fn test_nested_block_comments_rust() {
        let kinds = line_kinds(&RUST, b"/* a /* b */ c */\nlet x = 1;\n");
        assert_eq!(kinds, vec![LineKind::LineComment, LineKind::LineCode]);
    }

    #[test]
    fn test_trailing_whitespace_is_blank() {
        let kinds = line_kinds(&C, b"   \t\nx;\n");
        assert_eq!(kinds, vec![LineKind::LineBlank, LineKind::LineCode]);
    }

    #[test]
    fn test_final_line_without_newline() {
        let kinds = line_kinds(&C, b"x;\ny");
        assert_eq!(kinds, vec![LineKind::LineCode, LineKind::LineCode]);
    }

    #[test]
    fn test_entity_mode_spans() {
        let mut sink = VecSink::default();
        let src = b"int x = 42; // done\n";
        let mut k = Kernel::new(src, ScanMode::Entity, &mut sink);
        scan_tokens(&C, &mut k);
        let kinds: Vec<Entity> = sink.entities.iter().map(|e| e.entity).collect();
        assert!(kinds.contains(&Entity::Keyword));
        assert!(kinds.contains(&Entity::Identifier));
        assert!(kinds.contains(&Entity::Number));
        assert!(kinds.contains(&Entity::Comment));
        assert!(kinds.contains(&Entity::Newline));
        assert!(sink.lines.is_empty());
    }

    #[test]
    fn test_lua_long_comment_before_line_comment() {
        let kinds = line_kinds(&LUA, b"--[[ block\nstill ]]\nx = 1\n");
        assert_eq!(
            kinds,
            vec![
                LineKind::LineComment,
                LineKind::LineComment,
                LineKind::LineCode,
            ]
        );
    }

    #[test]
    fn test_smalltalk_quote_comment() {
        let kinds = line_kinds(&SMALLTALK, b"\"a comment\"\nx := 1.\n");
        assert_eq!(kinds, vec![LineKind::LineComment, LineKind::LineCode]);
    }

    #[test]
    fn test_stop_pattern_at_token_boundary() {
        let src = b"a = 1; ?>rest";
        let mut sink = VecSink::default();
        let mut k = Kernel::new(src, ScanMode::Count, &mut sink);
        let stop = scan_tokens_until(&PHP, &mut k, 0, Some(Stop::new(b"?>")));
        assert_eq!(stop, 7);
    }
}
