// crates/core/src/scan/basic.rs
//! BASIC 系と DOS バッチのスキャナ
//!
//! `REM` は語境界付きで大文字小文字を無視して照合する必要があるため、
//! 行単位の判定で処理します。Classic BASIC は行番号の後の `REM` も
//! コメント行として扱います。

use crate::language::Language;
use crate::scan::event::Entity;
use crate::scan::kernel::{is_inline_space, Kernel};

/// BASIC 系の方言
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicDialect {
    /// 行番号 + `REM` の古典 BASIC
    Classic,
    /// `'` と `REM` の構造化 BASIC
    Structured,
    /// Visual Basic (`'` と `REM`)
    Visual,
    /// DOS バッチ (`REM` と `::`)
    Bat,
}

impl BasicDialect {
    const fn lang(self) -> Language {
        match self {
            Self::Classic => Language::ClassicBasic,
            Self::Structured => Language::StructuredBasic,
            Self::Visual => Language::Visualbasic,
            Self::Bat => Language::Bat,
        }
    }
}

/// バッファ全体を走査する
pub fn scan_basic(dialect: BasicDialect, k: &mut Kernel<'_, '_>) {
    let lang = dialect.lang();
    let buf = k.buf();
    let pe = buf.len();
    let mut p = 0;

    while p < pe {
        let ls = p;
        let mut eol = ls;
        while eol < pe && buf[eol] != b'\n' {
            eol += 1;
        }
        let line = &buf[ls..eol];

        match comment_start(dialect, line) {
            None if line.iter().all(|&b| is_inline_space(b)) => {
                if !line.is_empty() {
                    k.emit_entity(lang, Entity::Space, ls, eol);
                }
            }
            None => {
                k.mark_code();
                emit_indent_and_body(lang, k, line, ls, Entity::Any);
            }
            Some(at) => {
                k.mark_comment();
                if at > 0 {
                    k.emit_entity(lang, Entity::Space, ls, ls + at);
                }
                k.emit_entity(lang, Entity::Comment, ls + at, eol);
            }
        }

        if eol < pe {
            k.emit_entity(lang, Entity::Newline, eol, eol + 1);
            k.emit_newline(lang, eol + 1);
            p = eol + 1;
        } else {
            p = pe;
        }
    }

    k.emit_final(lang, pe);
}

/// コメントが始まる行内オフセットを返す（コメント行でなければ `None`）
fn comment_start(dialect: BasicDialect, line: &[u8]) -> Option<usize> {
    let mut i = 0;
    while i < line.len() && is_inline_space(line[i]) {
        i += 1;
    }
    if i >= line.len() {
        return None;
    }

    match dialect {
        BasicDialect::Classic => {
            // 行番号を読み飛ばしてから REM を照合する
            let mut j = i;
            while j < line.len() && line[j].is_ascii_digit() {
                j += 1;
            }
            let mut m = j;
            while m < line.len() && is_inline_space(line[m]) {
                m += 1;
            }
            if is_rem(&line[m..]) {
                return Some(i);
            }
            None
        }
        BasicDialect::Structured | BasicDialect::Visual => {
            if line[i] == b'\'' {
                return Some(i);
            }
            if is_rem(&line[i..]) {
                return Some(i);
            }
            None
        }
        BasicDialect::Bat => {
            if line[i..].starts_with(b"::") {
                return Some(i);
            }
            if is_rem(&line[i..]) {
                return Some(i);
            }
            None
        }
    }
}

/// `REM` + 語境界
fn is_rem(rest: &[u8]) -> bool {
    rest.len() >= 3
        && rest[..3].eq_ignore_ascii_case(b"REM")
        && rest.get(3).is_none_or(|&b| is_inline_space(b))
}

fn emit_indent_and_body(
    lang: Language,
    k: &mut Kernel<'_, '_>,
    line: &[u8],
    ls: usize,
    kind: Entity,
) {
    let indent = line
        .iter()
        .position(|&b| !is_inline_space(b))
        .unwrap_or(line.len());
    if indent > 0 {
        k.emit_entity(lang, Entity::Space, ls, ls + indent);
    }
    if indent < line.len() {
        k.emit_entity(lang, kind, ls + indent, ls + line.len());
    }
}
