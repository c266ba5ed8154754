// crates/core/src/scan/fortran.rs
//! Fortran スキャナ（固定形式・自由形式）
//!
//! 固定形式は 1 桁目の `C`/`c`/`*`/`!` をコメント行として扱い、
//! 自由形式は最初の非空白が `!` の行をコメントとして扱います。
//! どちらも行単位の判定で十分なため、行ループで処理します。

use crate::language::Language;
use crate::scan::event::Entity;
use crate::scan::kernel::{is_inline_space, Kernel};

/// 固定形式 Fortran を走査する
pub fn scan_fortran_fixed(k: &mut Kernel<'_, '_>) {
    scan_lines(Language::FortranFixed, k, classify_fixed);
}

/// 自由形式 Fortran を走査する
pub fn scan_fortran_free(k: &mut Kernel<'_, '_>) {
    scan_lines(Language::FortranFree, k, classify_free);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineClass {
    Blank,
    Comment,
    Code,
}

fn classify_fixed(line: &[u8]) -> LineClass {
    if line.iter().all(|&b| is_inline_space(b)) {
        return LineClass::Blank;
    }
    if matches!(line[0], b'C' | b'c' | b'*' | b'!') {
        return LineClass::Comment;
    }
    match first_non_space(line) {
        Some(b'!') => LineClass::Comment,
        _ => LineClass::Code,
    }
}

fn classify_free(line: &[u8]) -> LineClass {
    match first_non_space(line) {
        None => LineClass::Blank,
        Some(b'!') => LineClass::Comment,
        _ => LineClass::Code,
    }
}

fn first_non_space(line: &[u8]) -> Option<u8> {
    line.iter().copied().find(|&b| !is_inline_space(b))
}

fn scan_lines(lang: Language, k: &mut Kernel<'_, '_>, classify: fn(&[u8]) -> LineClass) {
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

        match classify(line) {
            LineClass::Blank => {
                if !line.is_empty() {
                    k.emit_entity(lang, Entity::Space, ls, eol);
                }
            }
            LineClass::Comment => {
                k.mark_comment();
                emit_line_entities(lang, k, line, ls, Entity::Comment);
            }
            LineClass::Code => {
                k.mark_code();
                emit_line_entities(lang, k, line, ls, Entity::Any);
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

/// 行内容を「先頭空白 + 本体」の 2 スパンで放出する
fn emit_line_entities(lang: Language, k: &mut Kernel<'_, '_>, line: &[u8], ls: usize, kind: Entity) {
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
