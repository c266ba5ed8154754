// crates/core/src/scan/mod.rs
//! 行会計スキャナ群
//!
//! `kernel` が全言語共通のランタイム、`grammar`/`script` がテーブル駆動の
//! 汎用機械、`markup`/`fortran`/`basic` が手書きの特化機械です。
//! `scan` がモード（カウント/エンティティ）付きの唯一の入口になります。

pub mod basic;
pub mod embed;
pub mod event;
pub mod fortran;
pub mod grammar;
pub mod kernel;
pub mod markup;
pub mod script;

pub use event::{Entity, EntitySpan, EventSink, LineEvent, LineKind, VecSink};
pub use kernel::{Kernel, ScanMode};

use crate::language::Language;
use basic::BasicDialect;

/// バッファを言語のスキャナで走査してイベントをシンクへ流す
///
/// スキャナは必ずバッファ末尾まで走り切り、通過したすべての改行に対して
/// 行イベントを放出します。途中で失敗することはありません。
pub fn scan(lang: Language, buf: &[u8], mode: ScanMode, sink: &mut dyn EventSink) {
    let mut k = Kernel::new(buf, mode, sink);
    match lang {
        Language::C => grammar::scan_tokens(&grammar::C, &mut k),
        Language::Cpp => grammar::scan_tokens(&grammar::CPP, &mut k),
        Language::ObjectiveC => grammar::scan_tokens(&grammar::OBJECTIVE_C, &mut k),
        Language::Java => grammar::scan_tokens(&grammar::JAVA, &mut k),
        Language::Csharp => grammar::scan_tokens(&grammar::CSHARP, &mut k),
        Language::Javascript => grammar::scan_tokens(&grammar::JAVASCRIPT, &mut k),
        Language::Go => grammar::scan_tokens(&grammar::GO, &mut k),
        Language::D => grammar::scan_tokens(&grammar::D, &mut k),
        Language::Rust => grammar::scan_tokens(&grammar::RUST, &mut k),
        Language::Pike => grammar::scan_tokens(&grammar::PIKE, &mut k),
        Language::Limbo => grammar::scan_tokens(&grammar::LIMBO, &mut k),
        Language::Vala => grammar::scan_tokens(&grammar::VALA, &mut k),
        Language::Scala => grammar::scan_tokens(&grammar::SCALA, &mut k),
        Language::Actionscript => grammar::scan_tokens(&grammar::ACTIONSCRIPT, &mut k),
        Language::Groovy => grammar::scan_tokens(&grammar::GROOVY, &mut k),
        Language::Haxe => grammar::scan_tokens(&grammar::HAXE, &mut k),
        Language::Css => grammar::scan_tokens(&grammar::CSS, &mut k),
        Language::Pascal => grammar::scan_tokens(&grammar::PASCAL, &mut k),
        Language::Sql => grammar::scan_tokens(&grammar::SQL, &mut k),
        Language::Haskell => grammar::scan_tokens(&grammar::HASKELL, &mut k),
        Language::Ocaml => grammar::scan_tokens(&grammar::OCAML, &mut k),
        Language::Lua => grammar::scan_tokens(&grammar::LUA, &mut k),
        Language::Erlang => grammar::scan_tokens(&grammar::ERLANG, &mut k),
        Language::Lisp => grammar::scan_tokens(&grammar::LISP, &mut k),
        Language::Scheme => grammar::scan_tokens(&grammar::SCHEME, &mut k),
        Language::Vim => grammar::scan_tokens(&grammar::VIM, &mut k),
        Language::Tex => grammar::scan_tokens(&grammar::TEX, &mut k),
        Language::Smalltalk => grammar::scan_tokens(&grammar::SMALLTALK, &mut k),
        Language::Ada => grammar::scan_tokens(&grammar::ADA, &mut k),
        Language::Vhdl => grammar::scan_tokens(&grammar::VHDL, &mut k),
        Language::Eiffel => grammar::scan_tokens(&grammar::EIFFEL, &mut k),
        Language::Rexx => grammar::scan_tokens(&grammar::REXX, &mut k),
        Language::Assembler => grammar::scan_tokens(&grammar::ASSEMBLER, &mut k),
        Language::Clearsilver => grammar::scan_tokens(&grammar::CLEARSILVER, &mut k),

        Language::Shell => script::scan_script(&script::SHELL, &mut k),
        Language::Python => script::scan_script(&script::PYTHON, &mut k),
        Language::Ruby => script::scan_script(&script::RUBY, &mut k),
        Language::Perl => script::scan_script(&script::PERL, &mut k),
        Language::Make => script::scan_script(&script::MAKE, &mut k),
        Language::Automake => script::scan_script(&script::AUTOMAKE, &mut k),
        Language::Autoconf => script::scan_script(&script::AUTOCONF, &mut k),
        Language::Cmake => script::scan_script(&script::CMAKE, &mut k),
        Language::Tcl => script::scan_script(&script::TCL, &mut k),
        Language::Awk => script::scan_script(&script::AWK, &mut k),
        Language::Boo => script::scan_script(&script::BOO, &mut k),
        Language::Octave => script::scan_script(&script::OCTAVE, &mut k),
        Language::Matlab => script::scan_script(&script::MATLAB, &mut k),

        Language::Html => markup::scan_markup(&markup::HTML, &mut k),
        Language::Php => markup::scan_markup(&markup::PHP_FILE, &mut k),
        Language::Xml => markup::scan_markup(&markup::XML, &mut k),
        Language::Xslt => markup::scan_markup(&markup::XSLT, &mut k),
        Language::ClearsilverTemplate => {
            markup::scan_markup(&markup::CLEARSILVER_TEMPLATE, &mut k);
        }
        Language::Rhtml => markup::scan_markup(&markup::RHTML, &mut k),
        Language::Jsp => markup::scan_markup(&markup::JSP, &mut k),
        Language::CsAspx => markup::scan_markup(&markup::ASPX_CS, &mut k),
        Language::VbAspx => markup::scan_markup(&markup::ASPX_VB, &mut k),

        Language::FortranFixed => fortran::scan_fortran_fixed(&mut k),
        Language::FortranFree => fortran::scan_fortran_free(&mut k),

        Language::ClassicBasic => basic::scan_basic(BasicDialect::Classic, &mut k),
        Language::StructuredBasic => basic::scan_basic(BasicDialect::Structured, &mut k),
        Language::Visualbasic => basic::scan_basic(BasicDialect::Visual, &mut k),
        Language::Bat => basic::scan_basic(BasicDialect::Bat, &mut k),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_scans_cleanly() {
        // どの言語でも任意のバイト列で完走し、行範囲が正確に連結する
        let src = b"first line\n  \n/* ' \" <%\nlast";
        for lang in crate::language::ALL_LANGUAGES {
            let mut sink = VecSink::default();
            scan(*lang, src, ScanMode::Count, &mut sink);
            let mut pos = 0;
            for ev in &sink.lines {
                assert_eq!(ev.start, pos, "gap scanning {lang}");
                pos = ev.end;
            }
            assert_eq!(pos, src.len(), "coverage scanning {lang}");
        }
    }

    #[test]
    fn test_empty_buffer_emits_nothing() {
        for lang in crate::language::ALL_LANGUAGES {
            let mut sink = VecSink::default();
            scan(*lang, b"", ScanMode::Count, &mut sink);
            assert!(sink.lines.is_empty(), "{lang} emitted on empty buffer");
        }
    }
}
