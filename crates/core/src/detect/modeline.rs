// crates/core/src/detect/modeline.rs
//! Emacs モード行の抽出
//!
//! 先頭行（シバンがある場合は 2 行目）から `-*- mode: NAME -*-` または
//! `-*- NAME -*-` を読み取り、既知の言語識別子に解決します。

use std::sync::OnceLock;

use regex::Regex;

use crate::language::Language;

fn mode_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-\*-.*?[Mm]ode:\s*([^\s;]+).*?-\*-").unwrap())
}

fn bare_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-\*-\s*([^\s;:]+)\s*-\*-").unwrap())
}

/// バッファ先頭からモード行の言語を検出する
#[must_use]
pub fn from_buffer(buf: &[u8]) -> Option<Language> {
    let head = &buf[..buf.len().min(512)];
    let text = String::from_utf8_lossy(head);
    let mut lines = text.lines();
    let first = lines.next()?;
    let candidate = if first.starts_with("#!") {
        lines.next()?
    } else {
        first
    };

    let name = mode_re()
        .captures(candidate)
        .or_else(|| bare_re().captures(candidate))
        .and_then(|caps| caps.get(1))?
        .as_str();
    Language::from_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_modeline() {
        assert_eq!(from_buffer(b"/* -*- C++ -*- */\n"), Some(Language::Cpp));
        assert_eq!(from_buffer(b"; -*- lisp -*-\n"), Some(Language::Lisp));
    }

    #[test]
    fn test_mode_keyword() {
        assert_eq!(
            from_buffer(b"# -*- mode: python; coding: utf-8 -*-\n"),
            Some(Language::Python)
        );
    }

    #[test]
    fn test_caml_remap() {
        assert_eq!(from_buffer(b"(* -*- caml -*- *)\n"), Some(Language::Ocaml));
    }

    #[test]
    fn test_shebang_then_modeline() {
        assert_eq!(
            from_buffer(b"#!/usr/bin/env perl\n# -*- mode: perl -*-\n"),
            Some(Language::Perl)
        );
    }

    #[test]
    fn test_no_modeline() {
        assert_eq!(from_buffer(b"int main() {}\n"), None);
        assert_eq!(from_buffer(b""), None);
    }

    #[test]
    fn test_modeline_only_on_first_line() {
        assert_eq!(from_buffer(b"code\n/* -*- C++ -*- */\n"), None);
    }
}
