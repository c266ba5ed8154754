// crates/core/src/scan/markup.rs
//! マークアップ言語スキャナ
//!
//! HTML/XML の `<!-- -->` コメントに加えて、ホスト→ゲストの埋め込み
//! 遷移を実装します。エントリ規則は宣言順に試行されます。空白エントリ
//! （デリミタの後に行末まで空白しか無い）ではホスト行を先に確定し、
//! アウトリではデリミタ先頭へ巻き戻してホストに制御を返します。

use crate::language::Language;
use crate::scan::embed::Supervisor;
use crate::scan::event::Entity;
use crate::scan::grammar::{
    self, consume_block_comment, scan_tokens_until, starts_with_ci, Stop,
};
use crate::scan::kernel::{is_inline_space, Kernel};
use crate::scan::script::{self, scan_script_until};

/// 埋め込みゲストの識別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guest {
    Css,
    Javascript,
    Php,
    Ruby,
    Java,
    Csharp,
    Visualbasic,
    Clearsilver,
}

/// ホスト側のエントリ規則
#[derive(Debug, Clone, Copy)]
pub struct EmbedRule {
    pub entry: &'static str,
    pub case_insensitive: bool,
    /// エントリ後にタグ終端 `>` までをホストコードとして読み飛ばす
    pub tag_entry: bool,
    pub guest: Guest,
    pub outry: Stop,
}

/// マークアップスキャナのプロファイル
#[derive(Debug)]
pub struct MarkupProfile {
    pub lang: Language,
    pub embeds: &'static [EmbedRule],
}

/// バッファ全体を走査する
pub fn scan_markup(profile: &MarkupProfile, k: &mut Kernel<'_, '_>) {
    let buf = k.buf();
    let pe = buf.len();
    let lang = profile.lang;
    let mut sup = Supervisor::new();
    let mut p = 0;

    while p < pe {
        let b = buf[p];

        if b == b'\n' {
            k.emit_entity(lang, Entity::Newline, p, p + 1);
            k.emit_newline(lang, p + 1);
            p += 1;
            continue;
        }

        if is_inline_space(b) {
            let ts = p;
            while p < pe && is_inline_space(buf[p]) {
                p += 1;
            }
            k.emit_entity(lang, Entity::Space, ts, p);
            continue;
        }

        if buf[p..].starts_with(b"<!--") {
            p = consume_block_comment(lang, k, p, "<!--", "-->", false);
            continue;
        }

        if let Some(rule) = profile.embeds.iter().find(|r| entry_matches(buf, p, r)) {
            let ts = p;
            k.mark_code();
            p += rule.entry.len();
            if rule.tag_entry {
                p = consume_tag_rest(lang, k, p);
            }
            k.emit_entity(lang, Entity::Any, ts, p);

            // 空白エントリならホスト行を先に確定する（フラグが消える前に）
            if let Some(next) = k.check_blank_entry(lang, p) {
                p = next;
            }

            if !sup.try_enter(k, lang) {
                // ネスト超過: 残りはホストのトークンとして処理し続ける
                continue;
            }

            p = run_guest(rule, k, p);
            sup.leave(k);
            continue;
        }

        if b == b'<' {
            k.mark_code();
            k.emit_entity(lang, Entity::Any, p, p + 1);
            p += 1;
            continue;
        }

        // タグ・テキストのひとかたまり
        let ts = p;
        while p < pe && buf[p] != b'\n' && buf[p] != b'<' && !is_inline_space(buf[p]) {
            p += 1;
        }
        k.mark_code();
        k.emit_entity(lang, Entity::Any, ts, p);
    }

    k.emit_final(lang, pe);
}

fn entry_matches(buf: &[u8], p: usize, rule: &EmbedRule) -> bool {
    if rule.case_insensitive {
        starts_with_ci(buf, p, rule.entry.as_bytes())
    } else {
        buf[p..].starts_with(rule.entry.as_bytes())
    }
}

/// `<style ...>` / `<script ...>` のタグ残部を `>` まで消費する
fn consume_tag_rest(lang: Language, k: &mut Kernel<'_, '_>, mut p: usize) -> usize {
    let buf = k.buf();
    let pe = buf.len();
    while p < pe {
        match buf[p] {
            b'\n' => {
                k.emit_entity(lang, Entity::InternalNewline, p, p + 1);
                k.emit_internal_newline(lang, p + 1);
                p += 1;
            }
            b'>' => {
                k.mark_code();
                return p + 1;
            }
            b => {
                if !is_inline_space(b) {
                    k.mark_code();
                }
                p += 1;
            }
        }
    }
    pe
}

/// ゲスト機械をアウトリまで走らせ、アウトリ先頭位置を返す
fn run_guest(rule: &EmbedRule, k: &mut Kernel<'_, '_>, from: usize) -> usize {
    let stop = Some(rule.outry);
    match rule.guest {
        Guest::Css => scan_tokens_until(&grammar::CSS, k, from, stop),
        Guest::Javascript => scan_tokens_until(&grammar::JAVASCRIPT, k, from, stop),
        Guest::Php => scan_tokens_until(&grammar::PHP, k, from, stop),
        Guest::Java => scan_tokens_until(&grammar::JAVA, k, from, stop),
        Guest::Csharp => scan_tokens_until(&grammar::CSHARP, k, from, stop),
        Guest::Clearsilver => scan_tokens_until(&grammar::CLEARSILVER, k, from, stop),
        Guest::Ruby => scan_script_until(&script::RUBY, k, from, stop),
        Guest::Visualbasic => scan_script_until(&script::VB_GUEST, k, from, stop),
    }
}

// ---------------------------------------------------------------------------
// プロファイル
// ---------------------------------------------------------------------------

const STYLE_RULE: EmbedRule = EmbedRule {
    entry: "<style",
    case_insensitive: true,
    tag_entry: true,
    guest: Guest::Css,
    outry: Stop::ci(b"</style"),
};

const SCRIPT_RULE: EmbedRule = EmbedRule {
    entry: "<script",
    case_insensitive: true,
    tag_entry: true,
    guest: Guest::Javascript,
    outry: Stop::ci(b"</script"),
};

const PHP_LONG_RULE: EmbedRule = EmbedRule {
    entry: "<?php",
    case_insensitive: true,
    tag_entry: false,
    guest: Guest::Php,
    outry: Stop::new(b"?>"),
};

const PHP_ECHO_RULE: EmbedRule = EmbedRule {
    entry: "<?=",
    case_insensitive: false,
    tag_entry: false,
    guest: Guest::Php,
    outry: Stop::new(b"?>"),
};

pub const HTML: MarkupProfile = MarkupProfile {
    lang: Language::Html,
    embeds: &[STYLE_RULE, SCRIPT_RULE, PHP_LONG_RULE, PHP_ECHO_RULE],
};

pub const XML: MarkupProfile = MarkupProfile {
    lang: Language::Xml,
    embeds: &[],
};

pub const XSLT: MarkupProfile = MarkupProfile {
    lang: Language::Xslt,
    embeds: &[],
};

/// PHP ファイル自体もホスト HTML として走査する
/// (`<?php` の外はマークアップ、内側だけが PHP)
pub const PHP_FILE: MarkupProfile = MarkupProfile {
    lang: Language::Html,
    embeds: &[STYLE_RULE, SCRIPT_RULE, PHP_LONG_RULE, PHP_ECHO_RULE],
};

pub const CLEARSILVER_TEMPLATE: MarkupProfile = MarkupProfile {
    lang: Language::Html,
    embeds: &[
        EmbedRule {
            entry: "<?cs",
            case_insensitive: false,
            tag_entry: false,
            guest: Guest::Clearsilver,
            outry: Stop::new(b"?>"),
        },
        STYLE_RULE,
        SCRIPT_RULE,
    ],
};

pub const RHTML: MarkupProfile = MarkupProfile {
    lang: Language::Html,
    embeds: &[
        EmbedRule {
            entry: "<%",
            case_insensitive: false,
            tag_entry: false,
            guest: Guest::Ruby,
            outry: Stop::new(b"%>"),
        },
        STYLE_RULE,
        SCRIPT_RULE,
    ],
};

pub const JSP: MarkupProfile = MarkupProfile {
    lang: Language::Html,
    embeds: &[
        EmbedRule {
            entry: "<%",
            case_insensitive: false,
            tag_entry: false,
            guest: Guest::Java,
            outry: Stop::new(b"%>"),
        },
        STYLE_RULE,
        SCRIPT_RULE,
    ],
};

pub const ASPX_CS: MarkupProfile = MarkupProfile {
    lang: Language::Html,
    embeds: &[
        EmbedRule {
            entry: "<%",
            case_insensitive: false,
            tag_entry: false,
            guest: Guest::Csharp,
            outry: Stop::new(b"%>"),
        },
        STYLE_RULE,
        SCRIPT_RULE,
    ],
};

pub const ASPX_VB: MarkupProfile = MarkupProfile {
    lang: Language::Html,
    embeds: &[
        EmbedRule {
            entry: "<%",
            case_insensitive: false,
            tag_entry: false,
            guest: Guest::Visualbasic,
            outry: Stop::new(b"%>"),
        },
        STYLE_RULE,
        SCRIPT_RULE,
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::event::{LineKind, VecSink};
    use crate::scan::kernel::ScanMode;

    fn scan_lines(profile: &MarkupProfile, src: &[u8]) -> Vec<(Language, LineKind, usize, usize)> {
        let mut sink = VecSink::default();
        let mut k = Kernel::new(src, ScanMode::Count, &mut sink);
        scan_markup(profile, &mut k);
        sink.lines
            .iter()
            .map(|e| (e.lang, e.kind, e.start, e.end))
            .collect()
    }

    #[test]
    fn test_plain_html() {
        let lines = scan_lines(&HTML, b"<p>hello</p>\n\n<!-- note -->\n");
        assert_eq!(
            lines,
            vec![
                (Language::Html, LineKind::LineCode, 0, 13),
                (Language::Html, LineKind::LineBlank, 13, 14),
                (Language::Html, LineKind::LineComment, 14, 28),
            ]
        );
    }

    #[test]
    fn test_xml_comment_entity() {
        let src = b"<!--comment-->";
        let mut sink = VecSink::default();
        let mut k = Kernel::new(src, ScanMode::Entity, &mut sink);
        scan_markup(&XML, &mut k);
        assert_eq!(sink.entities.len(), 1);
        let e = &sink.entities[0];
        assert_eq!(
            (e.lang, e.entity, e.start, e.end),
            (Language::Xml, Entity::Comment, 0, src.len())
        );
    }

    #[test]
    fn test_clearsilver_blank_entry_outry() {
        // ホスト html: `<?cs\n` と `?>` がコード、ゲスト clearsilver:
        // `#comment\n` がコメント
        let src = b"<?cs\n#comment\n?>";
        let lines = scan_lines(&CLEARSILVER_TEMPLATE, src);
        assert_eq!(
            lines,
            vec![
                (Language::Html, LineKind::LineCode, 0, 5),
                (Language::Clearsilver, LineKind::LineComment, 5, 14),
                (Language::Html, LineKind::LineCode, 14, 16),
            ]
        );
    }

    #[test]
    fn test_embedding_line_coverage() {
        let src = b"<html>\n<style>\nbody { color: red; }\n/* c */\n</style>\n</html>\n";
        let lines = scan_lines(&HTML, src);
        let mut pos = 0;
        for (_, _, start, end) in &lines {
            assert_eq!(*start, pos);
            pos = *end;
        }
        assert_eq!(pos, src.len());
        // ゲスト CSS の行が混ざる
        assert!(lines.iter().any(|(l, ..)| *l == Language::Css));
        assert!(lines
            .iter()
            .any(|(l, k, ..)| *l == Language::Css && *k == LineKind::LineComment));
    }

    #[test]
    fn test_php_guest_lines() {
        let src = b"<body>\n<?php\n// note\n$x = 1;\n?>\n</body>\n";
        let lines = scan_lines(&HTML, src);
        assert_eq!(
            lines,
            vec![
                (Language::Html, LineKind::LineCode, 0, 7),
                (Language::Html, LineKind::LineCode, 7, 13),
                (Language::Php, LineKind::LineComment, 13, 21),
                (Language::Php, LineKind::LineCode, 21, 29),
                (Language::Html, LineKind::LineCode, 29, 32),
                (Language::Html, LineKind::LineCode, 32, 40),
            ]
        );
    }

    #[test]
    fn test_inline_embed_attributed_to_host() {
        let src = b"<p><?php f(); ?></p>\n";
        let lines = scan_lines(&HTML, src);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Language::Html);
        assert_eq!(lines[0].1, LineKind::LineCode);
    }

    #[test]
    fn test_rhtml_ruby_guest() {
        let src = b"<ul>\n<% items.each do |i| %>\n<% end %>\n</ul>\n";
        let lines = scan_lines(&RHTML, src);
        let mut pos = 0;
        for (_, _, start, end) in &lines {
            assert_eq!(*start, pos);
            pos = *end;
        }
        assert_eq!(pos, src.len());
    }

    #[test]
    fn test_unterminated_embed_drains() {
        let src = b"<?php\n$x = 1;\n";
        let lines = scan_lines(&HTML, src);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].0, Language::Php);
        assert_eq!(lines[1].1, LineKind::LineCode);
    }

    #[test]
    fn test_script_entry_case_insensitive() {
        let src = b"<SCRIPT>\nvar x = 1; // c\n</SCRIPT>\n";
        let lines = scan_lines(&HTML, src);
        assert_eq!(lines[1].0, Language::Javascript);
        assert_eq!(lines[1].1, LineKind::LineCode);
    }
}
