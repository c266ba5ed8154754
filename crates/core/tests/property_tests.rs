use polycount_core::context::{SiblingSet, SourceFile};
use polycount_core::detect::detect_with_probe;
use polycount_core::detect::probe::NullProbe;
use polycount_core::language::Language;
use polycount_core::measure::measure;
use polycount_core::scan::{scan, LineKind, ScanMode, VecSink};
use proptest::prelude::*;

const SAMPLE_LANGS: &[Language] = &[
    Language::C,
    Language::Python,
    Language::Ruby,
    Language::Html,
    Language::FortranFree,
    Language::Smalltalk,
    Language::ClearsilverTemplate,
];

proptest! {
    #[test]
    fn prop_line_events_tile_the_buffer(
        content in "[ -~\\n\\t]{0,500}"
    ) {
        // 行イベントの連結はバッファと正確に一致する（隙間も重なりも無い）
        for lang in SAMPLE_LANGS {
            let mut sink = VecSink::default();
            scan(*lang, content.as_bytes(), ScanMode::Count, &mut sink);
            let mut pos = 0;
            for ev in &sink.lines {
                prop_assert_eq!(ev.start, pos, "gap in {} events", lang);
                prop_assert!(ev.end > ev.start);
                pos = ev.end;
            }
            prop_assert_eq!(pos, content.len(), "coverage for {}", lang);
        }
    }

    #[test]
    fn prop_blank_lines_contain_only_whitespace(
        content in "[ -~\\n\\t]{0,500}"
    ) {
        for lang in SAMPLE_LANGS {
            let mut sink = VecSink::default();
            scan(*lang, content.as_bytes(), ScanMode::Count, &mut sink);
            for ev in &sink.lines {
                if ev.kind == LineKind::LineBlank {
                    let range = &content.as_bytes()[ev.start..ev.end];
                    prop_assert!(
                        range.iter().all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0c)),
                        "blank line with non-whitespace in {}",
                        lang
                    );
                }
            }
        }
    }

    #[test]
    fn prop_final_event_reaches_eof(
        content in "[ -~\\n]{1,300}"
    ) {
        for lang in SAMPLE_LANGS {
            let mut sink = VecSink::default();
            scan(*lang, content.as_bytes(), ScanMode::Count, &mut sink);
            let last = sink.lines.last();
            prop_assert!(last.is_some());
            if let Some(ev) = last {
                prop_assert_eq!(ev.end, content.len());
            }
        }
    }

    #[test]
    fn prop_entity_spans_tile_the_buffer(
        content in "[ -~\\n\\t]{0,400}"
    ) {
        // エンティティモード: スパンの和がバッファ全体を覆う
        let mut sink = VecSink::default();
        scan(Language::C, content.as_bytes(), ScanMode::Entity, &mut sink);
        let mut pos = 0;
        for span in &sink.entities {
            prop_assert_eq!(span.start, pos);
            prop_assert!(span.end > span.start);
            pos = span.end;
        }
        prop_assert_eq!(pos, content.len());
    }

    #[test]
    fn prop_detection_is_deterministic(
        name in "[a-z]{1,8}\\.(m|h|cs|f|bas|st|b)",
        content in "[ -~\\n]{0,300}"
    ) {
        let make = || {
            SourceFile::with_contents(
                name.clone(),
                content.clone().into_bytes(),
                SiblingSet::empty(),
            )
        };
        let first = detect_with_probe(&make(), &NullProbe).ok().flatten();
        for _ in 0..3 {
            let again = detect_with_probe(&make(), &NullProbe).ok().flatten();
            prop_assert_eq!(again, first);
        }
    }

    #[test]
    fn prop_embedding_round_trip(
        html_lines in proptest::collection::vec("[a-z<>/ ]{0,20}", 0..5),
        php_lines in proptest::collection::vec("[a-z0-9 =;]{0,20}", 0..5)
    ) {
        // 整形式の埋め込み: ホストとゲストの行数の和はファイル全体の行数
        let mut src = String::new();
        for l in &html_lines {
            src.push_str(l);
            src.push('\n');
        }
        src.push_str("<?php\n");
        for l in &php_lines {
            src.push_str(l);
            src.push('\n');
        }
        src.push_str("?>\n");

        let comp = measure(Language::Html, src.as_bytes());
        let total: usize = comp.iter().map(|(_, c)| c.total()).sum();
        let newlines = src.bytes().filter(|&b| b == b'\n').count();
        prop_assert_eq!(total, newlines);
    }

    #[test]
    fn prop_scan_never_panics_on_bytes(
        content in proptest::collection::vec(any::<u8>(), 0..400)
    ) {
        for lang in SAMPLE_LANGS {
            let mut sink = VecSink::default();
            scan(*lang, &content, ScanMode::Count, &mut sink);
        }
    }
}
