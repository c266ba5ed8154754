// crates/cli/src/presentation.rs
use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

use polycount_core::language::Language;
use polycount_core::measure::LocCounts;
use polycount_core::scan::{scan, ScanMode, VecSink};
use polycount_core::{gestalt, Composition};

use crate::config::{Config, ReportMode};
use crate::engine::RunResult;

/// 集計結果を設定のレポートモードで出力する
pub fn print_results(
    out: &mut impl Write,
    result: &RunResult,
    config: &Config,
) -> anyhow::Result<()> {
    match config.mode {
        ReportMode::Summary => print_summary(out, result, config),
        ReportMode::Detect => print_detect(out, result, config),
        ReportMode::Annotate => print_annotate(out, result),
        ReportMode::Individual => print_individual(out, result, config),
        ReportMode::Licenses => print_licenses(out, result),
        ReportMode::Gestalt => print_gestalt(out, result),
        ReportMode::RawEntities => print_raw_entities(out, result),
    }
}

#[derive(Debug, Serialize)]
struct SummaryRow {
    language: Language,
    files: usize,
    code: usize,
    comment: usize,
    blank: usize,
    total: usize,
}

fn summarize(result: &RunResult) -> Vec<SummaryRow> {
    let mut totals: BTreeMap<Language, (usize, LocCounts)> = BTreeMap::new();
    for report in &result.reports {
        for (lang, counts) in &report.composition {
            let entry = totals.entry(*lang).or_default();
            entry.0 += 1;
            entry.1.merge(counts);
        }
    }
    totals
        .into_iter()
        .map(|(language, (files, c))| SummaryRow {
            language,
            files,
            code: c.code,
            comment: c.comment,
            blank: c.blank,
            total: c.total(),
        })
        .collect()
}

fn print_summary(
    out: &mut impl Write,
    result: &RunResult,
    config: &Config,
) -> anyhow::Result<()> {
    let mut rows = summarize(result);
    // コード行数の多い順
    rows.sort_by(|a, b| b.code.cmp(&a.code).then(a.language.cmp(&b.language)));

    if config.json {
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "polycount v{}", crate::VERSION)?;
    writeln!(out)?;
    writeln!(
        out,
        "{:<22} {:>8} {:>10} {:>10} {:>10} {:>10}",
        "LANGUAGE", "FILES", "CODE", "COMMENT", "BLANK", "TOTAL"
    )?;
    writeln!(out, "{}", "-".repeat(76))?;
    let (mut files, mut code, mut comment, mut blank) = (0, 0, 0, 0);
    for row in &rows {
        writeln!(
            out,
            "{:<22} {:>8} {:>10} {:>10} {:>10} {:>10}",
            row.language.display_name(),
            row.files,
            row.code,
            row.comment,
            row.blank,
            row.total
        )?;
        files += row.files;
        code += row.code;
        comment += row.comment;
        blank += row.blank;
    }
    writeln!(out, "{}", "-".repeat(76))?;
    writeln!(
        out,
        "{:<22} {:>8} {:>10} {:>10} {:>10} {:>10}",
        "TOTAL",
        files,
        code,
        comment,
        blank,
        code + comment + blank
    )?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct DetectRow<'a> {
    language: Language,
    path: &'a std::path::Path,
}

fn print_detect(
    out: &mut impl Write,
    result: &RunResult,
    config: &Config,
) -> anyhow::Result<()> {
    let rows: Vec<DetectRow<'_>> = result
        .reports
        .iter()
        .filter_map(|r| {
            r.language.map(|language| DetectRow {
                language,
                path: r.path.as_path(),
            })
        })
        .collect();

    if config.json {
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)?;
        return Ok(());
    }
    for row in rows {
        writeln!(out, "{}\t{}", row.language, row.path.display())?;
    }
    Ok(())
}

fn print_annotate(out: &mut impl Write, result: &RunResult) -> anyhow::Result<()> {
    for report in &result.reports {
        let (Some(lang), Some(contents)) = (report.language, report.contents.as_deref()) else {
            continue;
        };
        let mut sink = VecSink::default();
        scan(lang, contents, ScanMode::Count, &mut sink);
        for ev in &sink.lines {
            let line = &contents[ev.start..ev.end];
            let text = String::from_utf8_lossy(line);
            write!(
                out,
                "{}\t{}\t{}",
                ev.lang,
                ev.kind.as_str(),
                text.trim_end_matches(['\n', '\r'])
            )?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct IndividualRow<'a> {
    path: &'a std::path::Path,
    language: Language,
    composition: &'a Composition,
}

fn print_individual(
    out: &mut impl Write,
    result: &RunResult,
    config: &Config,
) -> anyhow::Result<()> {
    if config.json {
        let rows: Vec<IndividualRow<'_>> = result
            .reports
            .iter()
            .filter_map(|r| {
                r.language.map(|language| IndividualRow {
                    path: r.path.as_path(),
                    language,
                    composition: &r.composition,
                })
            })
            .collect();
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<14} {:>10} {:>10} {:>10}   FILE",
        "LANGUAGE", "CODE", "COMMENT", "BLANK"
    )?;
    for report in &result.reports {
        if report.language.is_none() {
            continue;
        }
        for (lang, counts) in &report.composition {
            writeln!(
                out,
                "{:<14} {:>10} {:>10} {:>10}   {}",
                lang.as_str(),
                counts.code,
                counts.comment,
                counts.blank,
                report.path.display()
            )?;
        }
    }
    Ok(())
}

fn print_licenses(out: &mut impl Write, result: &RunResult) -> anyhow::Result<()> {
    for report in &result.reports {
        for lic in &report.licenses {
            writeln!(out, "{}\t{}", lic.as_str(), report.path.display())?;
        }
    }
    Ok(())
}

fn print_gestalt(out: &mut impl Write, result: &RunResult) -> anyhow::Result<()> {
    let paths: Vec<_> = result.reports.iter().map(|r| r.path.clone()).collect();
    let languages = result.languages();
    let gestalts = gestalt::infer(&paths, &languages, &result.markers);
    for g in gestalts {
        writeln!(out, "{:?}\t{}", g.kind, g.name)?;
    }
    Ok(())
}

fn print_raw_entities(out: &mut impl Write, result: &RunResult) -> anyhow::Result<()> {
    for report in &result.reports {
        let (Some(lang), Some(contents)) = (report.language, report.contents.as_deref()) else {
            continue;
        };
        let mut sink = VecSink::default();
        scan(lang, contents, ScanMode::Entity, &mut sink);
        for span in &sink.entities {
            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}",
                report.path.display(),
                span.lang,
                span.entity.as_str(),
                span.start,
                span.end
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FileReport;
    use polycount_core::measure::measure;
    use std::path::PathBuf;

    fn sample_result() -> RunResult {
        let src = b"// c\nint x;\n\n";
        RunResult {
            reports: vec![FileReport {
                path: PathBuf::from("a.c"),
                language: Some(Language::C),
                composition: measure(Language::C, src),
                licenses: vec![],
                contents: Some(src.to_vec()),
            }],
            errors: vec![],
            markers: Default::default(),
        }
    }

    #[test]
    fn test_summary_table() {
        let mut buf = Vec::new();
        let config = Config::default();
        print_results(&mut buf, &sample_result(), &config).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("LANGUAGE"));
        assert!(text.contains("C"));
        assert!(text.contains("TOTAL"));
    }

    #[test]
    fn test_summary_json() {
        let mut buf = Vec::new();
        let config = Config {
            json: true,
            ..Config::default()
        };
        print_results(&mut buf, &sample_result(), &config).unwrap();
        let rows: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(rows[0]["language"], "c");
        assert_eq!(rows[0]["code"], 1);
        assert_eq!(rows[0]["comment"], 1);
        assert_eq!(rows[0]["blank"], 1);
    }

    #[test]
    fn test_detect_listing() {
        let mut buf = Vec::new();
        let config = Config {
            mode: ReportMode::Detect,
            ..Config::default()
        };
        print_results(&mut buf, &sample_result(), &config).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.trim(), "c\ta.c");
    }

    #[test]
    fn test_annotate_lines() {
        let mut buf = Vec::new();
        let config = Config {
            mode: ReportMode::Annotate,
            ..Config::default()
        };
        print_results(&mut buf, &sample_result(), &config).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("c\tline-comment\t"));
        assert!(lines[1].starts_with("c\tline-code\t"));
        assert!(lines[2].starts_with("c\tline-blank\t"));
    }

    #[test]
    fn test_raw_entities_listing() {
        let mut buf = Vec::new();
        let config = Config {
            mode: ReportMode::RawEntities,
            ..Config::default()
        };
        print_results(&mut buf, &sample_result(), &config).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\tcomment\t"));
        assert!(text.contains("\tnewline\t"));
    }
}
