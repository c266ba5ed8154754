// crates/cli/src/engine.rs
//! 並列の検出+計測エンジン
//!
//! walker スレッドがチャネルへ流すパスを rayon で並列処理します。
//! スキャナの状態はファイルごとに独立で、スレッド間で共有される
//! のは読み取り専用のテーブルとシブリングスナップショットだけです。

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use hashbrown::HashMap;
use rayon::prelude::*;
use serde::Serialize;
use tracing::warn;

use polycount_core::context::{SiblingSet, SourceFile};
use polycount_core::error::PolycountError;
use polycount_core::gestalt::ContentMarkers;
use polycount_core::language::Language;
use polycount_core::license::License;
use polycount_core::measure::{measure, Composition};
use polycount_core::{detect, gestalt, license};

use crate::config::Config;

/// 1 ファイル分の解析結果
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub language: Option<Language>,
    pub composition: Composition,
    pub licenses: Vec<License>,
    /// annotate / raw-entities 用に保持する内容（通常は None）
    #[serde(skip)]
    pub contents: Option<Vec<u8>>,
}

/// Result of running the analysis engine.
#[derive(Debug, Default)]
pub struct RunResult {
    pub reports: Vec<FileReport>,
    pub errors: Vec<(PathBuf, PolycountError)>,
    pub markers: ContentMarkers,
}

impl RunResult {
    /// 検出された言語の集合
    #[must_use]
    pub fn languages(&self) -> BTreeSet<Language> {
        self.reports
            .iter()
            .filter_map(|r| r.language)
            .collect()
    }
}

/// ディレクトリごとのシブリングスナップショット共有キャッシュ
#[derive(Default)]
struct SiblingCache {
    map: Mutex<HashMap<PathBuf, Arc<SiblingSet>>>,
}

impl SiblingCache {
    fn get(&self, dir: &std::path::Path) -> Arc<SiblingSet> {
        let mut map = match self.map.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(set) = map.get(dir) {
            return set.clone();
        }
        let set = match SiblingSet::from_dir(dir) {
            Ok(set) => Arc::new(set),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "sibling snapshot failed");
                SiblingSet::empty()
            }
        };
        map.insert(dir.to_path_buf(), set.clone());
        set
    }
}

/// 設定に従って全ファイルを解析する
pub fn run(config: &Config) -> anyhow::Result<RunResult> {
    let (tx, rx) = crossbeam_channel::bounded(1024);

    let walk_config = Config {
        paths: config.paths.clone(),
        hidden: config.hidden,
        ..Config::default()
    };
    let walker = std::thread::spawn(move || {
        crate::walk::walk(&walk_config, &tx);
    });

    let cache = SiblingCache::default();
    let keep_contents = config.mode.needs_contents();

    let outcomes: Vec<Result<(FileReport, ContentMarkers), (PathBuf, PolycountError)>> = rx
        .into_iter()
        .par_bridge()
        .map(|path| process_file(path, &cache, keep_contents))
        .collect();

    // walker スレッドの終了を待つ (tx は move 済みなので rx 消費後には閉じている)
    let _ = walker.join();

    let mut result = RunResult::default();
    for outcome in outcomes {
        match outcome {
            Ok((report, markers)) => {
                result.markers.merge(markers);
                result.reports.push(report);
            }
            Err((path, e)) => {
                if config.strict {
                    return Err(anyhow::anyhow!("{}: {e}", path.display()));
                }
                warn!(path = %path.display(), error = %e, "file skipped");
                eprintln!("Error processing {}: {e}", path.display());
                result.errors.push((path, e));
            }
        }
    }

    // 出力順を決定的にする
    result.reports.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(result)
}

fn process_file(
    path: PathBuf,
    cache: &SiblingCache,
    keep_contents: bool,
) -> Result<(FileReport, ContentMarkers), (PathBuf, PolycountError)> {
    let siblings = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => cache.get(dir),
        _ => SiblingSet::empty(),
    };
    let file = SourceFile::new(path.clone(), siblings);

    let language = detect::detect(&file).map_err(|e| (path.clone(), e))?;

    let (composition, licenses, markers, contents) = match language {
        Some(lang) => {
            let contents = file.contents().map_err(|e| (path.clone(), e))?;
            let composition = measure(lang, contents);
            let licenses = license::sniff(contents);
            let markers = gestalt::scan_markers(Some(lang), contents);
            let kept = keep_contents.then(|| contents.to_vec());
            (composition, licenses, markers, kept)
        }
        None => (Composition::new(), Vec::new(), ContentMarkers::default(), None),
    };

    Ok((
        FileReport {
            path,
            language,
            composition,
            licenses,
            contents,
        },
        markers,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn run_on(dir: &std::path::Path) -> RunResult {
        let config = Config {
            paths: vec![dir.to_path_buf()],
            ..Config::default()
        };
        run(&config).unwrap()
    }

    #[test]
    fn test_run_mixed_tree() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.c"), "// c\nint x;\n").unwrap();
        fs::write(dir.path().join("b.py"), "# py\nx = 1\n").unwrap();
        fs::write(dir.path().join("blob.png"), [0u8, 1, 2]).unwrap();

        let result = run_on(dir.path());
        assert_eq!(result.reports.len(), 3);
        assert!(result.errors.is_empty());

        let langs = result.languages();
        assert!(langs.contains(&Language::C));
        assert!(langs.contains(&Language::Python));
        // バイナリは言語なし
        assert!(result
            .reports
            .iter()
            .any(|r| r.language.is_none() && r.path.ends_with("blob.png")));
    }

    #[test]
    fn test_sibling_detection_in_run() {
        // 同名 .m がいる .h は objective-c になる
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Foo.m"), "@implementation Foo\n@end\n").unwrap();
        fs::write(dir.path().join("Foo.h"), "int x;\n").unwrap();

        let result = run_on(dir.path());
        let header = result
            .reports
            .iter()
            .find(|r| r.path.ends_with("Foo.h"))
            .unwrap();
        assert_eq!(header.language, Some(Language::ObjectiveC));
    }

    #[test]
    fn test_reports_sorted_by_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("z.c"), "int z;\n").unwrap();
        fs::write(dir.path().join("a.c"), "int a;\n").unwrap();

        let result = run_on(dir.path());
        let paths: Vec<_> = result.reports.iter().map(|r| r.path.clone()).collect();
        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);
    }
}
