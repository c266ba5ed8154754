// crates/core/src/gestalt.rs
//! ゲシュタルト（プラットフォーム/ツールの推定）
//!
//! 検出済みファイル集合から、プロジェクトが使っているツールチェインや
//! プラットフォームの事実を推定します。規則はファイル名と、C 系
//! ソースのインクルードマーカーに基づきます。

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;

use crate::language::Language;

/// 推定されたプロジェクトの事実
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Gestalt {
    pub kind: GestaltKind,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GestaltKind {
    Platform,
    Tool,
    Language,
}

/// C 系ソースの内容から拾うプラットフォームマーカー
#[derive(Debug, Default, Clone, Copy)]
pub struct ContentMarkers {
    pub windows_h: bool,
    pub unistd_h: bool,
}

impl ContentMarkers {
    pub fn merge(&mut self, other: Self) {
        self.windows_h |= other.windows_h;
        self.unistd_h |= other.unistd_h;
    }
}

/// 1 ファイル分のマーカー走査（C 系のみ内容を見る）
#[must_use]
pub fn scan_markers(lang: Option<Language>, buf: &[u8]) -> ContentMarkers {
    let mut markers = ContentMarkers::default();
    let is_c_family = matches!(
        lang,
        Some(Language::C | Language::Cpp | Language::ObjectiveC)
    );
    if !is_c_family {
        return markers;
    }
    let text = String::from_utf8_lossy(&buf[..buf.len().min(8192)]);
    for line in text.lines() {
        let t = line.trim_start();
        if !t.starts_with('#') {
            continue;
        }
        if t.contains("windows.h") {
            markers.windows_h = true;
        }
        if t.contains("unistd.h") {
            markers.unistd_h = true;
        }
    }
    markers
}

/// ファイル集合からゲシュタルトを推定する
#[must_use]
pub fn infer(
    paths: &[impl AsRef<Path>],
    languages: &BTreeSet<Language>,
    markers: &ContentMarkers,
) -> Vec<Gestalt> {
    let names: BTreeSet<&str> = paths
        .iter()
        .filter_map(|p| p.as_ref().file_name().and_then(|n| n.to_str()))
        .collect();
    let has_routes = paths.iter().any(|p| {
        p.as_ref()
            .to_string_lossy()
            .replace('\\', "/")
            .ends_with("config/routes.rb")
    });

    let mut out = Vec::new();
    let mut tool = |name: &str| {
        out.push(Gestalt {
            kind: GestaltKind::Tool,
            name: name.to_string(),
        });
    };

    if names.contains("pom.xml") {
        tool("maven");
    }
    if names.contains("build.xml") {
        tool("ant");
    }
    if names.contains("CMakeLists.txt") {
        tool("cmake");
    }
    if names.contains("configure.ac") || names.contains("configure.in") {
        tool("autotools");
    }
    if names.contains("Makefile") || names.contains("GNUmakefile") {
        tool("make");
    }
    if names.contains("Cargo.toml") {
        tool("cargo");
    }
    if names.contains("package.json") {
        tool("npm");
    }
    if names.contains("setup.py") {
        tool("setuptools");
    }
    if names.contains("Gemfile") {
        if has_routes {
            tool("rails");
        } else {
            tool("bundler");
        }
    }

    if markers.windows_h {
        out.push(Gestalt {
            kind: GestaltKind::Platform,
            name: "win32".to_string(),
        });
    }
    if markers.unistd_h {
        out.push(Gestalt {
            kind: GestaltKind::Platform,
            name: "posix".to_string(),
        });
    }

    for lang in languages {
        out.push(Gestalt {
            kind: GestaltKind::Language,
            name: lang.as_str().to_string(),
        });
    }

    out.sort();
    out.dedup();
    out
}
