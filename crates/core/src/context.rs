// crates/core/src/context.rs
//! 検出パイプラインが消費するファイルコンテキスト
//!
//! ファイル本体は遅延読み込みし、同一ディレクトリのファイル名集合
//! （シブリングスナップショット）は実行中共有・不変です。スナップ
//! ショット単位のフラグは一度だけ計算されます。

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::error::{PolycountError, Result};

/// 同一ソースセット内のファイル名スナップショット（不変）
///
/// `contains_*` フラグは `OnceLock` でスナップショットごとに一度だけ
/// 計算され、スレッド間で共有しても結果は変わりません。
#[derive(Debug, Default)]
pub struct SiblingSet {
    names: Vec<String>,
    contains_m: OnceLock<bool>,
    contains_pike_or_pmod: OnceLock<bool>,
    contains_vb: OnceLock<bool>,
}

impl SiblingSet {
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        Self {
            names,
            ..Self::default()
        }
    }

    /// 空のスナップショット（単独ファイル処理用）
    #[must_use]
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// ディレクトリの内容からスナップショットを作る
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut names = Vec::new();
        let entries = std::fs::read_dir(dir).map_err(|e| PolycountError::io(dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| PolycountError::io(dir, e))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(Self::new(names))
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// 指定ファイル名が存在するか
    #[must_use]
    pub fn contains_file(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// 指定拡張子（小文字比較）のファイルが存在するか
    #[must_use]
    pub fn contains_extension(&self, ext: &str) -> bool {
        self.names.iter().any(|n| {
            Path::new(n)
                .extension()
                .is_some_and(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
        })
    }

    /// `.m` ファイルを含むか
    #[must_use]
    pub fn contains_m(&self) -> bool {
        *self
            .contains_m
            .get_or_init(|| self.contains_extension("m"))
    }

    /// `.pike` / `.pmod` ファイルを含むか
    #[must_use]
    pub fn contains_pike_or_pmod(&self) -> bool {
        *self
            .contains_pike_or_pmod
            .get_or_init(|| self.contains_extension("pike") || self.contains_extension("pmod"))
    }

    /// Visual Basic 系のファイルを含むか
    #[must_use]
    pub fn contains_vb(&self) -> bool {
        *self.contains_vb.get_or_init(|| {
            ["vb", "vba", "vbs", "frm", "frx"]
                .iter()
                .any(|ext| self.contains_extension(ext))
        })
    }
}

/// 検出対象のファイル 1 件
///
/// 内容は最初のアクセスで読み込み、以降は共有されます。
#[derive(Debug)]
pub struct SourceFile {
    path: PathBuf,
    contents: OnceLock<Vec<u8>>,
    siblings: Arc<SiblingSet>,
}

impl SourceFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, siblings: Arc<SiblingSet>) -> Self {
        Self {
            path: path.into(),
            contents: OnceLock::new(),
            siblings,
        }
    }

    /// 読み込み済みの内容を持つコンテキストを作る（合成ファイル名用）
    #[must_use]
    pub fn with_contents(
        path: impl Into<PathBuf>,
        contents: Vec<u8>,
        siblings: Arc<SiblingSet>,
    ) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(contents);
        Self {
            path: path.into(),
            contents: cell,
            siblings,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn siblings(&self) -> &Arc<SiblingSet> {
        &self.siblings
    }

    /// ファイル名（パス末尾）
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    /// 拡張子（大文字小文字は保持）
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|e| e.to_str())
    }

    /// 拡張子を除いたファイル名
    #[must_use]
    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    /// 内容（遅延読み込み）
    pub fn contents(&self) -> Result<&[u8]> {
        if self.contents.get().is_none() {
            let data =
                std::fs::read(&self.path).map_err(|e| PolycountError::io(&self.path, e))?;
            let _ = self.contents.set(data);
        }
        Ok(self.contents.get().map(Vec::as_slice).unwrap_or_default())
    }

    /// 先頭 `n` バイト
    pub fn head(&self, n: usize) -> Result<&[u8]> {
        let data = self.contents()?;
        Ok(&data[..data.len().min(n)])
    }
}
