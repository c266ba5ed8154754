// crates/core/src/detect/mod.rs
//! 言語検出パイプライン
//!
//! 段階は順に: バイナリ除外 → 既知ファイル名 → 拡張子 → 曖昧解決 →
//! Emacs モード行 → 外部プローブ。非不在の判定を返した最初の段階が
//! 勝ちます。検出は同一コンテキストに対して決定的です。

pub mod maps;
pub mod modeline;
pub mod probe;
pub mod resolvers;

use tracing::{debug, warn};

use crate::context::SourceFile;
use crate::error::Result;
use crate::language::Language;
use maps::ExtMapping;
use probe::{FileTypeProbe, SystemFileProbe};

/// 既定のプローブ（`file(1)`）で検出する
pub fn detect(file: &SourceFile) -> Result<Option<Language>> {
    detect_with_probe(file, &SystemFileProbe)
}

/// プローブを差し替えて検出する
pub fn detect_with_probe(
    file: &SourceFile,
    probe: &dyn FileTypeProbe,
) -> Result<Option<Language>> {
    // 1. バイナリ除外: 既知のバイナリ拡張子、または先頭 100 バイトの NUL
    if let Some(ext) = file.extension() {
        if maps::binary_extensions().contains(ext.to_lowercase().as_str()) {
            return Ok(None);
        }
    }
    if file.head(100)?.contains(&0) {
        return Ok(None);
    }

    // 2. 既知ファイル名
    if let Some(lang) = maps::filename_map().get(file.file_name()) {
        return Ok(Some(*lang));
    }

    // 3. 拡張子 (+ 4. 曖昧解決)
    if let Some(ext) = file.extension() {
        match maps::lookup_extension(ext) {
            Some(ExtMapping::Terminal(lang)) => return Ok(Some(lang)),
            Some(ExtMapping::Resolver(resolver)) => {
                if let Some(lang) = resolvers::resolve(resolver, file, probe)? {
                    debug!(path = %file.path().display(), lang = %lang, "resolver decision");
                    return Ok(Some(lang));
                }
            }
            None => {}
        }
    }

    // 5. Emacs モード行
    if let Some(lang) = modeline::from_buffer(file.contents()?) {
        return Ok(Some(lang));
    }

    // 6. 外部プローブ（失敗は「回答なし」として扱う）
    match probe.identify(file.path()) {
        Ok(desc) => {
            if let Some(lang) = probe::language_from_description(&desc) {
                return Ok(Some(lang));
            }
        }
        Err(e) => {
            warn!(path = %file.path().display(), error = %e, "file type probe failed");
        }
    }

    Ok(None)
}
