// crates/core/src/detect/probe.rs
//! 外部ファイル種別プローブ
//!
//! 最終手段として、ホスト提供の「内容からファイル種別を述べる」関数に
//! 問い合わせます。既定の実装は `file(1)` を起動しますが、単一の
//! トレイトに隔離してあるため、ネイティブなマジックナンバー判定へ
//! 差し替えられます。

use std::path::Path;
use std::process::Command;

use crate::error::{PolycountError, Result};
use crate::language::Language;

/// ファイル種別プローブ
///
/// 契約: 同一内容に対して純粋で、対象ファイルの読み取り以外の副作用を
/// 持たないこと。
pub trait FileTypeProbe {
    /// ファイルの内容を説明する文字列を返す
    fn identify(&self, path: &Path) -> Result<String>;
}

/// `file(1)` を起動する既定のプローブ
#[derive(Debug, Default)]
pub struct SystemFileProbe;

impl FileTypeProbe for SystemFileProbe {
    fn identify(&self, path: &Path) -> Result<String> {
        let output = Command::new("file")
            .arg("-b")
            .arg(path)
            .output()
            .map_err(|e| PolycountError::Probe {
                reason: format!("failed to run file(1): {e}"),
            })?;
        if !output.status.success() {
            return Err(PolycountError::Probe {
                reason: format!("file(1) exited with {}", output.status),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// 何も答えないプローブ（テスト・純粋検出用）
#[derive(Debug, Default)]
pub struct NullProbe;

impl FileTypeProbe for NullProbe {
    fn identify(&self, _path: &Path) -> Result<String> {
        Err(PolycountError::Probe {
            reason: "probe disabled".to_string(),
        })
    }
}

/// プローブ出力を言語識別子へ解釈する
///
/// `script text` / `shell script text` / `XML document text` の
/// パターンを拾い、Bourne-Again は `shell` へ写像します。
#[must_use]
pub fn language_from_description(desc: &str) -> Option<Language> {
    if desc.contains("Bourne-Again shell script") || desc.contains("shell script text") {
        return Some(Language::Shell);
    }
    if desc.contains("XML document text") || desc.contains("XML  document text") {
        return Some(Language::Xml);
    }

    // 「<name> script」の <name> を言語名として解決する
    let tokens: Vec<&str> = desc.split_whitespace().collect();
    for (i, token) in tokens.iter().enumerate() {
        if token.trim_end_matches([',', '.']).eq_ignore_ascii_case("script") && i > 0 {
            let raw = tokens[i - 1];
            // "/usr/bin/perl script" のようなパス形式はベース名を取る
            let name = raw.rsplit('/').next().unwrap_or(raw);
            if let Some(lang) = Language::from_name(name) {
                return Some(lang);
            }
        }
    }
    None
}
