// crates/core/src/license.rs
//! ライセンス検出
//!
//! ファイル先頭 4KiB に対する正規表現バンクです。内容のみの純関数で、
//! 見つかったライセンスを重複なく返します。

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// 検出対象のライセンス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum License {
    Gpl,
    Gpl3,
    Lgpl,
    Mit,
    Apache2,
    Bsd,
    Mpl,
}

impl License {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gpl => "gpl",
            Self::Gpl3 => "gpl3",
            Self::Lgpl => "lgpl",
            Self::Mit => "mit",
            Self::Apache2 => "apache_2",
            Self::Bsd => "bsd",
            Self::Mpl => "mpl",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Gpl => "GNU GPL",
            Self::Gpl3 => "GNU GPL v3",
            Self::Lgpl => "GNU LGPL",
            Self::Mit => "MIT/X11",
            Self::Apache2 => "Apache License 2.0",
            Self::Bsd => "BSD",
            Self::Mpl => "Mozilla Public License",
        }
    }
}

const SNIFF_WINDOW: usize = 4096;

fn bank() -> &'static [(License, Regex)] {
    static BANK: OnceLock<Vec<(License, Regex)>> = OnceLock::new();
    BANK.get_or_init(|| {
        // GPL3 を GPL より先に照合する（GPL の表現は v3 の文面にも一致する）
        [
            (
                License::Gpl3,
                r"(?i)GNU General Public License.{0,200}?version 3|GPL-?v?3",
            ),
            (
                License::Gpl,
                r"(?i)GNU General Public License|GPL-?v?2|\bGPL\b",
            ),
            (
                License::Lgpl,
                r"(?i)GNU Lesser General Public License|\bLGPL\b",
            ),
            (
                License::Mit,
                r"(?i)Permission is hereby granted, free of charge|\bMIT license\b",
            ),
            (
                License::Apache2,
                r"(?i)Apache License,?\s*Version 2\.0|Licensed under the Apache License",
            ),
            (
                License::Bsd,
                r"(?i)Redistribution and use in source and binary forms",
            ),
            (
                License::Mpl,
                r"(?i)Mozilla Public License",
            ),
        ]
        .into_iter()
        .map(|(lic, pat)| (lic, Regex::new(pat).unwrap()))
        .collect()
    })
}

/// バッファからライセンスを嗅ぎ分ける
///
/// LGPL の文面は GPL のパターンにも一致するため、LGPL が見つかった
/// 場合は GPL を落とします。
#[must_use]
pub fn sniff(buf: &[u8]) -> Vec<License> {
    let head = &buf[..buf.len().min(SNIFF_WINDOW)];
    let text = String::from_utf8_lossy(head);
    let mut found: Vec<License> = bank()
        .iter()
        .filter(|(_, re)| re.is_match(&text))
        .map(|(lic, _)| *lic)
        .collect();

    if found.contains(&License::Lgpl) {
        found.retain(|l| !matches!(l, License::Gpl | License::Gpl3));
    } else if found.contains(&License::Gpl3) {
        found.retain(|l| *l != License::Gpl);
    }
    found.sort();
    found.dedup();
    found
}
