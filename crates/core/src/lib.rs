#![allow(clippy::multiple_crate_versions)]

//! Library crate for the `polycount` analyzers.
//!
//! 言語検出パイプライン (`detect`)、スキャナカーネルと言語スキャナ群
//! (`scan`)、行集計 (`measure`) に加えて、ライセンス検出とゲシュタルト
//! 推定を公開します。永続状態は持たず、すべて純粋な解析です。

pub mod context;
pub mod detect;
pub mod error;
pub mod gestalt;
pub mod language;
pub mod license;
pub mod measure;
pub mod scan;

pub use context::{SiblingSet, SourceFile};
pub use detect::{detect, detect_with_probe};
pub use error::{PolycountError, Result};
pub use language::Language;
pub use measure::{measure, Composition, LocCounts};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// ファイルを検出してから走査する便利関数
///
/// 言語が決まらないファイルは空の内訳を返します。
pub fn detect_and_measure(file: &SourceFile) -> Result<(Option<Language>, Composition)> {
    let Some(lang) = detect(file)? else {
        return Ok((None, Composition::new()));
    };
    let composition = measure(lang, file.contents()?);
    Ok((Some(lang), composition))
}
