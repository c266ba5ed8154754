// crates/core/src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// コア層のエラー型
///
/// バイナリ判定や未知言語はエラーではなく `None` として扱うため、
/// ここに現れるのは I/O と外部プローブの失敗だけです。
#[derive(Debug, Error)]
pub enum PolycountError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file type probe failed: {reason}")]
    Probe { reason: String },
}

pub type Result<T> = std::result::Result<T, PolycountError>;

impl PolycountError {
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
