// crates/cli/src/config.rs
use std::path::PathBuf;

use anyhow::Result;

use crate::args::Args;

/// 出力するレポートの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    #[default]
    Summary,
    Detect,
    Annotate,
    Individual,
    Licenses,
    Gestalt,
    RawEntities,
}

impl ReportMode {
    /// 行/エンティティイベントの再現にファイル内容が必要か
    #[must_use]
    pub const fn needs_contents(self) -> bool {
        matches!(self, Self::Annotate | Self::RawEntities)
    }
}

/// Top-level configuration derived from CLI arguments.
#[derive(Debug, Default)]
pub struct Config {
    pub mode: ReportMode,
    pub json: bool,
    pub hidden: bool,
    pub strict: bool,
    pub paths: Vec<PathBuf>,
}

impl TryFrom<Args> for Config {
    type Error = anyhow::Error;

    fn try_from(args: Args) -> Result<Self> {
        // 相互排他は clap の ArgGroup が保証済み
        let mode = if args.detect {
            ReportMode::Detect
        } else if args.annotate {
            ReportMode::Annotate
        } else if args.individual {
            ReportMode::Individual
        } else if args.licenses {
            ReportMode::Licenses
        } else if args.gestalt {
            ReportMode::Gestalt
        } else if args.raw_entities {
            ReportMode::RawEntities
        } else {
            ReportMode::Summary
        };

        let paths = if args.paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            args.paths
        };

        Ok(Self {
            mode,
            json: args.json,
            hidden: args.hidden,
            strict: args.strict,
            paths,
        })
    }
}
