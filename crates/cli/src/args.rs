// crates/cli/src/args.rs
use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueHint};

/// Top-level CLI arguments parsed via clap.
///
/// レポート系フラグは相互排他で、同時指定は使用エラーになります。
#[derive(Parser, Debug, Default)]
#[command(
    name = "polycount",
    version = crate::VERSION,
    about = "ソースコード構成（言語別 code/comment/blank）の計測ツール",
    group(
        ArgGroup::new("report")
            .args([
                "summary",
                "detect",
                "annotate",
                "individual",
                "licenses",
                "gestalt",
                "raw_entities",
            ])
            .multiple(false)
    )
)]
pub struct Args {
    /// 言語別サマリを表示する（既定）
    #[arg(short = 's', long)]
    pub summary: bool,

    /// ファイルごとの検出言語を表示する
    #[arg(short = 'd', long)]
    pub detect: bool,

    /// 各行を言語と分類で注釈して表示する
    #[arg(short = 'a', long)]
    pub annotate: bool,

    /// ファイルごとの集計を表示する
    #[arg(short = 'i', long)]
    pub individual: bool,

    /// 検出されたライセンスを表示する
    #[arg(short = 'l', long)]
    pub licenses: bool,

    /// プロジェクトのゲシュタルト（ツール/プラットフォーム）を表示する
    #[arg(short = 'g', long)]
    pub gestalt: bool,

    /// エンティティスパンをそのまま表示する
    #[arg(short = 'e', long = "raw-entities")]
    pub raw_entities: bool,

    /// JSON で出力する (summary / detect / individual)
    #[arg(long)]
    pub json: bool,

    /// 隠しファイルも走査する
    #[arg(long)]
    pub hidden: bool,

    /// ファイル単位の処理エラーを致命的として扱う
    #[arg(long)]
    pub strict: bool,

    /// 対象パス
    #[arg(value_hint = ValueHint::AnyPath, help_heading = "走査/入力")]
    pub paths: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_summary() {
        let args = Args::try_parse_from(["polycount", "."]).unwrap();
        assert!(!args.detect);
        assert!(!args.annotate);
        assert_eq!(args.paths, vec![PathBuf::from(".")]);
    }

    #[test]
    fn test_conflicting_reports_rejected() {
        assert!(Args::try_parse_from(["polycount", "-s", "-d", "."]).is_err());
        assert!(Args::try_parse_from(["polycount", "--licenses", "--gestalt"]).is_err());
    }

    #[test]
    fn test_short_and_long_forms() {
        let short = Args::try_parse_from(["polycount", "-e", "."]).unwrap();
        let long = Args::try_parse_from(["polycount", "--raw-entities", "."]).unwrap();
        assert!(short.raw_entities);
        assert!(long.raw_entities);
    }
}
