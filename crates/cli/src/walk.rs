// crates/cli/src/walk.rs
//! 対象ファイルの列挙
//!
//! `ignore` クレートで ignore ファイルを尊重しつつ走査し、見つけた
//! ファイルをチャネルへ流します。列挙と計測を重ねるため、walker は
//! 専用スレッドで動かします。

use std::path::PathBuf;

use crossbeam_channel::Sender;
use ignore::WalkBuilder;
use tracing::debug;

use crate::config::Config;

/// 設定に従ってパスを列挙し、チャネルへ送る
///
/// 受信側が先に終了した場合は静かに打ち切ります。
pub fn walk(config: &Config, tx: &Sender<PathBuf>) {
    let mut roots = config.paths.iter();
    let Some(first) = roots.next() else {
        return;
    };
    let mut builder = WalkBuilder::new(first);
    for root in roots {
        builder.add(root);
    }
    builder.hidden(!config.hidden).follow_links(false);

    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "walk entry error");
                continue;
            }
        };
        let is_file = entry
            .file_type()
            .is_some_and(|t| t.is_file());
        if !is_file {
            continue;
        }
        if tx.send(entry.into_path()).is_err() {
            return;
        }
    }
}
