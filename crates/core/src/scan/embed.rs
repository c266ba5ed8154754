// crates/core/src/scan/embed.rs
//! 埋め込みスーパーバイザ
//!
//! ホスト言語がゲスト言語を埋め込む際の呼び出し/復帰を管理します。
//! 行フラグは常にアクティブなスキャナが所有し、呼び出し時にスナップ
//! ショットを取ってゲストには初期状態のフラグを渡します。復帰時の
//! 復元は、エントリと同じ行で復帰した場合（行内埋め込み）に限り、
//! ホストのスナップショットとゲストのマークを合成します。ゲストが
//! 改行をまたいだ場合、スナップショットの行は既に確定済みであり、
//! 復元すると新しい行へ古いフラグが漏れるため何もしません。

use crate::language::Language;
use crate::scan::kernel::{Kernel, LineFlags};

/// 埋め込みネストの上限
///
/// 超過はスキャナ障害として扱い、残りのバイトをホストに帰属させます。
pub const MAX_EMBED_DEPTH: usize = 4;

/// スキャナ活性化レコード
#[derive(Debug)]
struct Activation {
    #[allow(dead_code)]
    host: Language,
    flags: LineFlags,
    entry_line_start: usize,
}

/// スキャナ呼び出しスタック
#[derive(Debug, Default)]
pub struct Supervisor {
    stack: Vec<Activation>,
}

impl Supervisor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// ゲストへの遷移を試みる
    ///
    /// 深さ上限に達している場合は `false` を返し、呼び出し側は
    /// デリミタ以降をホストのトークンとして処理し続けます。
    pub fn try_enter(&mut self, k: &mut Kernel<'_, '_>, host: Language) -> bool {
        if self.stack.len() >= MAX_EMBED_DEPTH {
            return false;
        }
        self.stack.push(Activation {
            host,
            flags: k.flags(),
            entry_line_start: k.line_start(),
        });
        k.clear_flags();
        true
    }

    /// ホストへの復帰
    ///
    /// 同一行内で復帰した場合のみ、ホストのスナップショットと現在の
    /// フラグを合成して戻す（code が comment に優先する不変条件を維持）。
    pub fn leave(&mut self, k: &mut Kernel<'_, '_>) {
        if let Some(act) = self.stack.pop() {
            if k.line_start() == act.entry_line_start {
                let current = k.flags();
                let contains_code = act.flags.contains_code || current.contains_code;
                let whole_line_comment = !contains_code
                    && (act.flags.whole_line_comment || current.whole_line_comment);
                k.set_flags(LineFlags {
                    contains_code,
                    whole_line_comment,
                });
            }
        }
    }
}
