// crates/core/src/detect/resolvers.rs
//! 曖昧拡張子の解決器
//!
//! 各解決器はファイルコンテキストの純関数です。内容のスコアリング、
//! シブリングファイル名の参照、合成ファイル名での再検出で言語を
//! 確定します。解決できない場合は `None` を返し、パイプラインの
//! 後段（モード行・外部プローブ）へ落ちます。

use std::sync::OnceLock;

use regex::Regex;

use crate::context::{SiblingSet, SourceFile};
use crate::detect::maps::Resolver;
use crate::detect::probe::FileTypeProbe;
use crate::error::Result;
use crate::language::Language;

/// 解決器のディスパッチ
pub fn resolve(
    resolver: Resolver,
    file: &SourceFile,
    probe: &dyn FileTypeProbe,
) -> Result<Option<Language>> {
    match resolver {
        Resolver::DotM => resolve_m(file),
        Resolver::DotH => resolve_h(file),
        Resolver::DotIn => resolve_in(file, probe),
        Resolver::DotInc => resolve_inc(file),
        Resolver::DotCs => resolve_cs(file),
        Resolver::Fortran => resolve_fortran(file),
        Resolver::Aspx => resolve_aspx(file),
        Resolver::Bas => resolve_bas(file),
        Resolver::Bi => resolve_bi(file),
        Resolver::St => resolve_st(file),
        Resolver::B => resolve_b(file),
    }
}

fn objc_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*[-+@]|#import|@interface|@implementation|@protocol|@end").unwrap()
    })
}

fn limbo_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^\s*implement\s+\w+\s*;|^\s*include\s+"[^"]+"\s*;|\bpick\b|case\s*\{"#)
            .unwrap()
    })
}

fn matlab_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*%|^\s*function\b|\bend;?\s*$").unwrap())
}

fn octave_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(endfunction|endwhile|end_try_catch|end_unwind_protect)\b").unwrap()
    })
}

/// `.m`: objective-c / matlab / octave / limbo
///
/// 行単位のスコアが最大の言語を選ぶ。同点は limbo > objective-c >
/// octave > matlab の順。MATLAB 系が勝った場合は octave 固有キーワード
/// の二次走査で octave / matlab を分ける。
fn resolve_m(file: &SourceFile) -> Result<Option<Language>> {
    let contents = file.contents()?;
    let text = String::from_utf8_lossy(contents);

    let mut objc = 0usize;
    let mut limbo = 0usize;
    let mut mat = 0usize;
    for line in text.lines() {
        if objc_line_re().is_match(line) {
            objc += 1;
        }
        if limbo_line_re().is_match(line) {
            limbo += 1;
        }
        if matlab_line_re().is_match(line) {
            mat += 1;
        }
    }
    if objc_header_bonus(file.siblings()) {
        objc += 5;
    }

    let lang = if limbo >= objc && limbo >= mat {
        Language::Limbo
    } else if objc >= mat {
        Language::ObjectiveC
    } else if has_octave_markers(&text) {
        Language::Octave
    } else {
        Language::Matlab
    };
    Ok(Some(lang))
}

/// `.h` のシブリングに `.h` があり C/C++ ソースが無い場合の加点
fn objc_header_bonus(siblings: &SiblingSet) -> bool {
    siblings.contains_extension("h")
        && !["c", "cc", "cpp", "cxx"]
            .iter()
            .any(|ext| siblings.contains_extension(ext))
}

fn has_octave_markers(text: &str) -> bool {
    octave_marker_re().is_match(text)
        || text.lines().any(|l| l.trim_start().starts_with('#'))
}

fn objc_signature_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"@interface|@end").unwrap())
}

fn pike_keyword_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(mapping|multiset|mixed|inherit)\b").unwrap())
}

fn include_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"#\s*include\s*[<"]([^>"]+)[>"]"#).unwrap())
}

fn cpp_keyword_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(template|typename|class|namespace)\b").unwrap())
}

/// C++ 専用の標準ヘッダ
const CPP_ONLY_HEADERS: &[&str] = &[
    "algorithm", "bitset", "cassert", "cctype", "cerrno", "cfloat", "climits", "clocale",
    "cmath", "complex", "csetjmp", "csignal", "cstdarg", "cstddef", "cstdio", "cstdlib",
    "cstring", "ctime", "deque", "exception", "fstream", "functional", "iomanip", "ios",
    "iosfwd", "iostream", "istream", "iterator", "limits", "list", "locale", "map", "memory",
    "new", "numeric", "ostream", "queue", "set", "sstream", "stack", "stdexcept", "streambuf",
    "string", "typeinfo", "utility", "valarray", "vector",
];

/// `.h`: c / cpp / objective-c / pike
fn resolve_h(file: &SourceFile) -> Result<Option<Language>> {
    let siblings = file.siblings();
    // 同名の .m が並んでいればヘッダは Objective-C
    if siblings.contains_m() && siblings.contains_file(&format!("{}.m", file.stem())) {
        return Ok(Some(Language::ObjectiveC));
    }

    let text = String::from_utf8_lossy(file.contents()?);
    if objc_signature_re().find_iter(&text).count() > 1 {
        return Ok(Some(Language::ObjectiveC));
    }

    if siblings.contains_pike_or_pmod() && pike_keyword_re().is_match(&text) {
        return Ok(Some(Language::Pike));
    }

    for caps in include_re().captures_iter(&text) {
        if let Some(target) = caps.get(1) {
            if CPP_ONLY_HEADERS.contains(&target.as_str()) {
                return Ok(Some(Language::Cpp));
            }
        }
    }
    if cpp_keyword_re().is_match(&text) {
        return Ok(Some(Language::Cpp));
    }
    Ok(Some(Language::C))
}

/// `.in`: 拡張子を剥がした合成ファイル名で再検出する
fn resolve_in(file: &SourceFile, probe: &dyn FileTypeProbe) -> Result<Option<Language>> {
    let name = file.file_name();
    let Some(stripped) = name.strip_suffix(".in") else {
        return Ok(None);
    };
    if stripped.is_empty() {
        return Ok(None);
    }
    let contents = file.contents()?.to_vec();
    let synthetic_path = match file.path().parent() {
        Some(dir) => dir.join(stripped),
        None => std::path::PathBuf::from(stripped),
    };
    let synthetic = SourceFile::with_contents(synthetic_path, contents, file.siblings().clone());
    crate::detect::detect_with_probe(&synthetic, probe)
}

/// `.inc`: php か否か
fn resolve_inc(file: &SourceFile) -> Result<Option<Language>> {
    let contents = file.contents()?;
    if contents.contains(&0) {
        return Ok(None);
    }
    if find_subslice(contents, b"?php").is_some() {
        return Ok(Some(Language::Php));
    }
    Ok(None)
}

/// `.cs`: `<?cs` を含めば ClearSilver テンプレート、さもなくば C#
fn resolve_cs(file: &SourceFile) -> Result<Option<Language>> {
    let contents = file.contents()?;
    if find_subslice(contents, b"<?cs").is_some() {
        return Ok(Some(Language::ClearsilverTemplate));
    }
    Ok(Some(Language::Csharp))
}

fn fortran_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^ {0,4}\d+\s+\S").unwrap())
}

/// `.f` 系: 固定形式 / 自由形式
///
/// 1 桁目の古典コメントマーカーは固定形式の証拠、行末 `&` の継続は
/// 自由形式の証拠。どちらも無ければ数字のみのラベル桁を点検し、
/// 失格が無ければ自由形式に倒す。
fn resolve_fortran(file: &SourceFile) -> Result<Option<Language>> {
    let text = String::from_utf8_lossy(file.contents()?);

    let mut fixed_comment = false;
    let mut free_continuation = false;
    let mut numeric_label = false;

    for line in text.lines() {
        let bytes = line.as_bytes();
        if let Some(&first) = bytes.first() {
            if matches!(first, b'C' | b'c' | b'*')
                && bytes.get(1).is_none_or(|b| !b.is_ascii_alphanumeric())
            {
                fixed_comment = true;
            }
        }
        let trimmed = line.trim();
        if trimmed.ends_with('&') || trimmed.starts_with('&') {
            free_continuation = true;
        }
        if fortran_label_re().is_match(line) {
            numeric_label = true;
        }
    }

    let lang = if fixed_comment && !free_continuation {
        Language::FortranFixed
    } else if free_continuation {
        Language::FortranFree
    } else if numeric_label {
        Language::FortranFixed
    } else {
        Language::FortranFree
    };
    Ok(Some(lang))
}

fn aspx_vb_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)Language\s*=\s*"?\s*VB"#).unwrap())
}

/// `.aspx` / `.ascx`: `Language="VB"` ディレクティブの有無
fn resolve_aspx(file: &SourceFile) -> Result<Option<Language>> {
    let text = String::from_utf8_lossy(file.contents()?);
    if aspx_vb_re().is_match(&text) {
        return Ok(Some(Language::VbAspx));
    }
    Ok(Some(Language::CsAspx))
}

fn basic_lineno_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\d+\s+\w+").unwrap())
}

/// `.bas`: 行番号 → classic、VB シブリング → visualbasic、他 → structured
fn resolve_bas(file: &SourceFile) -> Result<Option<Language>> {
    let text = String::from_utf8_lossy(file.contents()?);
    if basic_lineno_re().is_match(&text) {
        return Ok(Some(Language::ClassicBasic));
    }
    if file.siblings().contains_vb() {
        return Ok(Some(Language::Visualbasic));
    }
    Ok(Some(Language::StructuredBasic))
}

/// `.bi`: 行番号ヒューリスティックのみ（VB シブリング判定なし）
fn resolve_bi(file: &SourceFile) -> Result<Option<Language>> {
    let text = String::from_utf8_lossy(file.contents()?);
    if basic_lineno_re().is_match(&text) {
        return Ok(Some(Language::ClassicBasic));
    }
    Ok(Some(Language::StructuredBasic))
}

fn smalltalk_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r":\s*\[").unwrap())
}

/// `.st`: `:=`・`: [`・`].` の共起を要求する
fn resolve_st(file: &SourceFile) -> Result<Option<Language>> {
    let text = String::from_utf8_lossy(file.contents()?);
    if text.contains(":=") && text.contains("].") && smalltalk_block_re().is_match(&text) {
        return Ok(Some(Language::Smalltalk));
    }
    Ok(None)
}

/// `.b`: limbo のヒューリスティック、外れたら `.bi` の規則へ
fn resolve_b(file: &SourceFile) -> Result<Option<Language>> {
    let text = String::from_utf8_lossy(file.contents()?);
    if text.lines().any(|l| limbo_line_re().is_match(l)) {
        return Ok(Some(Language::Limbo));
    }
    resolve_bi(file)
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn file_with(name: &str, contents: &[u8], siblings: Vec<&str>) -> SourceFile {
        let set = Arc::new(SiblingSet::new(
            siblings.into_iter().map(String::from).collect(),
        ));
        SourceFile::with_contents(name, contents.to_vec(), set)
    }

    #[test]
    fn test_m_octave() {
        let f = file_with(
            "f.m",
            b"function y = f(x)\n y = x+1;\nendfunction\n",
            vec![],
        );
        assert_eq!(resolve_m(&f).ok().flatten(), Some(Language::Octave));
    }

    #[test]
    fn test_m_matlab() {
        let f = file_with("f.m", b"% helper\nfunction y = f(x)\ny = x + 1;\nend\n", vec![]);
        assert_eq!(resolve_m(&f).ok().flatten(), Some(Language::Matlab));
    }

    #[test]
    fn test_m_objective_c() {
        let src = b"#import <Foundation/Foundation.h>\n@implementation Foo\n- (void)bar {}\n@end\n";
        let f = file_with("Foo.m", src, vec![]);
        assert_eq!(resolve_m(&f).ok().flatten(), Some(Language::ObjectiveC));
    }

    #[test]
    fn test_m_objective_c_header_bonus() {
        // 内容は中立でも .h シブリング（C/C++ ソース無し）で objc に傾く
        let f = file_with("Foo.m", b"% ambiguous\n", vec!["Foo.h"]);
        assert_eq!(resolve_m(&f).ok().flatten(), Some(Language::ObjectiveC));
    }

    #[test]
    fn test_m_limbo() {
        let f = file_with("mod.m", b"implement Command;\ninclude \"sys.m\";\n", vec![]);
        assert_eq!(resolve_m(&f).ok().flatten(), Some(Language::Limbo));
    }

    #[test]
    fn test_h_same_stem_m_sibling() {
        // 内容にかかわらず objective-c
        let f = file_with("Foo.h", b"int x;\n", vec!["Foo.m", "Foo.h"]);
        assert_eq!(resolve_h(&f).ok().flatten(), Some(Language::ObjectiveC));
    }

    #[test]
    fn test_h_objc_signatures() {
        let f = file_with("a.h", b"@interface A\n@end\n", vec![]);
        assert_eq!(resolve_h(&f).ok().flatten(), Some(Language::ObjectiveC));
    }

    #[test]
    fn test_h_cpp_header() {
        let f = file_with("a.h", b"#include <vector>\n", vec![]);
        assert_eq!(resolve_h(&f).ok().flatten(), Some(Language::Cpp));
    }

    #[test]
    fn test_h_cpp_keyword() {
        let f = file_with("a.h", b"template <typename T> T id(T x);\n", vec![]);
        assert_eq!(resolve_h(&f).ok().flatten(), Some(Language::Cpp));
    }

    #[test]
    fn test_h_plain_c() {
        let f = file_with("a.h", b"#include <stdio.h>\nint f(void);\n", vec![]);
        assert_eq!(resolve_h(&f).ok().flatten(), Some(Language::C));
    }

    #[test]
    fn test_h_pike() {
        let f = file_with(
            "a.h",
            b"inherit Base;\nmapping(string:int) counts;\n",
            vec!["mod.pike"],
        );
        assert_eq!(resolve_h(&f).ok().flatten(), Some(Language::Pike));
    }

    #[test]
    fn test_cs_clearsilver() {
        let f = file_with("t.cs", b"<?cs var:title ?>\n", vec![]);
        assert_eq!(
            resolve_cs(&f).ok().flatten(),
            Some(Language::ClearsilverTemplate)
        );
    }

    #[test]
    fn test_cs_csharp() {
        let f = file_with("t.cs", b"class Program {}\n", vec![]);
        assert_eq!(resolve_cs(&f).ok().flatten(), Some(Language::Csharp));
    }

    #[test]
    fn test_inc_php() {
        let f = file_with("lib.inc", b"<?php echo 1; ?>\n", vec![]);
        assert_eq!(resolve_inc(&f).ok().flatten(), Some(Language::Php));
    }

    #[test]
    fn test_inc_binary_and_plain() {
        let f = file_with("data.inc", b"\x00\x01\x02", vec![]);
        assert_eq!(resolve_inc(&f).ok().flatten(), None);
        let f = file_with("notes.inc", b"just text\n", vec![]);
        assert_eq!(resolve_inc(&f).ok().flatten(), None);
    }

    #[test]
    fn test_fortran_fixed_comment() {
        let f = file_with("a.f", b"C classic comment\n      X = 1\n", vec![]);
        assert_eq!(resolve_fortran(&f).ok().flatten(), Some(Language::FortranFixed));
    }

    #[test]
    fn test_fortran_free_continuation() {
        let f = file_with("a.f90", b"x = 1 + &\n    2\n", vec![]);
        assert_eq!(resolve_fortran(&f).ok().flatten(), Some(Language::FortranFree));
    }

    #[test]
    fn test_fortran_defaults_free() {
        let f = file_with("a.f", b"program t\nend program\n", vec![]);
        assert_eq!(resolve_fortran(&f).ok().flatten(), Some(Language::FortranFree));
    }

    #[test]
    fn test_aspx_vb_directive() {
        let f = file_with(
            "p.aspx",
            b"<%@ Page Language=\"VB\" %>\n",
            vec![],
        );
        assert_eq!(resolve_aspx(&f).ok().flatten(), Some(Language::VbAspx));
        let f = file_with("p.aspx", b"<%@ Page Language=\"C#\" %>\n", vec![]);
        assert_eq!(resolve_aspx(&f).ok().flatten(), Some(Language::CsAspx));
    }

    #[test]
    fn test_bas_variants() {
        let f = file_with("old.bas", b"10 PRINT \"HI\"\n20 GOTO 10\n", vec![]);
        assert_eq!(resolve_bas(&f).ok().flatten(), Some(Language::ClassicBasic));
        let f = file_with("m.bas", b"Sub Main()\nEnd Sub\n", vec!["Form1.frm"]);
        assert_eq!(resolve_bas(&f).ok().flatten(), Some(Language::Visualbasic));
        let f = file_with("m.bas", b"Sub Main()\nEnd Sub\n", vec![]);
        assert_eq!(resolve_bas(&f).ok().flatten(), Some(Language::StructuredBasic));
    }

    #[test]
    fn test_st_cooccurrence() {
        let src = b"x := 1.\nitems do: [ :e | e run ].\n";
        let f = file_with("a.st", src, vec![]);
        assert_eq!(resolve_st(&f).ok().flatten(), Some(Language::Smalltalk));
        let f = file_with("a.st", b"plain text\n", vec![]);
        assert_eq!(resolve_st(&f).ok().flatten(), None);
    }

    #[test]
    fn test_b_limbo_vs_basic() {
        let f = file_with("m.b", b"implement Command;\n", vec![]);
        assert_eq!(resolve_b(&f).ok().flatten(), Some(Language::Limbo));
        let f = file_with("m.b", b"10 PRINT\n", vec![]);
        assert_eq!(resolve_b(&f).ok().flatten(), Some(Language::ClassicBasic));
        let f = file_with("m.b", b"Dim x\n", vec![]);
        assert_eq!(resolve_b(&f).ok().flatten(), Some(Language::StructuredBasic));
    }
}
