// crates/core/src/detect/maps.rs
//! 検出テーブル
//!
//! バイナリ拡張子集合、既知ファイル名マップ、拡張子マップを定義します。
//! 拡張子マップの値は確定 (`Terminal`) か曖昧解決 (`Resolver`) の
//! タグ付きバリアントです。

use std::sync::OnceLock;

use hashbrown::{HashMap, HashSet};

use crate::language::Language;

/// 拡張子マップの値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtMapping {
    /// 確定した言語
    Terminal(Language),
    /// 内容依存の曖昧解決へ
    Resolver(Resolver),
}

/// 曖昧な拡張子の解決器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolver {
    /// `.m`: objective-c / matlab / octave / limbo
    DotM,
    /// `.h`: c / cpp / objective-c / pike
    DotH,
    /// `.in`: 拡張子を剥がして再検出
    DotIn,
    /// `.inc`: php か否か
    DotInc,
    /// `.cs`: csharp / clearsilver-template
    DotCs,
    /// `.f` 系: 固定形式 / 自由形式
    Fortran,
    /// `.aspx` / `.ascx`: C# / VB
    Aspx,
    /// `.bas`
    Bas,
    /// `.bi`
    Bi,
    /// `.st`: smalltalk か否か
    St,
    /// `.b`: limbo / basic
    B,
}

/// 既知のバイナリ拡張子（小文字）
pub fn binary_extensions() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        [
            // 画像
            "png", "jpg", "jpeg", "gif", "bmp", "ico", "tif", "tiff", "svgz", "webp", "psd",
            // アーカイブ
            "zip", "tar", "gz", "tgz", "bz2", "xz", "7z", "rar", "jar", "war",
            // オフィス文書
            "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "odp",
            // メディア
            "mp3", "mp4", "avi", "mov", "wav", "flac", "ogg", "mkv", "webm", "swf",
            // フォント
            "ttf", "otf", "woff", "woff2", "eot",
            // 生成物
            "exe", "dll", "so", "dylib", "a", "o", "obj", "class", "pyc", "pyo", "wasm",
            "db", "sqlite", "sqlite3", "bin",
        ]
        .into_iter()
        .collect()
    })
}

/// 既知ファイル名の確定マップ
pub fn filename_map() -> &'static HashMap<&'static str, Language> {
    static MAP: OnceLock<HashMap<&'static str, Language>> = OnceLock::new();
    MAP.get_or_init(|| {
        let mut m = HashMap::new();
        m.insert("Makefile", Language::Make);
        m.insert("makefile", Language::Make);
        m.insert("GNUmakefile", Language::Make);
        m.insert("Kbuild", Language::Make);
        m.insert("Makefile.am", Language::Automake);
        m.insert("CMakeLists.txt", Language::Cmake);
        m.insert("configure.ac", Language::Autoconf);
        m.insert("configure.in", Language::Autoconf);
        m.insert("Rakefile", Language::Ruby);
        m.insert("Gemfile", Language::Ruby);
        m.insert("Vagrantfile", Language::Ruby);
        m
    })
}

/// 拡張子の照会（大文字小文字をそのまま試し、なければ小文字で再試行）
#[must_use]
pub fn lookup_extension(ext: &str) -> Option<ExtMapping> {
    let map = extension_map();
    if let Some(entry) = map.get(ext) {
        return Some(*entry);
    }
    map.get(ext.to_lowercase().as_str()).copied()
}

fn extension_map() -> &'static HashMap<&'static str, ExtMapping> {
    static MAP: OnceLock<HashMap<&'static str, ExtMapping>> = OnceLock::new();
    MAP.get_or_init(|| {
        use ExtMapping::{Resolver as R, Terminal as T};
        let mut m = HashMap::new();

        // 確定拡張子
        m.insert("as", T(Language::Actionscript));
        m.insert("adb", T(Language::Ada));
        m.insert("ads", T(Language::Ada));
        m.insert("asm", T(Language::Assembler));
        m.insert("s", T(Language::Assembler));
        m.insert("S", T(Language::Assembler));
        m.insert("m4", T(Language::Autoconf));
        m.insert("ac", T(Language::Autoconf));
        m.insert("am", T(Language::Automake));
        m.insert("awk", T(Language::Awk));
        m.insert("bat", T(Language::Bat));
        m.insert("cmd", T(Language::Bat));
        m.insert("boo", T(Language::Boo));
        m.insert("c", T(Language::C));
        // 大文字 .C は慣習的に C++
        m.insert("C", T(Language::Cpp));
        m.insert("cc", T(Language::Cpp));
        m.insert("cpp", T(Language::Cpp));
        m.insert("cxx", T(Language::Cpp));
        m.insert("c++", T(Language::Cpp));
        m.insert("hpp", T(Language::Cpp));
        m.insert("hxx", T(Language::Cpp));
        m.insert("hh", T(Language::Cpp));
        m.insert("cmake", T(Language::Cmake));
        m.insert("css", T(Language::Css));
        m.insert("d", T(Language::D));
        m.insert("e", T(Language::Eiffel));
        m.insert("erl", T(Language::Erlang));
        m.insert("hrl", T(Language::Erlang));
        m.insert("go", T(Language::Go));
        m.insert("groovy", T(Language::Groovy));
        m.insert("hs", T(Language::Haskell));
        m.insert("hx", T(Language::Haxe));
        m.insert("htm", T(Language::Html));
        m.insert("html", T(Language::Html));
        m.insert("xhtml", T(Language::Html));
        m.insert("java", T(Language::Java));
        m.insert("js", T(Language::Javascript));
        m.insert("jsp", T(Language::Jsp));
        m.insert("lisp", T(Language::Lisp));
        m.insert("el", T(Language::Lisp));
        m.insert("cl", T(Language::Lisp));
        m.insert("lua", T(Language::Lua));
        m.insert("mk", T(Language::Make));
        m.insert("mak", T(Language::Make));
        m.insert("mm", T(Language::ObjectiveC));
        m.insert("ml", T(Language::Ocaml));
        m.insert("mli", T(Language::Ocaml));
        m.insert("pas", T(Language::Pascal));
        m.insert("pp", T(Language::Pascal));
        m.insert("pl", T(Language::Perl));
        m.insert("pm", T(Language::Perl));
        m.insert("perl", T(Language::Perl));
        m.insert("php", T(Language::Php));
        m.insert("php3", T(Language::Php));
        m.insert("php4", T(Language::Php));
        m.insert("php5", T(Language::Php));
        m.insert("phtml", T(Language::Php));
        m.insert("pike", T(Language::Pike));
        m.insert("pmod", T(Language::Pike));
        m.insert("py", T(Language::Python));
        m.insert("pyw", T(Language::Python));
        m.insert("rex", T(Language::Rexx));
        m.insert("rexx", T(Language::Rexx));
        m.insert("rhtml", T(Language::Rhtml));
        m.insert("erb", T(Language::Rhtml));
        m.insert("rb", T(Language::Ruby));
        m.insert("rake", T(Language::Ruby));
        m.insert("rs", T(Language::Rust));
        m.insert("scala", T(Language::Scala));
        m.insert("scm", T(Language::Scheme));
        m.insert("ss", T(Language::Scheme));
        m.insert("sh", T(Language::Shell));
        m.insert("bash", T(Language::Shell));
        m.insert("zsh", T(Language::Shell));
        m.insert("ksh", T(Language::Shell));
        m.insert("ebuild", T(Language::Shell));
        m.insert("sql", T(Language::Sql));
        m.insert("tcl", T(Language::Tcl));
        m.insert("tex", T(Language::Tex));
        m.insert("ltx", T(Language::Tex));
        m.insert("latex", T(Language::Tex));
        m.insert("vala", T(Language::Vala));
        m.insert("vhd", T(Language::Vhdl));
        m.insert("vhdl", T(Language::Vhdl));
        m.insert("vim", T(Language::Vim));
        m.insert("vb", T(Language::Visualbasic));
        m.insert("vba", T(Language::Visualbasic));
        m.insert("vbs", T(Language::Visualbasic));
        m.insert("frm", T(Language::Visualbasic));
        m.insert("xml", T(Language::Xml));
        m.insert("xsd", T(Language::Xml));
        m.insert("xsl", T(Language::Xslt));
        m.insert("xslt", T(Language::Xslt));

        // 曖昧拡張子
        m.insert("m", R(Resolver::DotM));
        m.insert("h", R(Resolver::DotH));
        m.insert("in", R(Resolver::DotIn));
        m.insert("inc", R(Resolver::DotInc));
        m.insert("cs", R(Resolver::DotCs));
        m.insert("f", R(Resolver::Fortran));
        m.insert("for", R(Resolver::Fortran));
        m.insert("ftn", R(Resolver::Fortran));
        m.insert("f77", R(Resolver::Fortran));
        m.insert("f90", R(Resolver::Fortran));
        m.insert("f95", R(Resolver::Fortran));
        m.insert("f03", R(Resolver::Fortran));
        m.insert("aspx", R(Resolver::Aspx));
        m.insert("ascx", R(Resolver::Aspx));
        m.insert("bas", R(Resolver::Bas));
        m.insert("bi", R(Resolver::Bi));
        m.insert("st", R(Resolver::St));
        m.insert("b", R(Resolver::B));

        m
    })
}
