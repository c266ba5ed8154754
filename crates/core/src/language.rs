// crates/core/src/language.rs
//! 言語識別子
//!
//! 検出パイプラインが返す閉じた言語集合を定義します。
//! 未知のファイルは言語なし (`Option::None`) として扱います。

use serde::Serialize;

/// 検出対象の言語識別子（閉集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Language {
    Actionscript,
    Ada,
    Assembler,
    Autoconf,
    Automake,
    Awk,
    Bat,
    Boo,
    C,
    ClassicBasic,
    Clearsilver,
    ClearsilverTemplate,
    Cmake,
    Cpp,
    CsAspx,
    Csharp,
    Css,
    D,
    Eiffel,
    Erlang,
    FortranFixed,
    FortranFree,
    Go,
    Groovy,
    Haskell,
    Haxe,
    Html,
    Java,
    Javascript,
    Jsp,
    Limbo,
    Lisp,
    Lua,
    Make,
    Matlab,
    ObjectiveC,
    Ocaml,
    Octave,
    Pascal,
    Perl,
    Php,
    Pike,
    Python,
    Rexx,
    Rhtml,
    Ruby,
    Rust,
    Scala,
    Scheme,
    Shell,
    Smalltalk,
    Sql,
    StructuredBasic,
    Tcl,
    Tex,
    Vala,
    VbAspx,
    Vhdl,
    Vim,
    Visualbasic,
    Xml,
    Xslt,
}

/// 全言語の一覧（表示・検証用）
pub const ALL_LANGUAGES: &[Language] = &[
    Language::Actionscript,
    Language::Ada,
    Language::Assembler,
    Language::Autoconf,
    Language::Automake,
    Language::Awk,
    Language::Bat,
    Language::Boo,
    Language::C,
    Language::ClassicBasic,
    Language::Clearsilver,
    Language::ClearsilverTemplate,
    Language::Cmake,
    Language::Cpp,
    Language::CsAspx,
    Language::Csharp,
    Language::Css,
    Language::D,
    Language::Eiffel,
    Language::Erlang,
    Language::FortranFixed,
    Language::FortranFree,
    Language::Go,
    Language::Groovy,
    Language::Haskell,
    Language::Haxe,
    Language::Html,
    Language::Java,
    Language::Javascript,
    Language::Jsp,
    Language::Limbo,
    Language::Lisp,
    Language::Lua,
    Language::Make,
    Language::Matlab,
    Language::ObjectiveC,
    Language::Ocaml,
    Language::Octave,
    Language::Pascal,
    Language::Perl,
    Language::Php,
    Language::Pike,
    Language::Python,
    Language::Rexx,
    Language::Rhtml,
    Language::Ruby,
    Language::Rust,
    Language::Scala,
    Language::Scheme,
    Language::Shell,
    Language::Smalltalk,
    Language::Sql,
    Language::StructuredBasic,
    Language::Tcl,
    Language::Tex,
    Language::Vala,
    Language::VbAspx,
    Language::Vhdl,
    Language::Vim,
    Language::Visualbasic,
    Language::Xml,
    Language::Xslt,
];

impl Language {
    /// 安定した機械可読名を返す
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Actionscript => "actionscript",
            Self::Ada => "ada",
            Self::Assembler => "assembler",
            Self::Autoconf => "autoconf",
            Self::Automake => "automake",
            Self::Awk => "awk",
            Self::Bat => "bat",
            Self::Boo => "boo",
            Self::C => "c",
            Self::ClassicBasic => "classic_basic",
            Self::Clearsilver => "clearsilver",
            Self::ClearsilverTemplate => "clearsilver_template",
            Self::Cmake => "cmake",
            Self::Cpp => "cpp",
            Self::CsAspx => "cs_aspx",
            Self::Csharp => "csharp",
            Self::Css => "css",
            Self::D => "d",
            Self::Eiffel => "eiffel",
            Self::Erlang => "erlang",
            Self::FortranFixed => "fortran_fixed",
            Self::FortranFree => "fortran_free",
            Self::Go => "go",
            Self::Groovy => "groovy",
            Self::Haskell => "haskell",
            Self::Haxe => "haxe",
            Self::Html => "html",
            Self::Java => "java",
            Self::Javascript => "javascript",
            Self::Jsp => "jsp",
            Self::Limbo => "limbo",
            Self::Lisp => "lisp",
            Self::Lua => "lua",
            Self::Make => "make",
            Self::Matlab => "matlab",
            Self::ObjectiveC => "objective_c",
            Self::Ocaml => "ocaml",
            Self::Octave => "octave",
            Self::Pascal => "pascal",
            Self::Perl => "perl",
            Self::Php => "php",
            Self::Pike => "pike",
            Self::Python => "python",
            Self::Rexx => "rexx",
            Self::Rhtml => "rhtml",
            Self::Ruby => "ruby",
            Self::Rust => "rust",
            Self::Scala => "scala",
            Self::Scheme => "scheme",
            Self::Shell => "shell",
            Self::Smalltalk => "smalltalk",
            Self::Sql => "sql",
            Self::StructuredBasic => "structured_basic",
            Self::Tcl => "tcl",
            Self::Tex => "tex",
            Self::Vala => "vala",
            Self::VbAspx => "vb_aspx",
            Self::Vhdl => "vhdl",
            Self::Vim => "vim",
            Self::Visualbasic => "visualbasic",
            Self::Xml => "xml",
            Self::Xslt => "xslt",
        }
    }

    /// 表示用の名称を返す
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Actionscript => "ActionScript",
            Self::Ada => "Ada",
            Self::Assembler => "Assembler",
            Self::Autoconf => "Autoconf",
            Self::Automake => "Automake",
            Self::Awk => "AWK",
            Self::Bat => "DOS batch",
            Self::Boo => "Boo",
            Self::C => "C",
            Self::ClassicBasic => "Classic BASIC",
            Self::Clearsilver => "ClearSilver",
            Self::ClearsilverTemplate => "ClearSilver template",
            Self::Cmake => "CMake",
            Self::Cpp => "C++",
            Self::CsAspx => "ASP.NET (C#)",
            Self::Csharp => "C#",
            Self::Css => "CSS",
            Self::D => "D",
            Self::Eiffel => "Eiffel",
            Self::Erlang => "Erlang",
            Self::FortranFixed => "Fortran (fixed form)",
            Self::FortranFree => "Fortran (free form)",
            Self::Go => "Go",
            Self::Groovy => "Groovy",
            Self::Haskell => "Haskell",
            Self::Haxe => "Haxe",
            Self::Html => "HTML",
            Self::Java => "Java",
            Self::Javascript => "JavaScript",
            Self::Jsp => "JSP",
            Self::Limbo => "Limbo",
            Self::Lisp => "Lisp",
            Self::Lua => "Lua",
            Self::Make => "Make",
            Self::Matlab => "MATLAB",
            Self::ObjectiveC => "Objective-C",
            Self::Ocaml => "OCaml",
            Self::Octave => "Octave",
            Self::Pascal => "Pascal",
            Self::Perl => "Perl",
            Self::Php => "PHP",
            Self::Pike => "Pike",
            Self::Python => "Python",
            Self::Rexx => "REXX",
            Self::Rhtml => "RHTML",
            Self::Ruby => "Ruby",
            Self::Rust => "Rust",
            Self::Scala => "Scala",
            Self::Scheme => "Scheme",
            Self::Shell => "Shell",
            Self::Smalltalk => "Smalltalk",
            Self::Sql => "SQL",
            Self::StructuredBasic => "Structured BASIC",
            Self::Tcl => "Tcl",
            Self::Tex => "TeX/LaTeX",
            Self::Vala => "Vala",
            Self::VbAspx => "ASP.NET (VB)",
            Self::Vhdl => "VHDL",
            Self::Vim => "Vimscript",
            Self::Visualbasic => "Visual Basic",
            Self::Xml => "XML",
            Self::Xslt => "XSLT",
        }
    }

    /// モード行・外部プローブの表記を言語識別子へ解決する
    ///
    /// `c++` → `cpp`、`caml` → `ocaml` などの別名も受け付けます。
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        let remapped = match lower.as_str() {
            "c++" => "cpp",
            "caml" => "ocaml",
            other => other,
        };
        if let Some(lang) = ALL_LANGUAGES
            .iter()
            .find(|l| l.as_str() == remapped)
            .copied()
        {
            return Some(lang);
        }
        // Spellings seen in mode lines and `file` output.
        match remapped {
            "objc" | "objective-c" | "objective-c++" => Some(Self::ObjectiveC),
            "sh" | "bash" | "zsh" | "ksh" | "bourne-again" => Some(Self::Shell),
            "js" | "ecmascript" => Some(Self::Javascript),
            "c#" | "cs" => Some(Self::Csharp),
            "f90" | "f95" | "fortran" => Some(Self::FortranFree),
            "f77" => Some(Self::FortranFixed),
            "makefile" | "gnumakefile" => Some(Self::Make),
            "emacs-lisp" | "elisp" => Some(Self::Lisp),
            "latex" => Some(Self::Tex),
            "basic" => Some(Self::StructuredBasic),
            "delphi" => Some(Self::Pascal),
            "vb" | "visual-basic" => Some(Self::Visualbasic),
            "vimscript" | "vimrc" => Some(Self::Vim),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
