//! End-to-end tests for the `polycount` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_polycount"))
}

fn fixture_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("main.c"),
        "// entry point\nint main(void) {\n    return 0;\n}\n\n",
    )
    .unwrap();
    fs::write(dir.path().join("util.py"), "# helper\nx = 1\n").unwrap();
    fs::write(
        dir.path().join("page.cs"),
        "<?cs\n #comment\n?>\n",
    )
    .unwrap();
    dir
}

#[test]
fn shows_help() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("polycount"));
}

#[test]
fn summary_is_the_default_report() {
    let dir = fixture_tree();
    bin()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("LANGUAGE"))
        .stdout(predicate::str::contains("Python"))
        .stdout(predicate::str::contains("TOTAL"));
}

#[test]
fn summary_counts_c_fixture() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.c"), "// c\nint x;\n\n").unwrap();
    bin()
        .args(["--json"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"code\": 1"))
        .stdout(predicate::str::contains("\"comment\": 1"))
        .stdout(predicate::str::contains("\"blank\": 1"));
}

#[test]
fn detect_lists_languages() {
    let dir = fixture_tree();
    bin()
        .arg("-d")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("c\t"))
        .stdout(predicate::str::contains("python\t"))
        .stdout(predicate::str::contains("clearsilver_template\t"));
}

#[test]
fn annotate_prefixes_each_line() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.c"), "// c\nint x;\n").unwrap();
    bin()
        .arg("--annotate")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("c\tline-comment\t// c"))
        .stdout(predicate::str::contains("c\tline-code\tint x;"));
}

#[test]
fn raw_entities_lists_spans() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.c"), "int x = 1; // c\n").unwrap();
    bin()
        .arg("-e")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\tkeyword\t"))
        .stdout(predicate::str::contains("\tcomment\t"));
}

#[test]
fn licenses_report() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("lib.c"),
        "/* Permission is hereby granted, free of charge */\nint x;\n",
    )
    .unwrap();
    bin()
        .arg("-l")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("mit\t"));
}

#[test]
fn gestalt_report() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("CMakeLists.txt"), "project(t)\n").unwrap();
    fs::write(dir.path().join("main.c"), "#include <unistd.h>\nint main;\n").unwrap();
    bin()
        .arg("-g")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("cmake"))
        .stdout(predicate::str::contains("posix"));
}

#[test]
fn conflicting_reports_exit_1() {
    let dir = fixture_tree();
    bin()
        .args(["-s", "-d"])
        .arg(dir.path())
        .assert()
        .failure()
        .code(1);
}

#[test]
fn unknown_option_exits_1() {
    bin().arg("--no-such-option").assert().failure().code(1);
}

#[test]
fn binary_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("blob.bin"), [0u8, 1, 2, 3]).unwrap();
    fs::write(dir.path().join("a.c"), "int x;\n").unwrap();
    bin()
        .arg("-d")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("blob.bin").not());
}
