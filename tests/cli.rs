use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run(bin: &str, args: &[&str]) -> Output {
    Command::new(bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_list(dir: &Path, name: &str, terms: &[&str]) -> String {
    let path = dir.join(name);
    fs::write(&path, terms.join("\n") + "\n").unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_wldownload_refuses_existing_file() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("en_wordlist.combined.gz");
    fs::write(&target, b"keep me").unwrap();

    let output = run(
        env!("CARGO_BIN_EXE_wldownload"),
        &["-o", dir.path().to_str().unwrap()],
    );

    assert_eq!(output.status.code(), Some(73));
    assert_eq!(fs::read(&target).unwrap(), b"keep me");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("File exists"));
    assert!(!stderr.contains('\x1b'));
}

#[test]
fn test_wldownload_refuses_existing_extract_target() {
    let dir = TempDir::new().unwrap();
    let words = dir.path().join("de_wordlist.txt");
    fs::write(&words, b"keep me").unwrap();

    let output = run(
        env!("CARGO_BIN_EXE_wldownload"),
        &["--lang", "de", "--extract", "-o", dir.path().to_str().unwrap()],
    );

    assert_eq!(output.status.code(), Some(73));
    assert_eq!(fs::read(&words).unwrap(), b"keep me");
    assert!(!dir.path().join("de_wordlist.combined.gz").exists());
}

#[test]
fn test_wlflakes_exit_codes() {
    let dir = TempDir::new().unwrap();
    let flaky = write_list(dir.path(), "flaky.txt", &["sun", "rise", "sunrise", "sun"]);
    let clean = write_list(
        dir.path(),
        "clean.txt",
        &["ape", "bee", "cat", "dog", "eel", "fox"],
    );

    let output = run(env!("CARGO_BIN_EXE_wlflakes"), &[&flaky]);
    assert_eq!(output.status.code(), Some(1));

    let output = run(env!("CARGO_BIN_EXE_wlflakes"), &[&clean]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("No flakes found"));
}

#[test]
fn test_wlflakes_quiet_and_dice_sides() {
    let dir = TempDir::new().unwrap();
    let flaky = write_list(dir.path(), "flaky.txt", &["sun", "rise", "sunrise", "sun"]);
    let coins = write_list(
        dir.path(),
        "coins.txt",
        &["11\tape", "12\tbee", "21\tcat", "22\tdog"],
    );

    let output = run(env!("CARGO_BIN_EXE_wlflakes"), &["-q", &flaky]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "duplicate: sun\nprefix: sun -> sunrise\nnot uniquely decodable\n"
    );

    let output = run(env!("CARGO_BIN_EXE_wlflakes"), &["-d", "2", &coins]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("2 dice, 2 sides"));
}

#[test]
fn test_diceware_list_fails_without_sources() {
    let output = run(env!("CARGO_BIN_EXE_diceware-list"), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_diceware_list_fails_with_too_few_terms() {
    let dir = TempDir::new().unwrap();
    let list = write_list(dir.path(), "short.txt", &["ape", "bee"]);

    let output = run(env!("CARGO_BIN_EXE_diceware-list"), &["-n", "5", &list]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_diceware_list_writes_numbered_list() {
    let dir = TempDir::new().unwrap();
    let list = write_list(dir.path(), "words.txt", &["dog", "cat", "bee", "ape", "eel"]);

    let output = run(
        env!("CARGO_BIN_EXE_diceware-list"),
        &["-n", "4", "-d", "2", "--no-shuffle", &list],
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "11\tape\n12\tbee\n21\tcat\n22\tdog\n"
    );
}
