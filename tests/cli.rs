//! CLI tests: argument resolution, help, and files written to disk.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("randimg").unwrap();
    cmd.env("RANDIMG_CONFIG", "/nonexistent/randimg.toml").env_remove("RANDIMG_LOG");
    cmd
}

fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn unknown_argument_exits_with_help() {
    cmd()
        .args(["width:20", "bogus:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown arguments provided: bogus:1"))
        .stderr(predicate::str::contains("Please provide a properly formatted set of arguments"));
}

#[test]
fn invalid_format_exits_with_error() {
    cmd()
        .args(["format:image/gif"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format: image/gif"));
}

#[test]
fn help_token_prints_help_and_generates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["help", "total:3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Please provide a properly formatted set of arguments"));
    assert!(files_in(dir.path()).is_empty());
}

#[test]
fn verbose_flag_after_tokens_is_honoured() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["total:1", "-v", "--seed", "5"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown arguments").not())
        .stderr(predicate::str::contains("DEBUG"));
    assert_eq!(files_in(dir.path()), vec!["random-image-100-100-0.jpg"]);
}

#[test]
fn unknown_generator_exits_with_error() {
    cmd()
        .args(["-g", "sparkles", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown generator 'sparkles'"));
}

#[test]
fn list_prints_catalog() {
    cmd()
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("noise"))
        .stdout(predicate::str::contains("circles"));
}

#[test]
fn default_run_writes_five_jpegs_in_working_folder() {
    let dir = tempfile::tempdir().unwrap();
    cmd().current_dir(dir.path()).args(["--seed", "1"]).assert().success();

    let expected: Vec<String> =
        (0..5).map(|serial| format!("random-image-100-100-{serial}.jpg")).collect();
    assert_eq!(files_in(dir.path()), expected);
}

#[test]
fn tokens_control_count_size_format_and_names() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out");

    cmd()
        .args([
            "--seed".to_string(),
            "3".to_string(),
            "2".to_string(),
            "width:40".to_string(),
            "HEIGHT:20000".to_string(),
            "format:IMAGE/PNG".to_string(),
            "template:pic-{serial}-{width}x{height}".to_string(),
            format!("output:{}", target.display()),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved:"));

    assert_eq!(files_in(&target), vec!["pic-0-40x10000.png", "pic-1-40x10000.png"]);
    let decoded = image::open(target.join("pic-1-40x10000.png")).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (40, 10_000));
}

#[test]
fn composite_names_list_every_generator() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["-c", "-g", "gradient", "-g", "circles", "total:1", "template:{generator}-{serial}", "width:8", "height:8"])
        .assert()
        .success();
    assert_eq!(files_in(dir.path()), vec!["gradient+circles-0.jpg"]);
}

#[test]
fn zero_total_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    cmd().current_dir(dir.path()).args(["total:0"]).assert().success();
    assert!(files_in(dir.path()).is_empty());
}

#[test]
fn page_mode_embeds_images() {
    let dir = tempfile::tempdir().unwrap();
    let page = dir.path().join("page.html");
    let controls = dir.path().join("form.json");
    std::fs::write(
        &controls,
        r#"{"width": 16, "height": 16, "amount": 3, "mode": "specific", "generators": ["stripes", "noise"]}"#,
    )
    .unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["--page", page.to_str().unwrap(), "--controls", controls.to_str().unwrap(), "format:image/png"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Page written:"));

    let html = std::fs::read_to_string(&page).unwrap();
    assert_eq!(html.matches("data:image/png;base64,").count(), 3);
    assert!(html.contains("stripes, noise"));
    assert_eq!(files_in(dir.path()), vec!["form.json", "page.html"]);
}

#[test]
fn config_file_selects_generators() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("randimg.toml");
    std::fs::write(&config, "[defaults]\ngenerators = [\"checkers\"]\nseed = 5\n").unwrap();

    cmd()
        .current_dir(dir.path())
        .env("RANDIMG_CONFIG", config.to_str().unwrap())
        .args(["1", "template:{generator}"])
        .assert()
        .success();
    assert_eq!(files_in(dir.path()), vec!["checkers.jpg", "randimg.toml"]);
}
