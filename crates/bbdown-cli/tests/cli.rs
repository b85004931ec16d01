use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_converts_stdin() {
    let mut cmd = cargo_bin_cmd!("bbdown");
    cmd.write_stdin("[b]bold[/b] and [url=http://x.com]link[/url]");

    cmd.assert()
        .success()
        .stdout("**bold** and [link](http://x.com)");
}

#[test]
fn test_converts_file_to_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("post.bbcode");
    let output = dir.path().join("post.md");
    fs::write(&input, "[code=shell]ls -l[/code]").unwrap();

    let mut cmd = cargo_bin_cmd!("bbdown");
    cmd.arg(&input).arg("-o").arg(&output);
    cmd.assert().success().stdout("");

    assert_eq!(fs::read_to_string(&output).unwrap(), "\n```sh\nls -l\n```\n");
}

#[test]
fn test_dash_reads_stdin() {
    let mut cmd = cargo_bin_cmd!("bbdown");
    cmd.arg("-").write_stdin("[list][*]a[*]b[/list]");

    cmd.assert().success().stdout("\n- a\n- b\n\n");
}

#[test]
fn test_list_rules() {
    let mut cmd = cargo_bin_cmd!("bbdown");
    cmd.arg("--list-rules");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("removeColor\n"))
        .stdout(predicate::str::ends_with("replaceSnippets\n"));
}

#[test]
fn test_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bbdown.toml");
    fs::write(
        &config,
        "[markdown]\nbullet_list_marker = \"*\"\n\n[markdown.language_aliases]\njs = \"javascript\"\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("bbdown");
    cmd.arg("--config")
        .arg(&config)
        .write_stdin("[list][*]a[/list][code=js]x()[/code]");

    cmd.assert()
        .success()
        .stdout("\n* a\n\n\n```javascript\nx()\n```\n");
}

#[test]
fn test_set_override() {
    let mut cmd = cargo_bin_cmd!("bbdown");
    cmd.arg("--set")
        .arg("markdown.strong_delimiter=__")
        .write_stdin("[b]x[/b]");

    cmd.assert().success().stdout("__x__");
}

#[test]
fn test_invalid_set_value() {
    let mut cmd = cargo_bin_cmd!("bbdown");
    cmd.arg("--set").arg("nonsense").write_stdin("x");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}

#[test]
fn test_missing_input_file() {
    let mut cmd = cargo_bin_cmd!("bbdown");
    cmd.arg("does-not-exist.bbcode");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read does-not-exist.bbcode"));
}
