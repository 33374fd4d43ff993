use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn processes_directives_from_a_file() {
    let dir = tempdir().unwrap();
    let made = dir.path().join("made");
    let target = dir.path().join("out.txt");
    let input = dir.path().join("input.src");
    fs::write(
        &input,
        format!(
            "#!%{}\n#!+{}:hello\nplain content\n",
            made.display(),
            target.display()
        ),
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("sourcery");
    cmd.arg(input.to_str().unwrap());

    let output_pred = predicate::str::contains("Directory was created at")
        .and(predicate::str::contains("was created."));
    cmd.assert().success().stdout(output_pred);

    assert!(made.is_dir());
    assert_eq!(fs::read_to_string(&target).unwrap(), "hello\n");
}

#[test]
fn inspect_lists_without_executing() {
    let dir = tempdir().unwrap();
    let made = dir.path().join("made");
    let input = dir.path().join("input.src");
    fs::write(&input, format!("#!%{}\n", made.display())).unwrap();

    let mut cmd = cargo_bin_cmd!("sourcery");
    cmd.arg("--inspect").arg(input.to_str().unwrap());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("make-directory"));

    assert!(!made.exists());
}

#[test]
fn json_report_format() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("out.txt");
    let input = dir.path().join("input.src");
    fs::write(&input, format!("#!+{}:payload\n", target.display())).unwrap();

    let mut cmd = cargo_bin_cmd!("sourcery");
    cmd.arg("--format").arg("json").arg(input.to_str().unwrap());

    let output_pred = predicate::str::contains("\"kind\": \"file-created\"")
        .and(predicate::str::contains("\"lines\": 1"));
    cmd.assert().success().stdout(output_pred);
}

#[test]
fn recursive_flag_reaches_nested_files() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();
    let target = dir.path().join("out.txt");
    fs::write(
        nested.join("deep.src"),
        format!("#!+{}:from below\n", target.display()),
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("sourcery");
    cmd.arg("-r").arg(dir.path().to_str().unwrap());
    cmd.assert().success();

    assert_eq!(fs::read_to_string(&target).unwrap(), "from below\n");
}

#[test]
fn missing_input_file_fails_with_a_diagnostic() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("not-there.src");

    let mut cmd = cargo_bin_cmd!("sourcery");
    cmd.arg(missing.to_str().unwrap());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unable to open the file"));
}

#[test]
fn no_arguments_prints_usage() {
    let mut cmd = cargo_bin_cmd!("sourcery");
    cmd.assert().failure();
}
