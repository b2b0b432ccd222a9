use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_luastub")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Run against the `computer` fixtures with the temp dir as working directory
/// and project root, so `@source` paths come out as written in the models.
fn generate(dir: &TempDir) -> assert_cmd::assert::Assert {
    cmd()
        .current_dir(dir.path())
        .args(["-d", "out", "--project-root", "."])
        .arg(fixture_path("computer"))
        .assert()
}

fn read(dir: &TempDir, name: &str) -> String {
    std::fs::read_to_string(dir.path().join("out").join(name)).unwrap()
}

// -- output --

#[test]
fn module_stub_matches_expected() {
    let dir = TempDir::new().unwrap();
    generate(&dir).success().stderr(predicate::str::is_empty());

    let expected = std::fs::read_to_string(fixture_path("os.expected.lua")).unwrap();
    assert_eq!(read(&dir, "os.lua"), expected);
}

#[test]
fn peripheral_stub_includes_inherited_functions() {
    let dir = TempDir::new().unwrap();
    generate(&dir).success();

    let drive = read(&dir, "drive.lua");
    assert!(drive.contains("@module[kind=peripheral] drive\n]]\n"));
    assert!(drive.contains("function ejectDisk() end\n"));
    assert!(drive.contains("function isDiskPresent() end\n"));

    // The override on the drive replaces the inherited function.
    assert_eq!(drive.matches("function getDiskLabel() end").count(), 1);
    assert!(drive.contains("--[[- The label of the disk.\n Empty for audio discs.\n"));

    let own = drive.find("function ejectDisk").unwrap();
    let inherited = drive.find("function isDiskPresent").unwrap();
    assert!(own < inherited);
}

#[test]
fn auxiliary_type_stub() {
    let dir = TempDir::new().unwrap();
    generate(&dir).success();

    let handle = read(&dir, "fs.ReadHandle.lua");
    assert!(handle.starts_with("--- @module fs\n\n--[[- A file opened for reading.\n"));
    assert!(handle.contains("@type ReadHandle\n]]\nlocal ReadHandle = {}\n"));
    assert!(handle.contains("@tparam[opt] boolean withTrailing\n@treturn string|nil\n]]\n"));
    assert!(handle.contains("function ReadHandle.readLine(withTrailing) end\n"));
}

#[test]
fn hidden_modules_are_not_written() {
    let dir = TempDir::new().unwrap();
    generate(&dir).success();

    assert!(!dir.path().join("out/term.lua").exists());
    let mut written: Vec<_> = std::fs::read_dir(dir.path().join("out"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    written.sort();
    assert_eq!(written, ["drive.lua", "fs.ReadHandle.lua", "os.lua"]);
}

#[test]
fn glob_inputs() {
    let dir = TempDir::new().unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["-d", "out"])
        .arg(fixture_path("computer/api*.json"))
        .assert()
        .success();

    assert!(dir.path().join("out/os.lua").exists());
    assert!(!dir.path().join("out/drive.lua").exists());
}

// -- diagnostics and exit status --

#[test]
fn errors_fail_the_run_but_stubs_are_written() {
    let dir = TempDir::new().unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["-d", "out"])
        .arg(fixture_path("broken/broken.json"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "error: Cannot resolve reference. (in reference) [example.FooAPI#bar]",
        ));

    let foo = read(&dir, "foo.lua");
    assert!(foo.contains("--[[- Like Missing#thing.\n"));
}

#[test]
fn unknown_capability_names_change_classification() {
    let dir = TempDir::new().unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["-d", "out", "--peripheral", "example.NotAPeripheral"])
        .arg(fixture_path("computer/peripherals.json"))
        .assert()
        .success();

    // Without the capability the drive is an auxiliary type named `drive`.
    let drive = read(&dir, "drive.lua");
    assert!(drive.starts_with("--- @module drive\n\n"));
    assert!(drive.contains("function drive.ejectDisk() end\n"));
}

#[test]
fn malformed_model_is_fatal() {
    let dir = TempDir::new().unwrap();
    let model = dir.path().join("bad.json");
    std::fs::write(&model, "{ \"types\": [").unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["-d", "out"])
        .arg(model.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid declaration model"));
}

#[test]
fn missing_inputs_are_fatal() {
    let dir = TempDir::new().unwrap();
    cmd()
        .current_dir(dir.path())
        .arg("nothing/*.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no declaration models given"));
}

#[test]
fn title_options_are_accepted() {
    let dir = TempDir::new().unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["-d", "out", "--doctitle", "CC", "--windowtitle", "CC"])
        .arg(fixture_path("computer"))
        .assert()
        .success();
}

#[test]
fn help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--project-root"));
}
