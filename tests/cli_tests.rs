mod common;

use common::{copy_fixture, fakegen, scratch_dir};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_source_path_and_interface() {
    let dir = scratch_dir();
    copy_fixture("example.com/store", &dir.path().join("store"));

    fakegen(dir.path())
        .arg("store")
        .arg("Fetcher")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Writing `FakeFetcher` to `store/storefakes/fake_fetcher.go`... Done",
        ));

    let code = fs::read_to_string(dir.path().join("store/storefakes/fake_fetcher.go"))
        .expect("fake written");
    assert!(code.starts_with("// Code generated by fakegen. DO NOT EDIT."));
    assert!(code.contains("package storefakes"));
    assert!(code.contains("\t\"example.com/store\"\n"));
    assert!(code.contains("func (fake *FakeFetcher) Fetch(arg1 string) (string, error) {"));
    assert!(code.contains("var _ store.Fetcher = new(FakeFetcher)"));
}

#[test]
fn test_qualified_interface_with_explicit_output() {
    let dir = scratch_dir();

    fakegen(dir.path())
        .args(["-o", "fakes/fetcher.go", "example.com/store.Fetcher"])
        .assert()
        .success()
        .stdout(predicate::str::contains("`fakes/fetcher.go`"));

    let code = fs::read_to_string(dir.path().join("fakes/fetcher.go")).expect("fake written");
    assert!(code.contains("package fakes\n"));
}

#[test]
fn test_default_output_uses_working_directory_name() {
    let dir = scratch_dir();
    let base = dir
        .path()
        .file_name()
        .expect("temp dir name")
        .to_string_lossy()
        .into_owned();

    fakegen(dir.path())
        .args(["--fake-name", "coolThing", "example.com/store.Fetcher"])
        .assert()
        .success();

    let output = dir
        .path()
        .join(format!("{}fakes", base))
        .join("cool_thing.go");
    let code = fs::read_to_string(output).expect("fake written");
    assert!(code.contains("type coolThing struct {"));
}

#[test]
fn test_print_to_stdout() {
    let dir = scratch_dir();

    fakegen(dir.path())
        .args(["example.com/store.Store", "-"])
        .assert()
        .success()
        .stdout(predicate::str::contains("type FakeStore struct {"))
        .stdout(predicate::str::contains(
            "\tPutStub func(context.Context, []byte, ...store.Option) error\n",
        ))
        .stdout(predicate::str::contains("\tGetStub func(context.Context, string) (*model.Item, error)\n"))
        .stdout(predicate::str::contains("func (fake *FakeStore) CloseCallCount() int {"))
        .stdout(predicate::str::contains("Writing").not())
        .stderr(predicate::str::contains("Writing `FakeStore`"))
        .stderr(predicate::str::contains("Done"));

    assert_eq!(fs::read_dir(dir.path()).expect("read dir").count(), 0);
}

#[test]
fn test_function_type() {
    let dir = scratch_dir();

    fakegen(dir.path())
        .args(["example.com/calc.Add", "-"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "func (fake *FakeAdd) Spy(arg1 int, arg2 int) int {",
        ))
        .stdout(predicate::str::contains("var _ calc.Add = new(FakeAdd).Spy"));
}

#[test]
fn test_module_shim() {
    let dir = scratch_dir();

    fakegen(dir.path())
        .args(["-p", "example.com/calc"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Writing `FakeCalc` to `calcshim/calc.go`... Done",
        ));

    let code = fs::read_to_string(dir.path().join("calcshim/calc.go")).expect("shim written");
    assert!(code.contains("package calcshim\n"));
    assert!(code.contains("type Calc interface {\n\tSum(arg1 ...int) int\n\tReset()\n}"));
    assert!(code.contains("\treturn calc.Sum(arg1...)\n"));
    assert!(code.contains("var _ Calc = new(CalcShim)"));
    assert!(code.contains("var _ Calc = new(FakeCalc)"));
    assert!(!code.contains("round"));
}

#[test]
fn test_missing_target() {
    let dir = scratch_dir();

    fakegen(dir.path())
        .arg("example.com/store.Missing")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "cannot find Missing in module example.com/store",
        ));
}

#[test]
fn test_unsupported_target_kind() {
    let dir = scratch_dir();

    fakegen(dir.path())
        .arg("example.com/store.Config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("because it is a struct"));
}

#[test]
fn test_module_with_diagnostics() {
    let dir = scratch_dir();

    fakegen(dir.path())
        .arg("example.com/broken.Widget")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "failed to load module example.com/broken: 2 errors",
        ))
        .stderr(predicate::str::contains("undefined: Widget"));
}

#[test]
fn test_extra_diagnostics_are_logged_as_warnings() {
    let dir = scratch_dir();

    let output = fakegen(dir.path())
        .env("FAKEGEN_DEBUG", "1")
        .arg("example.com/broken.Widget")
        .assert()
        .failure()
        .get_output()
        .clone();
    let stderr = String::from_utf8_lossy(&output.stderr);
    let warnings: Vec<&str> = stderr.lines().filter(|l| l.contains("WARN")).collect();

    assert_eq!(warnings.len(), 1, "{}", stderr);
    assert!(warnings[0].contains("undefined: Widget"));
    assert!(!warnings[0].contains("expected declaration"));
}

#[test]
fn test_missing_source_path() {
    let dir = scratch_dir();

    fakegen(dir.path())
        .args(["nowhere", "Fetcher"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such file/directory/module"));
}

#[test]
fn test_debug_logging() {
    let dir = scratch_dir();

    fakegen(dir.path())
        .env("FAKEGEN_DEBUG", "1")
        .args(["example.com/store.Fetcher", "-"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Writing fake FakeFetcher for interface Fetcher",
        ));
}

#[test]
fn test_requires_an_argument() {
    let dir = scratch_dir();
    fakegen(dir.path()).assert().failure();
}
