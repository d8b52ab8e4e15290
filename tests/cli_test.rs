use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*; // Used for writing assertions
use std::process::{Command,Stdio}; // Run programs
use std::fs::File;
use std::io::Write;
use tempfile::NamedTempFile;

// 10 GOSUB 100
// 20 GOTO 10
// 100 RETURN
const JUMPS: &str = "0a080a00b03130300012081400ab31300018086400b1000000";

fn fixture(hex_str: &str) -> Result<NamedTempFile, Box<dyn std::error::Error>> {
    let mut file = NamedTempFile::new()?;
    file.write_all(&hex::decode(hex_str)?)?;
    Ok(file)
}

#[test]
fn list_file() -> Result<(), Box<dyn std::error::Error>> {
    let prog = fixture(JUMPS)?;
    let mut cmd = Command::cargo_bin("a2list")?;
    cmd.arg("list")
        .arg("--no-header")
        .arg("-f").arg(prog.path())
        .assert()
        .success()
        .stdout("    10  GOSUB 100\n    20  GOTO 10\n   100  RETURN\n");
    Ok(())
}

#[test]
fn list_piped() -> Result<(), Box<dyn std::error::Error>> {
    let prog = fixture(JUMPS)?;
    let mut cmd = Command::cargo_bin("a2list")?;
    cmd.arg("list")
        .arg("-n").arg("JUMPS")
        .stdin(Stdio::from(File::open(prog.path())?))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Name    : JUMPS\nLength  : $0019 (25)\nLoad at : $0801 (2,049)\n"));
    Ok(())
}

#[test]
fn list_with_targets() -> Result<(), Box<dyn std::error::Error>> {
    let prog = fixture(JUMPS)?;
    let mut cmd = Command::cargo_bin("a2list")?;
    cmd.arg("list")
        .arg("--no-header")
        .arg("--targets")
        .arg("--xref")
        .arg("-f").arg(prog.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<<>     10  GOSUB 100\n <--    20  GOTO 10\n-->>   100  RETURN\n"))
        .stdout(predicate::str::contains("GOSUB:\n   100  [10]\n\nGOTO:\n    10  [20]"));
    Ok(())
}

#[test]
fn config_file_and_override() -> Result<(), Box<dyn std::error::Error>> {
    let prog = fixture(JUMPS)?;
    let mut config = NamedTempFile::new()?;
    config.write_all(br#"{"showHeader": false, "showTargets": true}"#)?;
    let mut cmd = Command::cargo_bin("a2list")?;
    cmd.arg("list")
        .arg("--config").arg(config.path())
        .arg("--only-targets")
        .arg("-f").arg(prog.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<<>     10  GOSUB 100\n <--        GOTO 10\n"))
        .stdout(predicate::str::contains("Name").not());
    Ok(())
}

#[test]
fn malformed_config() -> Result<(), Box<dyn std::error::Error>> {
    let prog = fixture(JUMPS)?;
    let mut config = NamedTempFile::new()?;
    config.write_all(b"{showHeader")?;
    let mut cmd = Command::cargo_bin("a2list")?;
    cmd.arg("list")
        .arg("--config").arg(config.path())
        .arg("-f").arg(prog.path())
        .assert()
        .failure();
    Ok(())
}

#[test]
fn missing_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("a2list")?;
    cmd.arg("list")
        .arg("-f").arg("no_such_program.atok")
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not read"));
    Ok(())
}

#[test]
fn empty_input() -> Result<(), Box<dyn std::error::Error>> {
    let prog = fixture("")?;
    let mut cmd = Command::cargo_bin("a2list")?;
    cmd.arg("list")
        .arg("-f").arg(prog.path())
        .assert()
        .failure();
    Ok(())
}

#[test]
fn diagnostics_on_stderr() -> Result<(), Box<dyn std::error::Error>> {
    // 10 IF X:PRINT
    let prog = fixture("0a080a00ad583aba000000")?;
    let mut cmd = Command::cargo_bin("a2list")?;
    cmd.arg("list")
        .arg("--no-header")
        .arg("-f").arg(prog.path())
        .assert()
        .success()
        .stdout("    10  IF X\n          PRINT\n")
        .stderr(predicate::str::contains("IF without THEN or GOTO"));
    Ok(())
}

#[test]
fn dump() -> Result<(), Box<dyn std::error::Error>> {
    let prog = fixture(JUMPS)?;
    let mut cmd = Command::cargo_bin("a2list")?;
    cmd.arg("dump")
        .arg("--no-header")
        .arg("-f").arg(prog.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0801 : 0A 08 0A 00 B0 31 30 30 00 "))
        .stdout(predicate::str::contains("\n\n0818 : 00 00 "));
    Ok(())
}

#[test]
fn xref_json() -> Result<(), Box<dyn std::error::Error>> {
    let prog = fixture(JUMPS)?;
    let mut cmd = Command::cargo_bin("a2list")?;
    let output = cmd.arg("xref")
        .arg("-f").arg(prog.path())
        .output()?;
    assert!(output.status.success());
    let obj: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(obj["gosub"]["100"],serde_json::json!([10]));
    assert_eq!(obj["goto"]["10"],serde_json::json!([20]));
    assert_eq!(obj["strings"],serde_json::json!([]));
    Ok(())
}

#[test]
fn completions() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("a2list")?;
    cmd.arg("completions")
        .arg("-s").arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("a2list"));
    Ok(())
}
