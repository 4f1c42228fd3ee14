use assert_cmd::Command;
use tempfile::tempdir;

fn namespace_sandbox_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_namespace-sandbox"))
}

#[test]
fn exits_successfully_without_output() {
    namespace_sandbox_command()
        .assert()
        .code(0)
        .stdout("")
        .stderr("");
}

#[test]
fn ignores_arguments_and_stdin() {
    namespace_sandbox_command()
        .args(["-l", "/dev/null", "--", "/bin/false"])
        .write_stdin("unused input\n")
        .assert()
        .success()
        .stdout("")
        .stderr("");
}

#[test]
fn leaves_working_directory_untouched() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    namespace_sandbox_command()
        .env_clear()
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout("")
        .stderr("");
    assert_eq!(std::fs::read_dir(tmp.path())?.count(), 0);
    Ok(())
}
