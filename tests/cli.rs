use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn taskmate(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("taskmate").unwrap();
    cmd.current_dir(workdir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn emails_command_writes_sorted_unique_addresses() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("contacts.txt"),
        "contact a@b.co and A@B.CO and a@b.co\nuser@@example.com\n",
    )
    .unwrap();

    taskmate(&dir)
        .args(["emails", "contacts.txt", "emails.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 unique email(s)"));

    assert_eq!(
        fs::read_to_string(dir.path().join("emails.txt")).unwrap(),
        "A@B.CO\na@b.co\n"
    );
}

#[test]
fn emails_command_missing_input() {
    let dir = TempDir::new().unwrap();

    taskmate(&dir)
        .args(["emails", "missing.txt", "emails.txt"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Path does not exist"));

    assert!(!dir.path().join("emails.txt").exists());
}

#[test]
fn move_command_relocates_by_extension() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("camera");
    fs::create_dir(&source).unwrap();
    fs::write(source.join("one.jpg"), "1").unwrap();
    fs::write(source.join("TWO.JPG"), "2").unwrap();
    fs::write(source.join("three.png"), "3").unwrap();

    taskmate(&dir)
        .args(["move", "camera", "photos"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved 2 file(s)"));

    assert!(dir.path().join("photos").join("one.jpg").exists());
    assert!(dir.path().join("photos").join("TWO.JPG").exists());
    assert!(source.join("three.png").exists());
}

#[test]
fn move_command_with_custom_extensions_and_dry_run() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("camera");
    fs::create_dir(&source).unwrap();
    fs::write(source.join("a.png"), "a").unwrap();

    taskmate(&dir)
        .args(["move", "camera", "photos", "--ext", "png", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would move 1 file(s)"));

    assert!(source.join("a.png").exists());
    assert!(!dir.path().join("photos").exists());
}

#[test]
fn move_command_missing_source() {
    let dir = TempDir::new().unwrap();

    taskmate(&dir)
        .args(["move", "nowhere", "photos"])
        .assert()
        .code(3);
}

#[test]
fn title_command_rejects_non_http_url() {
    let dir = TempDir::new().unwrap();

    taskmate(&dir)
        .args(["title", "ftp://example.com", "title.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("only http and https"));
}

#[test]
fn json_output_reports_operation() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("in.txt"), "x@y.io").unwrap();

    taskmate(&dir)
        .args(["--output-format", "json", "emails", "in.txt", "out.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"operation\": \"emails\""))
        .stdout(predicate::str::contains("x@y.io"));
}

#[test]
fn menu_handles_invalid_choice_then_exit() {
    let dir = TempDir::new().unwrap();

    taskmate(&dir)
        .write_stdin("7\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("TASK AUTOMATION MENU"))
        .stdout(predicate::str::contains("Invalid choice. Please enter 1-4."))
        .stdout(predicate::str::contains("Goodbye"));
}

#[test]
fn menu_runs_email_extraction() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("in.txt"), "b@x.io, a@x.io").unwrap();

    taskmate(&dir)
        .arg("menu")
        .write_stdin("2\nin.txt\nout.txt\n4\n")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dir.path().join("out.txt")).unwrap(),
        "a@x.io\nb@x.io\n"
    );
}

#[test]
fn generate_config_writes_sample() {
    let dir = TempDir::new().unwrap();

    taskmate(&dir)
        .arg("--generate-config")
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join("taskmate.toml")).unwrap();
    assert!(content.contains("title_fallback = \"No title found\""));
}

#[test]
fn config_file_changes_default_extension() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("taskmate.toml"),
        "[relocate]\nextensions = [\"gif\"]\ncreate_destination = true\noverwrite = false\n\n\
         [fetch]\ntimeout = 5\nuser_agent = \"test\"\nmax_redirects = 3\n\n\
         [output]\ntitle_fallback = \"Untitled\"\ncreate_parent_dirs = true\n",
    )
    .unwrap();
    let source = dir.path().join("src");
    fs::create_dir(&source).unwrap();
    fs::write(source.join("anim.gif"), "g").unwrap();
    fs::write(source.join("pic.jpg"), "j").unwrap();

    taskmate(&dir).args(["move", "src", "dst"]).assert().success();

    assert!(dir.path().join("dst").join("anim.gif").exists());
    assert!(source.join("pic.jpg").exists());
}
