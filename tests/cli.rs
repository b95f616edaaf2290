use assert_cmd::Command;

#[test]
fn missing_domain_exits_with_usage() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::cargo_bin("reconflow")
        .unwrap()
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("Usage: reconflow -d target.com"));
    assert!(stderr.contains("domain is required"));
    // nothing ran: no artifact and no downloaded script
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn blank_domain_counts_as_missing() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("reconflow")
        .unwrap()
        .current_dir(dir.path())
        .args(["-d", "   "])
        .assert()
        .code(1);
}
