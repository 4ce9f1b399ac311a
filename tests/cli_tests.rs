//! CLI behavior tests for the probe-screen binary.

use assert_cmd::Command;
use predicates::prelude::*;

const PROBE: &str = "ACGTACGTACGTACGTACGT";
const TABULAR_LINE: &str = "Q1\tACC1\t95.0\t20\t1\t0\t1\t20\t1\t20\t0.001\t40.0\n";

fn write_results(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn screen_includes_hit_above_identity_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_results(&dir, "results.tsv", TABULAR_LINE);

    Command::cargo_bin("probe-screen")
        .unwrap()
        .arg("screen")
        .arg(&path)
        .args(["--probe", PROBE, "--min-identity", "90"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ACC1"))
        .stdout(predicate::str::contains("Index"));
}

#[test]
fn screen_renders_no_hits_above_stricter_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_results(&dir, "results.tsv", TABULAR_LINE);

    Command::cargo_bin("probe-screen")
        .unwrap()
        .arg("screen")
        .arg(&path)
        .args(["--probe", PROBE, "--min-identity", "98"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No hits found."));
}

#[test]
fn screen_reads_stdin() {
    Command::cargo_bin("probe-screen")
        .unwrap()
        .args(["screen", "-", "--probe", PROBE, "--min-identity", "90"])
        .write_stdin(TABULAR_LINE)
        .assert()
        .success()
        .stdout(predicate::str::contains("ACC1"));
}

#[test]
fn screen_tsv_output_is_the_export_encoding() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_results(&dir, "results.tsv", TABULAR_LINE);

    Command::cargo_bin("probe-screen")
        .unwrap()
        .arg("screen")
        .arg(&path)
        .args(["--probe", PROBE, "--min-identity", "90", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Index\tName\tAccession\tMismatch\tAlignment\n",
        ))
        .stdout(predicate::str::contains("1\t\tACC1\t1\t"));
}

#[test]
fn screen_rejects_invalid_probe() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_results(&dir, "results.tsv", TABULAR_LINE);

    Command::cargo_bin("probe-screen")
        .unwrap()
        .arg("screen")
        .arg(&path)
        .args(["--probe", "ACGU", "--min-identity", "90"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid base 'U'"));
}

#[test]
fn screen_rejects_conflicting_stringency_options() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_results(&dir, "results.tsv", TABULAR_LINE);

    Command::cargo_bin("probe-screen")
        .unwrap()
        .arg("screen")
        .arg(&path)
        .args(["--probe", PROBE, "--min-identity", "90", "--max-mismatch", "3"])
        .assert()
        .failure();
}

#[test]
fn screen_rejects_out_of_range_identity_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_results(&dir, "results.tsv", TABULAR_LINE);

    Command::cargo_bin("probe-screen")
        .unwrap()
        .arg("screen")
        .arg(&path)
        .args(["--probe", PROBE, "--min-identity", "120"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 0 and 100"));
}

#[test]
fn screen_fails_on_unrecognized_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_results(&dir, "results.xml", "<html><body>not blast</body></html>");

    Command::cargo_bin("probe-screen")
        .unwrap()
        .arg("screen")
        .arg(&path)
        .args(["--probe", PROBE, "--min-identity", "90", "--input-format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognized alignment document"));
}

#[test]
fn screen_saves_export_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_results(&dir, "results.tsv", TABULAR_LINE);
    let export_dir = dir.path().join("exports");

    Command::cargo_bin("probe-screen")
        .unwrap()
        .arg("screen")
        .arg(&path)
        .args(["--probe", PROBE, "--min-identity", "90", "--save-export"])
        .arg(&export_dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("Export written to"));

    let stored: Vec<_> = std::fs::read_dir(&export_dir).unwrap().collect();
    assert_eq!(stored.len(), 1);
    let name = stored[0].as_ref().unwrap().file_name();
    assert!(name
        .to_string_lossy()
        .starts_with("probe_screen_results_9606_"));
}

#[test]
fn export_stores_validated_text() {
    let dir = tempfile::tempdir().unwrap();
    let text = "Index\tName\tAccession\tMismatch\tAlignment\n1\tABC1\tNM_0001.1\t0\t\n";
    let path = write_results(&dir, "export.tsv", text);
    let out_dir = dir.path().join("downloads");

    Command::cargo_bin("probe-screen")
        .unwrap()
        .arg("export")
        .arg(&path)
        .args(["--taxid", "9606", "--out-dir"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Stored 1 rows"));

    // Stored file is byte-identical to the input
    let stored = std::fs::read_dir(&out_dir).unwrap().next().unwrap().unwrap();
    assert_eq!(std::fs::read_to_string(stored.path()).unwrap(), text);
}

#[test]
fn export_of_empty_text_is_nothing_to_download() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_results(&dir, "export.tsv", "");

    Command::cargo_bin("probe-screen")
        .unwrap()
        .arg("export")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to download."));
}

#[test]
fn export_rejects_foreign_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_results(&dir, "export.tsv", "not\tan\texport\n");

    Command::cargo_bin("probe-screen")
        .unwrap()
        .arg("export")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed validation"));
}
