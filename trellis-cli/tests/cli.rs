use assert_cmd::Command;
use predicates::prelude::*;
use trellis_test::{
    CRITICALITY_SCORE, CRITICALITY_SCORE_NO_REPO, SPDX, TestInputs, fixture_path,
};

fn trellis() -> Command {
    Command::cargo_bin("trellis").unwrap()
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// ── classify ─────────────────────────────────────────────────────

#[test]
fn classify_prints_path_and_type() {
    let score = fixture_path("criticality_score.json");
    let spdx = fixture_path("spdx.json");

    trellis()
        .arg("classify")
        .arg(&score)
        .arg(&spdx)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "{}\tcriticality_score",
            score.display()
        )))
        .stdout(predicate::str::contains(format!("{}\tunknown", spdx.display())));
}

#[test]
fn classify_non_json_format_is_unknown() {
    trellis()
        .args(["classify", "--format", "xml"])
        .arg(fixture_path("criticality_score.json"))
        .assert()
        .success()
        .stdout(predicate::str::ends_with("\tunknown\n"));
}

#[test]
fn classify_rejects_unknown_format_name() {
    trellis()
        .args(["classify", "--format", "yaml"])
        .arg(fixture_path("criticality_score.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: yaml"));
}

#[test]
fn classify_missing_file_exits_3() {
    trellis()
        .args(["classify", "/nonexistent/trellis/input.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Cannot read input"));
}

// ── ingest ───────────────────────────────────────────────────────

#[test]
fn ingest_reference_document() {
    let output = trellis()
        .arg("ingest")
        .arg(fixture_path("criticality_score.json"))
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let bundles = stdout_json(&output);
    let bundle = &bundles[0];
    assert_eq!(bundles.as_array().unwrap().len(), 1);
    assert_eq!(bundle["nodes"][0]["kind"], "Metadata");
    assert_eq!(bundle["nodes"][0]["id"], "github.com/org/repo:Apache License 2.0");
    assert_eq!(bundle["nodes"][0]["details"]["score"], 2.627);
    assert_eq!(
        bundle["nodes"][1],
        serde_json::json!({"kind": "Artifact", "name": "git+https://github.com/org/repo"})
    );
    assert_eq!(bundle["edges"][0]["kind"], "MetadataFor");
    assert_eq!(
        bundle["identifiers"]["vcs_strings"],
        serde_json::json!(["git+https://github.com/org/repo"])
    );
}

#[test]
fn ingest_pretty_output_is_multiline() {
    trellis()
        .args(["ingest", "--pretty"])
        .arg(fixture_path("criticality_score.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  {\n"));
}

#[test]
fn ingest_partial_failure_exits_10() {
    let output = trellis()
        .arg("ingest")
        .arg(fixture_path("criticality_score.json"))
        .arg(fixture_path("spdx.json"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(10));
    assert_eq!(stdout_json(&output).as_array().unwrap().len(), 1);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1 of 2 documents failed"), "{stderr}");
    assert!(stderr.contains("spdx.json"), "{stderr}");
}

#[test]
fn ingest_only_failures_exits_4() {
    trellis()
        .arg("ingest")
        .arg(fixture_path("spdx.json"))
        .assert()
        .code(4)
        .stderr(predicate::str::contains("unable to classify"));
}

#[test]
fn ingest_malformed_declared_document_exits_4() {
    trellis()
        .args(["ingest", "--type", "criticality_score"])
        .arg(fixture_path("malformed.json"))
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Decode error"));
}

#[test]
fn ingest_declared_type_skips_guessing() {
    let inputs = TestInputs::with_files(&[("no_repo.json", CRITICALITY_SCORE_NO_REPO)]);
    let output = trellis()
        .args(["ingest", "--type", "criticality_score"])
        .arg(inputs.file("no_repo.json"))
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout_json(&output)[0]["nodes"][1]["name"], "git+");
}

#[test]
fn ingest_declared_type_without_parser_exits_4() {
    trellis()
        .args(["ingest", "--type", "spdx"])
        .arg(fixture_path("spdx.json"))
        .assert()
        .code(4)
        .stderr(predicate::str::contains("no parser registered"));
}

// ── config ───────────────────────────────────────────────────────

#[test]
fn ingest_invalid_config_exits_2() {
    let inputs = TestInputs::with_files(&[
        ("trellis.toml", "[ingest]\nmax_blob_bytes = 0\n"),
        ("score.json", CRITICALITY_SCORE),
    ]);
    trellis()
        .arg("ingest")
        .arg("--config")
        .arg(inputs.file("trellis.toml"))
        .arg(inputs.file("score.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Cannot load config"));
}

#[test]
fn ingest_missing_config_exits_2() {
    trellis()
        .args(["ingest", "--config", "/nonexistent/trellis.toml"])
        .arg(fixture_path("criticality_score.json"))
        .assert()
        .code(2);
}

#[test]
fn config_size_limit_skips_large_documents() {
    let inputs = TestInputs::with_files(&[
        ("trellis.toml", "[ingest]\nmax_blob_bytes = 16\n"),
        ("score.json", CRITICALITY_SCORE),
        ("spdx.json", SPDX),
    ]);
    trellis()
        .arg("ingest")
        .arg("--config")
        .arg(inputs.file("trellis.toml"))
        .arg(inputs.file("score.json"))
        .arg(inputs.file("spdx.json"))
        .assert()
        .code(4)
        .stderr(predicate::str::contains("exceeds limit of 16 bytes"));
}

#[test]
fn no_subcommand_is_a_usage_error() {
    trellis().assert().failure().stderr(predicate::str::contains("Usage"));
}
