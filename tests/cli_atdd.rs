#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PROJECT: &str = r#"
id = "p1"
name = "Project 1"

[[grade_components]]
name = "Tests"
points = 10

[[grade_components]]
name = "Style"
points = 5
"#;

fn workspace() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("temp dir should be created");
    let project = dir.path().join("project.toml");
    fs::write(&project, PROJECT).expect("project file should write");
    (dir, project)
}

fn rubric(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rubric").expect("binary should compile");
    cmd.current_dir(dir).env("HOME", dir).env_remove("RUST_LOG");
    cmd
}

fn graded_rubric(tests: &str, style: &str, total: &str) -> String {
    format!(
        "Points:\n    Tests:\n        Points Possible: 10\n        Points Obtained: {tests}\n\n    Style:\n        Points Possible: 5\n        Points Obtained: {style}\n\nTotal Points: {total}\n"
    )
}

#[test]
fn create_prints_fresh_rubric_to_stdout() {
    let (dir, project) = workspace();

    rubric(dir.path())
        .arg("create")
        .arg("--project")
        .arg(&project)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("    Tests:\n        Points Possible: 10\n        Points Obtained:\n"))
        .stdout(predicate::str::contains("Total Points: 0 / 15"));
}

#[test]
fn create_with_grades_and_penalty_writes_valid_rubric() {
    let (dir, project) = workspace();
    let grades = dir.path().join("grades.toml");
    fs::write(&grades, "team = \"team-a\"\n\n[grades]\nTests = 9\nStyle = 4.5\n")
        .expect("grades file should write");
    let output = dir.path().join("team-a.yaml");

    rubric(dir.path())
        .arg("create")
        .arg("--project")
        .arg(&project)
        .arg("--grades")
        .arg(&grades)
        .arg("--penalty")
        .arg("Late submission=-2")
        .arg("--comment")
        .arg("Good job.")
        .arg("--output")
        .arg(&output)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("rubric written"));

    let written = fs::read_to_string(&output).expect("rubric should be written");
    assert!(written.contains("Penalties:\n    Late submission: -2\n"));
    assert!(written.contains("Total Points: 11.5 / 15\n"));
    assert!(written.ends_with("Comments: >\n    Good job.\n"));

    rubric(dir.path())
        .arg("check")
        .arg(&output)
        .arg("--project")
        .arg(&project)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("ok:"))
        .stdout(predicate::str::contains("(11.5 / 15)"));
}

#[test]
fn create_rejects_non_negative_penalty() {
    let (dir, project) = workspace();

    rubric(dir.path())
        .arg("create")
        .arg("--project")
        .arg(&project)
        .arg("--penalty")
        .arg("Late=5")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("non-negative penalty"));
}

#[test]
fn create_rejects_grades_for_unknown_component() {
    let (dir, project) = workspace();
    let grades = dir.path().join("grades.toml");
    fs::write(&grades, "[grades]\nDocs = 1\n").expect("grades file should write");

    rubric(dir.path())
        .arg("create")
        .arg("--project")
        .arg(&project)
        .arg("--grades")
        .arg(&grades)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not part of the project: 'Docs'"));
}

#[test]
fn check_directory_reports_each_file_and_fails_on_invalid() {
    let (dir, project) = workspace();
    let rubrics = dir.path().join("rubrics");
    fs::create_dir_all(&rubrics).expect("rubrics dir should create");
    fs::write(rubrics.join("team-a.yaml"), graded_rubric("8", "5", "13 / 15"))
        .expect("rubric should write");
    fs::write(
        rubrics.join("team-b.yaml"),
        graded_rubric("8", "5", "13 / 15").replace("Points Possible: 10", "Points Possible: 20"),
    )
    .expect("rubric should write");
    fs::write(rubrics.join("README.md"), "not a rubric").expect("readme should write");

    rubric(dir.path())
        .arg("check")
        .arg(&rubrics)
        .arg("--project")
        .arg(&project)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("ok:"))
        .stdout(predicate::str::contains("team-a.yaml (13 / 15)"))
        .stdout(predicate::str::contains("invalid:"))
        .stdout(predicate::str::contains("incorrect possible points (expected 10, got 20)"))
        .stdout(predicate::str::contains("checked 2 rubric(s): 1 invalid, 0 ungraded"));
}

#[test]
fn check_warns_on_ungraded_components() {
    let (dir, project) = workspace();
    let file = dir.path().join("team-a.yaml");
    fs::write(&file, graded_rubric("8", "", "8 / 15")).expect("rubric should write");

    rubric(dir.path())
        .arg("check")
        .arg(&file)
        .arg("--project")
        .arg(&project)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("ungraded:"))
        .stdout(predicate::str::contains("missing Style"));
}

#[test]
fn check_rejects_total_mismatch() {
    let (dir, project) = workspace();
    let file = dir.path().join("team-a.yaml");
    fs::write(&file, graded_rubric("8", "", "9 / 15")).expect("rubric should write");

    rubric(dir.path())
        .arg("check")
        .arg(&file)
        .arg("--project")
        .arg(&project)
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "incorrect number of total points obtained (expected 8, got 9)",
        ));
}

#[test]
fn check_uses_configured_extension() {
    let (dir, project) = workspace();
    fs::write(dir.path().join("rubric.toml"), "[rubric]\nextension = \"rubric\"\n")
        .expect("settings should write");
    let rubrics = dir.path().join("rubrics");
    fs::create_dir_all(&rubrics).expect("rubrics dir should create");
    fs::write(rubrics.join("team-a.rubric"), graded_rubric("8", "5", "13 / 15"))
        .expect("rubric should write");
    fs::write(rubrics.join("team-b.yaml"), "ignored").expect("file should write");

    rubric(dir.path())
        .arg("check")
        .arg(&rubrics)
        .arg("--project")
        .arg(&project)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("checked 1 rubric(s)"));
}

#[test]
fn show_renders_json_summary() {
    let (dir, project) = workspace();
    let file = dir.path().join("team-a.yaml");
    fs::write(&file, graded_rubric("8", "", "8 / 15")).expect("rubric should write");

    rubric(dir.path())
        .arg("show")
        .arg(&file)
        .arg("--project")
        .arg(&project)
        .arg("--format")
        .arg("json")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"total_points_possible\": 15.0"))
        .stdout(predicate::str::contains("\"ungraded\": [\n    \"Style\"\n  ]"));
}

#[test]
fn show_reports_invalid_rubric_on_stderr() {
    let (dir, project) = workspace();
    let file = dir.path().join("team-a.yaml");
    fs::write(&file, graded_rubric("-1", "5", "4 / 15")).expect("rubric should write");

    rubric(dir.path())
        .arg("show")
        .arg(&file)
        .arg("--project")
        .arg(&project)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid rubric"))
        .stderr(predicate::str::contains("negative points (-1)"));
}

#[test]
fn format_rewrites_to_canonical_form_once() {
    let (dir, project) = workspace();
    let file = dir.path().join("team-a.yaml");
    fs::write(
        &file,
        "Points:\n  Tests:\n    Points Possible: 10\n    Points Obtained: 8\n  Style:\n    Points Possible: 5\n    Points Obtained: 5\nTotal Points: \"13 / 15\"\n",
    )
    .expect("rubric should write");

    rubric(dir.path())
        .arg("format")
        .arg(&file)
        .arg("--project")
        .arg(&project)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("formatted:"));
    assert_eq!(
        fs::read_to_string(&file).expect("rubric should read"),
        graded_rubric("8", "5", "13 / 15")
    );

    rubric(dir.path())
        .arg("format")
        .arg(&file)
        .arg("--project")
        .arg(&project)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("unchanged:"));
}

#[test]
fn project_add_component_updates_project_file() {
    let (dir, project) = workspace();

    rubric(dir.path())
        .args(["project", "add-component"])
        .arg(&project)
        .arg("Docs")
        .arg("2.5")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("added grade component 'Docs' (2.5 points)"));

    rubric(dir.path())
        .args(["project", "show"])
        .arg(&project)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("  Docs: 2.5"))
        .stdout(predicate::str::contains("  Total: 17.5"));
}

#[test]
fn project_add_component_rejects_duplicates_and_negative_points() {
    let (dir, project) = workspace();

    rubric(dir.path())
        .args(["project", "add-component"])
        .arg(&project)
        .arg("Tests")
        .arg("3")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("duplicate grade component"));

    rubric(dir.path())
        .args(["project", "add-component"])
        .arg(&project)
        .arg("Docs")
        .arg("-3")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("non-negative points"));
}

#[test]
fn missing_project_file_is_a_runtime_failure() {
    let dir = TempDir::new().expect("temp dir should be created");

    rubric(dir.path())
        .args(["project", "show", "missing.toml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn project_show_prints_deadline_and_status() {
    let dir = TempDir::new().expect("temp dir should be created");
    let project = dir.path().join("project.toml");
    fs::write(
        &project,
        format!("deadline = \"2020-01-15T17:00:00Z\"\n{PROJECT}"),
    )
    .expect("project file should write");

    rubric(dir.path())
        .env("TZ", "UTC")
        .args(["project", "show", "--utc"])
        .arg(&project)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Project 1 (p1)"))
        .stdout(predicate::str::contains("  Tests: 10"))
        .stdout(predicate::str::contains("  Total: 15"))
        .stdout(predicate::str::contains(
            " Deadline (Local): 2020-01-15 17:00:00 +00:00",
        ))
        .stdout(predicate::str::contains(
            "   Deadline (UTC): 2020-01-15 17:00:00",
        ))
        .stdout(predicate::str::contains("The deadline passed"));
}

#[test]
fn project_show_without_utc_flag_omits_utc_line() {
    let (dir, project) = workspace();

    rubric(dir.path())
        .args(["project", "show"])
        .arg(&project)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Deadline").not());
}

#[test]
fn create_rejects_penalty_that_rounds_to_zero() {
    let (dir, project) = workspace();
    let output = dir.path().join("team-a.yaml");

    rubric(dir.path())
        .arg("create")
        .arg("--project")
        .arg(&project)
        .arg("--penalty")
        .arg("Late=-0.001")
        .arg("--output")
        .arg(&output)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("non-negative penalty"));

    assert!(!output.exists());
}
