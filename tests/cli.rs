//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::json;

use fnscope::cassette::recorder::CassetteRecorder;

/// Runs the binary in `dir` with only the given environment variables set.
fn run_fnscope(dir: &Path, args: &[&str], envs: &[(&str, &str)]) -> Output {
    let bin = env!("CARGO_BIN_EXE_fnscope");
    Command::new(bin)
        .args(args)
        .env_clear()
        .envs(envs.iter().copied())
        .current_dir(dir)
        .output()
        .expect("failed to run fnscope binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Writes a cassette in which `src/shared.ts` changed and two units depend on it.
fn write_cassette(path: &Path) {
    let reference = |file: &str, target: &str| json!({"file": file, "referenced_file_name": target});
    let mut recorder = CassetteRecorder::new(path, "ci", "2222222");
    recorder.record(
        "comparison",
        "compare",
        json!({"url": "https://example.test/compare/1111111...2222222"}),
        json!({"Ok": {"files": [{"filename": "src/shared.ts", "status": "modified"}]}}),
    );
    recorder.record(
        "files",
        "glob",
        json!({"root": "/w", "pattern": "src/functions/**/*.ts"}),
        json!({"Ok": ["/w/src/functions/a.function.ts", "/w/src/functions/b.function.ts"]}),
    );
    recorder.record(
        "analysis",
        "references",
        json!({"roots": ["/w/src/functions/a.function.ts", "/w/src/functions/b.function.ts"]}),
        json!({"Ok": {
            "/w/src/shared.ts": [
                reference("/w/src/functions/a.function.ts", "/w/src/shared.ts"),
                reference("/w/src/shared2.ts", "/w/src/shared.ts"),
            ],
            "/w/src/shared2.ts": [reference("/w/src/functions/b.function.ts", "/w/src/shared2.ts")],
        }}),
    );
    recorder.finish().unwrap();
}

const CONFIG: &[(&str, &str)] = &[
    ("COMPARE_URL", "https://example.test/compare/{base}...{head}"),
    ("BEFORE_SHA", "1111111aaaaaaa"),
    ("AFTER_SHA", "2222222bbbbbbb"),
    ("GITHUB_TOKEN", "token"),
    ("GITHUB_WORKSPACE", "/w"),
    ("INDIVIDUAL_FUNCTION_GLOB", "src/functions/**/*.ts"),
];

#[test]
fn affected_without_config_prints_nothing_and_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_fnscope(dir.path(), &["affected"], &[]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn affected_with_bad_pattern_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_fnscope(dir.path(), &["affected", "--unit-file-pattern", "("], &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("invalid unit file pattern"), "{stderr}");
}

#[test]
fn affected_replays_cassette_and_prints_units() {
    let dir = tempfile::tempdir().unwrap();
    let cassette = dir.path().join("ci.cassette.yaml");
    write_cassette(&cassette);

    let mut envs = CONFIG.to_vec();
    let replay = cassette.display().to_string();
    envs.push(("FNSCOPE_REPLAY", &replay));
    let output = run_fnscope(dir.path(), &["affected"], &envs);

    assert!(output.status.success());
    assert_eq!(stdout(&output), ":a,b\n");
}

#[test]
fn affected_reads_settings_from_dotenv_file() {
    let dir = tempfile::tempdir().unwrap();
    let cassette = dir.path().join("ci.cassette.yaml");
    write_cassette(&cassette);
    let dotenv: String = CONFIG.iter().map(|(k, v)| format!("{k}='{v}'\n")).collect();
    std::fs::write(dir.path().join(".env"), dotenv).unwrap();

    let replay = cassette.display().to_string();
    let output =
        run_fnscope(dir.path(), &["affected", "--format", "json"], &[("FNSCOPE_REPLAY", &replay)]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "{\"outcome\":\"units\",\"units\":[\"a\",\"b\"]}\n");
}

#[test]
fn affected_with_empty_pattern_variable_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let cassette = dir.path().join("ci.cassette.yaml");
    write_cassette(&cassette);

    let replay = cassette.display().to_string();
    for key in ["FULL_DEPLOYMENT_REGEX", "INDIVIDUAL_FUNCTION_REGEX"] {
        let mut envs = CONFIG.to_vec();
        envs.push(("FNSCOPE_REPLAY", &replay));
        envs.push((key, ""));
        let output = run_fnscope(dir.path(), &["affected"], &envs);

        assert!(output.status.success(), "{key}");
        assert!(stdout(&output).is_empty(), "{key}: {}", stdout(&output));
    }
}

#[test]
fn classify_rejects_empty_pattern_variable() {
    let dir = tempfile::tempdir().unwrap();
    let output =
        run_fnscope(dir.path(), &["classify", "package.json"], &[("FULL_DEPLOYMENT_REGEX", "")]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("FULL_DEPLOYMENT_REGEX is empty"), "{stderr}");
}

#[test]
fn classify_reports_each_path() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_fnscope(dir.path(), &["classify", "src/functions/a.ts", "package.json"], &[]);
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(rows[0]["unit_file"], json!(true));
    assert_eq!(rows[1]["unit_file"], json!(false));
    assert_eq!(rows[1]["full_deployment"], json!(true));
}

#[test]
fn recording_writes_per_port_cassettes() {
    let dir = tempfile::tempdir().unwrap();
    let record = dir.path().join("cassettes");
    let record_env = record.display().to_string();
    let output =
        run_fnscope(dir.path(), &["classify", "x.ts"], &[("FNSCOPE_RECORD", &record_env)]);
    assert!(output.status.success());

    let sessions: Vec<_> = std::fs::read_dir(&record).unwrap().collect();
    assert_eq!(sessions.len(), 1);
    let session = sessions[0].as_ref().unwrap().path();
    for port in ["comparison", "files", "analysis"] {
        assert!(session.join(format!("{port}.cassette.yaml")).is_file(), "{port}");
    }
}

#[test]
fn help_exits_successfully() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_fnscope(dir.path(), &["--help"], &[]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("affected"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_fnscope(dir.path(), &["nonexistent"], &[]);
    assert!(!output.status.success());
}
