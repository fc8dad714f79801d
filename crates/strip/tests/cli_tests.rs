use std::fs;

use assert_cmd::{Command, assert::Assert};
use predicates::str::contains;
use tempfile::{TempDir, tempdir};

const ELESTIO_SERVICE: &str = r#"{"provider_schemas":{"elestio":{"resource_schemas":{"elestio_service":{"block":{"attributes":{"id":{"type":"string"},"local_field":{"type":"dynamic"},"local_field_sensitive":{"type":"dynamic"}}}}}}}}"#;

/// Working directory with `config/schema.json` holding `schema`, if any.
fn workdir(schema: Option<&str>) -> TempDir {
    let dir = tempdir().unwrap();
    if let Some(schema) = schema {
        fs::create_dir_all(dir.path().join("config")).unwrap();
        fs::write(dir.path().join("config/schema.json"), schema).unwrap();
    }
    dir
}

fn strip_dynamic_fields(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_strip-dynamic-fields"));
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("ELESTIO_SCHEMA_PATH")
        .env_remove("ELESTIO_SCHEMA_STRIP_FIELDS")
        .env_remove("ELESTIO_SCHEMA_DRY_RUN")
        .env("NO_COLOR", "1");
    cmd
}

fn stderr_of(assert: &Assert) -> String {
    String::from_utf8(assert.get_output().stderr.clone()).unwrap()
}

fn schema_in(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("config/schema.json")).unwrap()
}

#[test]
fn test_rewrite_logs_removals_on_stderr() {
    let dir = workdir(Some(ELESTIO_SERVICE));

    let assert = strip_dynamic_fields(&dir).assert().code(0).stdout("");

    let stderr = stderr_of(&assert);
    let removals: Vec<&str> = stderr.lines().filter(|line| line.contains("Removed ")).collect();
    assert_eq!(removals.len(), 1, "{stderr}");
    assert!(
        removals[0].contains("Removed local_field, local_field_sensitive from elestio_service")
    );
    assert!(stderr.contains("Successfully removed dynamic type fields from config/schema.json"));
    assert!(!stderr.contains('\u{1b}'), "stderr carries colour codes: {stderr:?}");

    assert_eq!(
        schema_in(&dir),
        r#"{"provider_schemas":{"elestio":{"resource_schemas":{"elestio_service":{"block":{"attributes":{"id":{"type":"string"}}}}}}}}"#
    );
}

#[test]
fn test_nothing_to_remove_exits_zero() {
    let dir = workdir(Some(r#"{"provider_schemas":{}}"#));

    strip_dynamic_fields(&dir)
        .assert()
        .code(0)
        .stdout("")
        .stderr(contains("No dynamic fields found to remove"));

    assert_eq!(schema_in(&dir), r#"{"provider_schemas":{}}"#);
}

#[test]
fn test_missing_schema_exits_with_noinput() {
    let dir = workdir(None);

    strip_dynamic_fields(&dir)
        .assert()
        .code(66)
        .stdout("")
        .stderr(contains("Schema file not found: config/schema.json"));
}

#[test]
fn test_malformed_schema_exits_with_dataerr() {
    let dir = workdir(Some(r#"{"provider_schemas":"#));

    strip_dynamic_fields(&dir)
        .assert()
        .code(65)
        .stderr(contains("Failed to parse JSON in config/schema.json"));

    assert_eq!(schema_in(&dir), r#"{"provider_schemas":"#);
}

#[test]
fn test_schema_path_flag() {
    let dir = workdir(None);
    fs::write(dir.path().join("provider.json"), ELESTIO_SERVICE).unwrap();

    strip_dynamic_fields(&dir)
        .args(["--schema-path", "provider.json"])
        .assert()
        .code(0)
        .stderr(contains("from elestio_service"));

    let rewritten = fs::read_to_string(dir.path().join("provider.json")).unwrap();
    assert!(!rewritten.contains("local_field"));
}

#[test]
fn test_dry_run_env_accepts_numeric_flag() {
    let dir = workdir(Some(ELESTIO_SERVICE));

    strip_dynamic_fields(&dir)
        .env("ELESTIO_SCHEMA_DRY_RUN", "1")
        .assert()
        .code(0)
        .stderr(contains("Dry run: would remove 2 field(s) from 1 resource(s)"));

    assert_eq!(schema_in(&dir), ELESTIO_SERVICE);
}

#[test]
fn test_dry_run_env_falsey_value_rewrites() {
    let dir = workdir(Some(ELESTIO_SERVICE));

    strip_dynamic_fields(&dir).env("ELESTIO_SCHEMA_DRY_RUN", "no").assert().code(0);

    assert!(!schema_in(&dir).contains("local_field"));
}
