use super::{CliError, DbCommand};
use expect_test::expect;
use std::{
    fs, io,
    path::Path,
    sync::{Arc, Mutex},
};
use structopt::StructOpt;

async fn run(working_dir: &Path, args: &[&str]) -> Result<String, CliError> {
    let cli = DbCommand::from_iter(std::iter::once(&"migration-engine-cli-test").chain(args.iter()));
    cli.run(working_dir).await
}

fn write_manifest(dir: &Path, seed: &str) {
    let manifest = serde_json::json!({ "name": "blog", "prisma": { "seed": seed } });
    fs::write(dir.join("package.json"), manifest.to_string()).unwrap();
}

#[tokio::test]
async fn db_seed_without_configuration_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();

    assert_eq!(run(dir.path(), &["seed"]).await.unwrap(), "");
}

#[cfg(unix)]
#[tokio::test]
async fn db_seed_confirms_a_successful_seed() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "echo seeding > seed.log");

    let output = run(dir.path(), &["seed"]).await.unwrap();

    assert_eq!(output, "\n🌱  The seed command has been executed.");
    assert!(dir.path().join("seed.log").is_file());
}

#[cfg(unix)]
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

#[cfg(unix)]
impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(unix)]
#[tokio::test]
async fn db_seed_progress_stays_quiet_at_the_default_level() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "true");

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    run(dir.path(), &["seed"]).await.unwrap();

    let logs = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert_eq!(logs, "");
}

#[cfg(unix)]
#[tokio::test]
async fn db_seed_fails_when_the_seed_command_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "exit 1");

    let err = run(dir.path(), &["seed"]).await.unwrap_err();

    assert_eq!(err.exit_code(), 1);
    expect![[r#"
        An error occurred while running the seed command:
        `exit 1` exited with a non-zero exit code"#]]
    .assert_eq(&err.to_string());
}

#[tokio::test]
async fn db_seed_with_legacy_scripts_fails_with_instructions() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("prisma")).unwrap();
    fs::write(dir.path().join("prisma/schema.prisma"), "").unwrap();
    fs::write(dir.path().join("prisma/seed.ts"), "").unwrap();

    let err = run(dir.path(), &["seed"]).await.unwrap_err();

    assert!(matches!(err, CliError::LegacySeedConfigMissing { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn db_seed_accepts_a_schema_path() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("db")).unwrap();
    fs::write(dir.path().join("db/schema.prisma"), "").unwrap();
    fs::write(dir.path().join("db/seed.js"), "").unwrap();

    assert_eq!(run(dir.path(), &["seed"]).await.unwrap(), "");

    let err = run(dir.path(), &["seed", "--schema", "db/schema.prisma"]).await.unwrap_err();

    assert!(err.to_string().contains(r#""seed": "node db/seed.js""#), "{err}");
}

#[tokio::test]
async fn db_seed_rejects_a_missing_schema_path() {
    let dir = tempfile::tempdir().unwrap();

    let err = run(dir.path(), &["seed", "--schema", "nowhere/schema.prisma"]).await.unwrap_err();

    assert!(matches!(err, CliError::SchemaNotFound { .. }));
    assert!(err.to_string().starts_with("Provided --schema at "), "{err}");
}

#[test]
fn errors_render_as_unknown_user_facing_errors() {
    let err = CliError::SeedCommandFailed {
        command: "node seed.js".to_owned(),
    };

    let rendered = serde_json::to_value(super::render_error(err)).unwrap();

    assert_eq!(rendered["is_panic"], serde_json::json!(false));
    assert!(rendered["message"]
        .as_str()
        .unwrap()
        .ends_with("`node seed.js` exited with a non-zero exit code"));
}
