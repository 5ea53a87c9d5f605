//! Locating and running the user's database seed command.
//!
//! The seed command is configured in the project's `package.json`:
//!
//! ```json
//! { "prisma": { "seed": "node prisma/seed.js" } }
//! ```
//!
//! Projects that still rely on a seed script next to the schema, without that property, get an
//! error explaining how to configure it.

use crate::commands::CliError;
use serde::Deserialize;
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

const PACKAGE_MANIFEST: &str = "package.json";
const DEFAULT_SCHEMA_LOCATIONS: &[&str] = &["prisma/schema.prisma", "schema.prisma"];
const LEGACY_SEED_SCRIPTS: &[&str] = &["seed.ts", "seed.js", "seed.sh"];

/// A configured seed command and the directory it runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SeedCommand {
    pub(crate) command: String,
    pub(crate) working_dir: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    prisma: Option<PrismaConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct PrismaConfig {
    #[serde(default)]
    seed: Option<String>,
    #[serde(default)]
    schema: Option<String>,
}

/// Everything the resolution strategies look at. The manifest is read once.
struct SeedProject<'a> {
    working_dir: &'a Path,
    schema_flag: Option<&'a Path>,
    manifest: Option<PackageManifest>,
}

impl SeedProject<'_> {
    fn prisma_config(&self) -> Option<&PrismaConfig> {
        self.manifest.as_ref().and_then(|manifest| manifest.prisma.as_ref())
    }

    /// `--schema`, then `prisma.schema` from the manifest, then the default locations. A `--schema`
    /// path must point to an existing file.
    fn schema_path(&self) -> Result<Option<PathBuf>, CliError> {
        if let Some(flag) = self.schema_flag {
            let path = self.working_dir.join(flag);

            if !path.is_file() {
                return Err(CliError::SchemaNotFound { path });
            }

            return Ok(Some(path));
        }

        if let Some(schema) = self.prisma_config().and_then(|config| config.schema.as_deref()) {
            return Ok(Some(self.working_dir.join(schema)));
        }

        Ok(DEFAULT_SCHEMA_LOCATIONS
            .iter()
            .map(|location| self.working_dir.join(location))
            .find(|path| path.is_file()))
    }
}

trait SeedStrategy {
    fn resolve(&self, project: &SeedProject<'_>) -> Result<Option<SeedCommand>, CliError>;
}

/// `prisma.seed` in `package.json`. An empty command counts as not configured.
struct PackageManifestSeed;

impl SeedStrategy for PackageManifestSeed {
    fn resolve(&self, project: &SeedProject<'_>) -> Result<Option<SeedCommand>, CliError> {
        let command = project
            .prisma_config()
            .and_then(|config| config.seed.as_deref())
            .map(str::trim)
            .filter(|command| !command.is_empty());

        Ok(command.map(|command| SeedCommand {
            command: command.to_owned(),
            working_dir: project.working_dir.to_owned(),
        }))
    }
}

/// Seed scripts next to the schema from before `prisma.seed` existed. Never resolves to a command:
/// it either finds nothing or fails with setup instructions.
struct LegacySeedConfiguration;

impl SeedStrategy for LegacySeedConfiguration {
    fn resolve(&self, project: &SeedProject<'_>) -> Result<Option<SeedCommand>, CliError> {
        let schema_dir = match project.schema_path()?.as_deref().and_then(Path::parent) {
            Some(dir) => dir.to_owned(),
            None => return Ok(None),
        };

        let legacy_script = LEGACY_SEED_SCRIPTS
            .iter()
            .map(|script| schema_dir.join(script))
            .find(|path| path.is_file());

        match legacy_script {
            Some(script) => {
                let relative = script.strip_prefix(project.working_dir).unwrap_or(script.as_path());

                Err(CliError::LegacySeedConfigMissing {
                    message: legacy_seed_message(relative),
                })
            }
            None => Ok(None),
        }
    }
}

fn legacy_seed_message(script: &Path) -> String {
    let script = script.to_string_lossy().replace('\\', "/");

    let (command, setup) = match Path::new(&script).extension().and_then(|ext| ext.to_str()) {
        Some("ts") => (
            format!("ts-node {script}"),
            "3. Install the required dependencies by running:\nnpm i -D ts-node typescript @types/node\n\n",
        ),
        Some("js") => (format!("node {script}"), ""),
        _ => (format!("./{script}"), "3. Make sure the script is executable.\n\n"),
    };

    format!(
        "To configure seeding in your project you need to add a \"prisma.seed\" property in your package.json with the command to execute it:\n\n\
         1. Open the package.json of your project\n\
         2. Add the following example to it:\n\
         ```\n\
         \"prisma\": {{\n  \"seed\": \"{command}\"\n}}\n\
         ```\n\n\
         {setup}\
         More information in our documentation:\nhttps://pris.ly/d/seeding"
    )
}

fn read_manifest(working_dir: &Path) -> Result<Option<PackageManifest>, CliError> {
    let path = working_dir.join(PACKAGE_MANIFEST);

    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|source| CliError::InvalidManifest { path, source })
}

/// Finds the seed command of the project in `working_dir`. The first strategy producing a command
/// or an error wins.
#[tracing::instrument(skip(working_dir, schema_flag))]
pub(crate) fn resolve(working_dir: &Path, schema_flag: Option<&Path>) -> Result<Option<SeedCommand>, CliError> {
    let project = SeedProject {
        working_dir,
        schema_flag,
        manifest: read_manifest(working_dir)?,
    };

    let strategies: [&dyn SeedStrategy; 2] = [&PackageManifestSeed, &LegacySeedConfiguration];

    for strategy in strategies {
        if let Some(command) = strategy.resolve(&project)? {
            tracing::debug!(command = %command.command, "resolved seed command");
            return Ok(Some(command));
        }
    }

    Ok(None)
}

/// Runs the seed command through the platform shell with inherited stdio. Returns whether it
/// exited successfully.
#[tracing::instrument(skip(seed), fields(command = %seed.command))]
pub(crate) async fn execute(seed: &SeedCommand) -> Result<bool, CliError> {
    let status = shell_command(&seed.command)
        .current_dir(&seed.working_dir)
        .status()
        .await?;

    tracing::debug!(%status, "seed command finished");

    Ok(status.success())
}

#[cfg(windows)]
fn shell_command(command: &str) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use indoc::indoc;
    use tempfile::TempDir;

    fn project(files: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();

        for (path, contents) in files {
            let path = dir.path().join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }

        dir
    }

    const SCHEMA: &str = "datasource db {\n  provider = \"mongodb\"\n  url = env(\"DATABASE_URL\")\n}\n";

    #[test]
    fn the_manifest_seed_command_is_used() {
        let dir = project(&[(
            "package.json",
            indoc! {r#"
                {
                  "name": "blog",
                  "prisma": { "seed": "node prisma/seed.js" }
                }
            "#},
        )]);

        let command = resolve(dir.path(), None).unwrap().unwrap();

        assert_eq!(command.command, "node prisma/seed.js");
        assert_eq!(command.working_dir, dir.path());
    }

    #[test]
    fn the_manifest_wins_over_legacy_scripts() {
        let dir = project(&[
            ("package.json", r#"{ "prisma": { "seed": "ts-node prisma/seed.ts" } }"#),
            ("prisma/schema.prisma", SCHEMA),
            ("prisma/seed.ts", "console.log('seeding')"),
        ]);

        let command = resolve(dir.path(), None).unwrap().unwrap();

        assert_eq!(command.command, "ts-node prisma/seed.ts");
    }

    #[test]
    fn nothing_configured_resolves_to_nothing() {
        let dir = project(&[("package.json", r#"{ "name": "blog" }"#), ("prisma/schema.prisma", SCHEMA)]);

        assert_eq!(resolve(dir.path(), None).unwrap(), None);
    }

    #[test]
    fn a_project_without_manifest_or_schema_resolves_to_nothing() {
        let dir = project(&[]);

        assert_eq!(resolve(dir.path(), None).unwrap(), None);
    }

    #[test]
    fn blank_seed_commands_count_as_missing() {
        let dir = project(&[("package.json", r#"{ "prisma": { "seed": "  " } }"#)]);

        assert_eq!(resolve(dir.path(), None).unwrap(), None);
    }

    #[test]
    fn legacy_seed_scripts_produce_setup_instructions() {
        let dir = project(&[("prisma/schema.prisma", SCHEMA), ("prisma/seed.js", "")]);

        let err = resolve(dir.path(), None).unwrap_err();

        assert_eq!(err.exit_code(), 1);
        expect![[r#"
            To configure seeding in your project you need to add a "prisma.seed" property in your package.json with the command to execute it:

            1. Open the package.json of your project
            2. Add the following example to it:
            ```
            "prisma": {
              "seed": "node prisma/seed.js"
            }
            ```

            More information in our documentation:
            https://pris.ly/d/seeding"#]]
        .assert_eq(&err.to_string());
    }

    #[test]
    fn typescript_seed_scripts_mention_their_dependencies() {
        let dir = project(&[("prisma/schema.prisma", SCHEMA), ("prisma/seed.ts", "")]);

        let message = resolve(dir.path(), None).unwrap_err().to_string();

        assert!(message.contains(r#""seed": "ts-node prisma/seed.ts""#), "{message}");
        assert!(message.contains("npm i -D ts-node typescript @types/node"), "{message}");
    }

    #[test]
    fn the_schema_flag_decides_where_legacy_scripts_are_looked_up() {
        let dir = project(&[
            ("db/schema.prisma", SCHEMA),
            ("db/seed.sh", "#!/bin/sh"),
            ("prisma/schema.prisma", SCHEMA),
        ]);

        assert_eq!(resolve(dir.path(), None).unwrap(), None);

        let message = resolve(dir.path(), Some(Path::new("db/schema.prisma")))
            .unwrap_err()
            .to_string();

        assert!(message.contains(r#""seed": "./db/seed.sh""#), "{message}");
    }

    #[test]
    fn a_schema_flag_pointing_nowhere_is_rejected() {
        let dir = project(&[("prisma/schema.prisma", SCHEMA), ("prisma/seed.js", "")]);

        let err = resolve(dir.path(), Some(Path::new("missing/schema.prisma"))).unwrap_err();

        assert!(matches!(err, CliError::SchemaNotFound { .. }));
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().ends_with("schema.prisma doesn't exist."), "{err}");

        let configured = project(&[("package.json", r#"{ "prisma": { "seed": "node seed.js" } }"#)]);
        let command = resolve(configured.path(), Some(Path::new("missing/schema.prisma")))
            .unwrap()
            .unwrap();

        assert_eq!(command.command, "node seed.js");
    }

    #[test]
    fn the_manifest_schema_location_is_used_for_legacy_lookup() {
        let dir = project(&[
            ("package.json", r#"{ "prisma": { "schema": "db/schema.prisma" } }"#),
            ("db/schema.prisma", SCHEMA),
            ("db/seed.js", ""),
        ]);

        let message = resolve(dir.path(), None).unwrap_err().to_string();

        assert!(message.contains(r#""seed": "node db/seed.js""#), "{message}");
    }

    #[test]
    fn invalid_manifests_are_reported() {
        let dir = project(&[("package.json", "{ prisma: ")]);

        let err = resolve(dir.path(), None).unwrap_err();

        assert!(matches!(err, CliError::InvalidManifest { .. }));
        assert!(err.to_string().starts_with("Could not read the package manifest at"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn execute_reports_the_exit_status() {
        let dir = project(&[]);
        let command = |command: &str| SeedCommand {
            command: command.to_owned(),
            working_dir: dir.path().to_owned(),
        };

        assert!(execute(&command("true")).await.unwrap());
        assert!(!execute(&command("exit 3")).await.unwrap());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn execute_runs_in_the_project_directory() {
        let dir = project(&[]);
        let seed = SeedCommand {
            command: "echo seeded > seeded.txt".to_owned(),
            working_dir: dir.path().to_owned(),
        };

        assert!(execute(&seed).await.unwrap());
        assert_eq!(fs::read_to_string(dir.path().join("seeded.txt")).unwrap(), "seeded\n");
    }
}
