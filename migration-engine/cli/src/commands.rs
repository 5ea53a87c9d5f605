mod error;
#[cfg(test)]
mod tests;

pub use error::{render_error, CliError};

use crate::seed;
use std::path::{Path, PathBuf};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
pub(crate) enum DbCommand {
    /// Seed your database
    #[structopt(name = "seed")]
    Seed(SeedInput),
}

#[derive(Debug, StructOpt)]
pub(crate) struct SeedInput {
    /// Custom path to your Prisma schema
    #[structopt(long, env = "PRISMA_SCHEMA_PATH", parse(from_os_str))]
    schema: Option<PathBuf>,
}

impl DbCommand {
    pub(crate) async fn run(self, working_dir: &Path) -> Result<String, CliError> {
        match self {
            DbCommand::Seed(input) => db_seed(working_dir, input.schema.as_deref()).await,
        }
    }
}

/// Returns an empty string when no seed command is configured.
async fn db_seed(working_dir: &Path, schema: Option<&Path>) -> Result<String, CliError> {
    let command = match seed::resolve(working_dir, schema)? {
        Some(command) => command,
        None => return Ok(String::new()),
    };

    tracing::debug!(command = %command.command, "Running seed command");

    if seed::execute(&command).await? {
        Ok(seed_confirmation())
    } else {
        Err(CliError::SeedCommandFailed {
            command: command.command,
        })
    }
}

fn seed_confirmation() -> String {
    let emoji = if cfg!(windows) { "" } else { "🌱  " };
    format!("\n{emoji}The seed command has been executed.")
}
