use std::{io, path::PathBuf};
use tracing_error::SpanTrace;
use user_facing_errors::UnknownError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Legacy seed scripts exist next to the schema but `package.json` has no `prisma.seed`.
    #[error("{message}")]
    LegacySeedConfigMissing { message: String },

    #[error("An error occurred while running the seed command:\n`{command}` exited with a non-zero exit code")]
    SeedCommandFailed { command: String },

    #[error("Provided --schema at {} doesn't exist.", path.display())]
    SchemaNotFound { path: PathBuf },

    #[error("Could not read the package manifest at {}: {source}", path.display())]
    InvalidManifest { path: PathBuf, source: serde_json::Error },

    #[error("{source}\n{context}")]
    Io { source: io::Error, context: SpanTrace },
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::LegacySeedConfigMissing { .. } => 1,
            CliError::SeedCommandFailed { .. } => 1,
            CliError::SchemaNotFound { .. } => 1,
            CliError::InvalidManifest { .. } => 1,
            CliError::Io { .. } => 1,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(source: io::Error) -> Self {
        CliError::Io {
            source,
            context: SpanTrace::capture(),
        }
    }
}

pub fn render_error(cli_error: CliError) -> user_facing_errors::Error {
    UnknownError::new(&cli_error).into()
}
