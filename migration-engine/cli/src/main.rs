#![deny(rust_2018_idioms)]
#![deny(unsafe_code)]

mod commands;
mod logger;
mod seed;

use colored::Colorize;
use commands::{CliError, DbCommand};
use logger::LogFormat;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "migration-engine", version = env!("CARGO_PKG_VERSION"))]
struct MigrationEngineCli {
    /// Log output format: `text` or `json`
    #[structopt(long, default_value = "text", global = true)]
    log_format: LogFormat,
    #[structopt(subcommand)]
    cli_subcommand: SubCommand,
}

#[derive(Debug, StructOpt)]
enum SubCommand {
    /// Database commands.
    #[structopt(name = "db")]
    Db(DbCommand),
}

#[tokio::main]
async fn main() {
    user_facing_errors::set_panic_hook();

    let input = MigrationEngineCli::from_args();

    if let Err(err) = logger::init_logger(input.log_format) {
        eprintln!("Failed to initialize the logger: {err}");
    }

    let result = match std::env::current_dir() {
        Ok(working_dir) => match input.cli_subcommand {
            SubCommand::Db(cmd) => cmd.run(&working_dir).await,
        },
        Err(err) => Err(CliError::from(err)),
    };

    match result {
        Ok(msg) => {
            if !msg.is_empty() {
                println!("{msg}");
            }
        }
        Err(error) => {
            tracing::error!("{}", error);
            let exit_code = error.exit_code();
            print_error(error, input.log_format);
            std::process::exit(exit_code);
        }
    }
}

fn print_error(error: CliError, log_format: LogFormat) {
    match log_format {
        LogFormat::Text => eprintln!("\n{} {}\n", "!".bold().red(), error),
        LogFormat::Json => {
            if let Err(err) = serde_json::to_writer(std::io::stdout(), &commands::render_error(error)) {
                eprintln!("Failed to write the error to stdout: {err}");
            }

            println!();
        }
    }
}
