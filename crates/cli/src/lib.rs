//! Command-line front end for the TypeScript client generator.

#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

use clap::{CommandFactory, Parser, Subcommand};

pub mod commands;
mod logging;

pub use logging::init_tracing;

#[derive(Parser, Debug)]
#[command(
    name = "clientgen",
    version,
    about = "Generate a typed TypeScript API client from operation descriptors"
)]
struct Cli {
    /// Log at debug level unless CLIENTGEN_LOG says otherwise
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the client module
    Generate(commands::generate::GenerateArgs),
    /// Print an interface for a map of member schemas
    Interface(commands::interface::InterfaceArgs),
}

/// Parse `args` (including the program name) and run the command.
///
/// Returns the process exit code.
pub fn run_cli(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => {
            init_tracing(cli.verbose);
            match cli.command {
                Some(Commands::Generate(args)) => commands::generate::run(&args),
                Some(Commands::Interface(args)) => commands::interface::run(&args),
                None => {
                    let mut cmd = Cli::command();
                    let _ = cmd.print_help();
                    println!();
                    0
                }
            }
        }
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}
