use std::process;

use clap::Parser;

mod cli;
mod cmd;
mod error;
mod format;
mod io;

pub use cli::{Cli, Command, PathOrStdin};

use crate::error::CliError;
use crate::format::FormatterConfig;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("{}", e.message());
        process::exit(e.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let out = FormatterConfig::from_flags(cli.no_color, cli.quiet, cli.verbose);
    let mode = cli.format.mode();
    match &cli.command {
        Command::Companies { template } => {
            cmd::companies::run(template, cli.max_file_size, mode, &out)
        }
        Command::Map {
            template,
            company,
            job,
        } => cmd::map::run(template, company, job, cli.max_file_size, mode, &out),
        Command::Preview {
            template,
            job,
            output,
        } => cmd::preview::run(
            template,
            job,
            output.as_deref(),
            cli.max_file_size,
            mode,
            &out,
        ),
        Command::Export(args) => cmd::export::run(args, cli.max_file_size, mode, &out),
    }
}
