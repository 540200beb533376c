/// Command module for the `quotegen` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the parsed arguments and returns `Ok(())` on success or
/// a [`crate::error::CliError`] on failure. Results go to stdout;
/// diagnostics go to stderr through [`crate::format`].
pub mod companies;
pub mod export;
pub mod map;
pub mod preview;

use quotegen_excel::QuoteSession;

use crate::PathOrStdin;
use crate::error::CliError;
use crate::io::read_input;

/// Reads and parses the template named on the command line.
fn open_template(template: &PathOrStdin, max_size: u64) -> Result<QuoteSession, CliError> {
    let bytes = read_input(template, max_size)?;
    QuoteSession::open(&bytes).map_err(|e| CliError::from_excel(e, &template.label()))
}
