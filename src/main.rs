//! # Command Line Interface
//!
//! The command structure is in `cli.rs`.
//! The subcommands are run from the `commands` module.

use env_logger;
#[cfg(windows)]
use colored;
use a2list::commands;
use a2list::commands::CommandError;
mod cli;

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    #[cfg(windows)]
    let _ = colored::control::set_virtual_terminal(true);

    let main_cmd = cli::build_cli();
    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("list") {
        return commands::list::list(cmd);
    }

    if let Some(cmd) = matches.subcommand_matches("dump") {
        return commands::list::dump(cmd);
    }

    if let Some(cmd) = matches.subcommand_matches("xref") {
        return commands::list::xref(cmd);
    }

    if let Some(cmd) = matches.subcommand_matches("completions") {
        return commands::completions::generate(cli::build_cli(),cmd);
    }

    log::error!("no subcommand was found, try `a2list --help`");
    Err(Box::new(CommandError::InvalidCommand))
}
