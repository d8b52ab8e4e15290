//! # CLI Subcommands
//! 
//! Contains modules that run the subcommands.

pub mod list;
pub mod completions;

#[derive(thiserror::Error,Debug)]
pub enum CommandError {
    #[error("Command could not be interpreted")]
    InvalidCommand,
    #[error("File not found")]
    FileNotFound
}
