//! ## Listing Subcommands
//!
//! Each subcommand reads a tokenized program from a file or from the previous
//! node of a pipeline, decodes it, and writes text to stdout.  Diagnostics go to stderr.

use std::io::Read;
use std::path::Path;
use colored::Colorize;
use super::CommandError;
use crate::lang::applesoft::{self,settings,diagnostics::Diagnostic};
use crate::lang::applesoft::tokenizer::Tokenizer;
use crate::lang::applesoft::listing::Lister;
use crate::{DYNERR,STDRESULT};

/// Get the program image and a name for the header.
/// Console line entry is refused, since the input is binary.
fn read_input(cmd: &clap::ArgMatches, subcommand: &str) -> Result<(Vec<u8>,String),DYNERR> {
    let mut img: Vec<u8> = Vec::new();
    let mut name = "STDIN".to_string();
    if let Some(path) = cmd.get_one::<String>("file") {
        img = match std::fs::read(path) {
            Ok(buf) => buf,
            Err(e) => {
                log::error!("could not read {}: {}",path,e);
                return Err(Box::new(CommandError::FileNotFound));
            }
        };
        if let Some(stem) = Path::new(path).file_name() {
            name = stem.to_string_lossy().to_string();
        }
    } else {
        if atty::is(atty::Stream::Stdin) {
            log::error!("line entry is not supported for `{}`, please pipe something in or use `-f`",subcommand);
            return Err(Box::new(CommandError::InvalidCommand));
        }
        std::io::stdin().read_to_end(&mut img)?;
    }
    if img.len()==0 {
        log::error!("{} did not receive any data",subcommand);
        return Err(Box::new(CommandError::InvalidCommand));
    }
    if let Ok(Some(n)) = cmd.try_get_one::<String>("name") {
        name = n.to_string();
    }
    log::debug!("read {} bytes for {}",img.len(),name);
    Ok((img,name))
}

/// Start from the `--config` file, if any, then apply flags.
fn build_settings(cmd: &clap::ArgMatches) -> Result<settings::Settings,DYNERR> {
    let mut config = match cmd.get_one::<String>("config") {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(json) => settings::parse(&json)?,
            Err(e) => {
                log::error!("could not read {}: {}",path,e);
                return Err(Box::new(CommandError::FileNotFound));
            }
        },
        None => settings::Settings::new()
    };
    if cmd.get_flag("targets") { config.show_targets = true; }
    if cmd.get_flag("only-targets") { config.only_show_target_line_numbers = true; }
    if cmd.get_flag("no-header") { config.show_header = false; }
    if cmd.get_flag("no-align") { config.align_assign = false; }
    if cmd.get_flag("split-rem") { config.split_rem = true; }
    if cmd.get_flag("split-dim") { config.split_dim = true; }
    if cmd.get_flag("trim-rem") { config.delete_extra_rem_space = true; }
    if cmd.get_flag("trim-data") { config.delete_extra_data_space = true; }
    if cmd.get_flag("xref") { config.show_xref = true; }
    if cmd.get_flag("symbols") { config.show_symbols = true; }
    if cmd.get_flag("strings") { config.list_strings = true; }
    if cmd.get_flag("blank-after-return") { config.blank_after_return = true; }
    if cmd.get_flag("hide-then") { config.show_then = false; }
    if cmd.get_flag("caret") { config.show_caret = true; }
    if let Some(n) = cmd.get_one::<usize>("wrap-rem") { config.wrap_rem_at = *n; }
    if let Some(n) = cmd.get_one::<usize>("wrap-data") { config.wrap_data_at = *n; }
    if let Some(n) = cmd.get_one::<usize>("wrap-print") { config.wrap_print_at = *n; }
    Ok(config)
}

fn eprint_diagnostics(diagnostics: &[Diagnostic]) {
    let mut warnings = 0;
    for diag in diagnostics {
        if diag.anomaly.is_rendering() {
            eprintln!("{} line {}: {}","note".bright_cyan(),diag.line,diag.anomaly);
        } else {
            eprintln!("{} line {}: {}","warning".bright_yellow(),diag.line,diag.anomaly);
            warnings += 1;
        }
    }
    if warnings > 0 {
        eprintln!("! {} {}",warnings.to_string().bright_yellow(),"warnings".bright_yellow());
    }
}

pub fn list(cmd: &clap::ArgMatches) -> STDRESULT {
    let config = build_settings(cmd)?;
    let (img,name) = read_input(cmd,"list")?;
    let program = Tokenizer::new().detokenize(&img);
    let mut lister = Lister::new();
    lister.set_config(config);
    let listing = lister.list(&program,&name);
    eprint_diagnostics(&listing.diagnostics);
    println!("{}",listing.text);
    Ok(())
}

pub fn dump(cmd: &clap::ArgMatches) -> STDRESULT {
    let mut config = settings::Settings::new();
    if cmd.get_flag("no-header") {
        config.show_header = false;
    }
    let (img,name) = read_input(cmd,"dump")?;
    let program = Tokenizer::new().detokenize(&img);
    eprint_diagnostics(&program.diagnostics);
    println!("{}",applesoft::dump::hex_listing(&program,&config,&name));
    Ok(())
}

pub fn xref(cmd: &clap::ArgMatches) -> STDRESULT {
    let (img,_name) = read_input(cmd,"xref")?;
    let program = Tokenizer::new().detokenize(&img);
    eprint_diagnostics(&program.diagnostics);
    let obj = program.symbols.to_json();
    let out = match cmd.get_flag("pretty") {
        true => serde_json::to_string_pretty(&obj)?,
        false => obj.to_string()
    };
    println!("{}",out);
    Ok(())
}
