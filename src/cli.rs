use clap::{value_parser, crate_version, Arg, ArgAction, Command, ValueHint};

const IN_HELP: &str = "if the program is piped, omit `--file` option";
const CONFIG_LONG_HELP: &str = "Read options from a JSON object whose keys are the camelCase option names,
e.g. {\"showTargets\": true, \"wrapRemAt\": 40}.  Unrecognized keys are ignored.
Flags given on the command line override the file.";

fn file_arg() -> Arg {
    Arg::new("file").short('f').long("file").value_name("PATH")
        .help("path to tokenized Applesoft program")
        .value_hint(ValueHint::FilePath)
        .required(false)
}

fn name_arg() -> Arg {
    Arg::new("name").short('n').long("name").value_name("NAME")
        .help("program name to show in the header")
        .required(false)
}

fn no_header_arg() -> Arg {
    flag("no-header","omit the name, length, and load address")
}

fn flag(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id).long(id).help(help).action(ArgAction::SetTrue)
}

fn width_arg(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id).long(id).value_name("COLUMNS").help(help)
        .value_parser(value_parser!(usize))
        .required(false)
}

pub fn build_cli() -> Command {
    let long_help = "a2list is always invoked with exactly one of several subcommands.
The input is a tokenized Applesoft program, either from a file or piped in.
Set RUST_LOG environment variable to control logging level.
  levels: trace,debug,info,warn,error

Examples:
---------
listing with targets:  `a2list list --targets -f HELLO.atok`
full cross reference:  `a2list list --xref --symbols --strings -f HELLO.atok`
from a disk image:     `a2kit get -f hello -t atok -d myimg.dsk | a2list list`
debug hex listing:     `a2list dump -f HELLO.atok`
tables for tooling:    `a2list xref --pretty -f HELLO.atok`";

    let mut main_cmd = Command::new("a2list")
        .about("Turns tokenized Applesoft BASIC into annotated listings.")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(
        Command::new("list")
            .arg(file_arg())
            .arg(name_arg())
            .arg(
                Arg::new("config").long("config").value_name("PATH")
                    .help("JSON file with listing options")
                    .long_help(CONFIG_LONG_HELP)
                    .value_hint(ValueHint::FilePath)
                    .required(false),
            )
            .arg(flag("targets","mark GOTO and GOSUB sources and targets in a gutter"))
            .arg(flag("only-targets","only show line numbers that are referenced"))
            .arg(no_header_arg())
            .arg(flag("no-align","do not align the `=` of consecutive assignments"))
            .arg(flag("split-rem","put a trailing REM on its own line"))
            .arg(flag("split-dim","put each DIM array on its own line"))
            .arg(flag("trim-rem","delete the extra space after REM"))
            .arg(flag("trim-data","delete the extra space after DATA"))
            .arg(width_arg("wrap-rem","wrap REM text at this width, 0 disables"))
            .arg(width_arg("wrap-data","wrap DATA items at this width, 0 disables"))
            .arg(width_arg("wrap-print","wrap PRINT literals at this width, 0 disables"))
            .arg(flag("xref","append GOSUB and GOTO cross references"))
            .arg(flag("symbols","append the variable table and non-unique names"))
            .arg(flag("strings","append the string literals"))
            .arg(flag("blank-after-return","put a blank line after each RETURN"))
            .arg(flag("hide-then","omit THEN, implied jumps are written as GOTO"))
            .arg(flag("caret","show control characters as ^X"))
            .about("read tokenized program, write listing to stdout")
            .after_help(IN_HELP),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("dump")
            .arg(file_arg())
            .arg(name_arg())
            .arg(no_header_arg())
            .about("read tokenized program, write hex listing to stdout")
            .after_help(IN_HELP),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("xref")
            .arg(file_arg())
            .arg(flag("pretty","indent the JSON output"))
            .about("read tokenized program, write symbol tables as JSON to stdout")
            .after_help(IN_HELP),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("completions")
            .arg(
                Arg::new("shell").short('s').long("shell").help("shell target").value_name("NAME")
                    .required(true)
                    .value_parser(["bash","elv","fish","ps1","zsh"])
            )
            .about("write completions script to stdout for the specified shell")
    );
    return main_cmd;
}
