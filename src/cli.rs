// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

use crate::infra::logging::{self, LogLevel};

pub mod commands {
    pub mod test;
}

use commands::test::TestArgs;

fn build_cli() -> Command {
    Command::new("lox")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tooling for lox: runs conformance tests against a lox interpreter.")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Diagnostic log level (trace, debug, info, warn, error). RUST_LOG overrides it.")
                .value_name("LEVEL")
                .default_value("warn")
                .value_parser(clap::value_parser!(LogLevel))
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("test")
                .about("Run test programs through a lox interpreter")
                .arg(
                    Arg::new("program")
                        .long("program")
                        .help("Path to lox program")
                        .value_name("PROGRAM")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("test")
                        .long("test")
                        .help("Path to a test program; may be repeated")
                        .value_name("TEST")
                        .num_args(1..)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("jobs")
                        .short('j')
                        .long("jobs")
                        .help("Number of tests to run concurrently")
                        .value_name("JOBS")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("timeout")
                        .long("timeout")
                        .help("Per-test timeout in seconds")
                        .value_name("SECONDS")
                        .value_parser(clap::value_parser!(u64))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Config file to use instead of searching for lox.toml")
                        .value_name("CONFIG")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("skip")
                        .long("skip")
                        .help("Ignore tests whose name contains PATTERN; may be repeated")
                        .value_name("PATTERN")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("args")
                        .long("args")
                        .help("Extra arguments passed to the program after each test path")
                        .value_name("ARGS")
                        .allow_hyphen_values(true)
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("no-color")
                        .long("no-color")
                        .help("Disable ANSI colors in the output")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("hide-output")
                        .long("hide-output")
                        .help("Do not echo the standard output of tested programs")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("report")
                        .long("report")
                        .help("Write a JSON report to this path")
                        .value_name("REPORT")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
}

pub async fn run() -> Result<()> {
    let matches = build_cli().get_matches();

    let level = matches
        .get_one::<LogLevel>("log-level")
        .copied()
        .unwrap_or(LogLevel::Warn);
    logging::init_logger(level);

    match matches.subcommand() {
        Some(("test", test_matches)) => {
            let args = TestArgs {
                program: test_matches
                    .get_one::<PathBuf>("program")
                    .cloned()
                    .unwrap_or_default(), // Required by clap
                tests: test_matches
                    .get_many::<PathBuf>("test")
                    .map(|values| values.cloned().collect())
                    .unwrap_or_default(),
                jobs: test_matches.get_one::<usize>("jobs").copied(),
                timeout_secs: test_matches.get_one::<u64>("timeout").copied(),
                config: test_matches.get_one::<PathBuf>("config").cloned(),
                skip: test_matches
                    .get_many::<String>("skip")
                    .map(|values| values.cloned().collect())
                    .unwrap_or_default(),
                extra_args: test_matches.get_one::<String>("args").cloned(),
                color: !test_matches.get_flag("no-color"),
                echo_output: !test_matches.get_flag("hide-output"),
                report: test_matches.get_one::<PathBuf>("report").cloned(),
            };
            commands::test::execute(args).await?;
        }
        _ => {
            // `subcommand_required` means clap already printed help and exited.
        }
    }
    Ok(())
}
