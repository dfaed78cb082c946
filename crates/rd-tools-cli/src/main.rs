//! rd-tools CLI - BD-rate calculator and codec log utilities

use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};

mod commands;

/// Bjontegaard-delta calculator and codec trace utilities.
#[derive(Parser)]
#[command(name = "rd-tools")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true, env = "RD_TOOLS_VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute BD-rate and BD-PSNR of a test curve against a reference curve
    #[command(after_help = BDRATE_EXAMPLES)]
    Bdrate(commands::bdrate::BdrateArgs),

    /// Print the MD5 of every non-blank line read from stdin
    Md5,

    /// Count intra/inter/skip blocks in a flag log
    Flags {
        /// Flag log file
        input: PathBuf,
    },

    /// Count intra/inter/skip blocks in a reference decoder trace
    Trace {
        /// Trace file, typically TraceDec.txt or TraceEnc.txt
        input: PathBuf,
    },
}

const BDRATE_EXAMPLES: &str = "\
Separators in value lists may be commas, semicolons or whitespace.
The first list (or --ref pairs) is the reference.

Examples:
  rd-tools bdrate -b \"40433.88 7622.75 2394.49 1017.62\" -p 37.58,35.38,33.90,32.06 \\
                  -b \"40370.12;7587.00;2390.00;1017.10\" -p 37.60,35.40,33.92,32.08
  rd-tools bdrate --ref 40433.88,37.58 --ref 7622.75,35.38 \\
                  --ref \"2394.49 33.90\" --ref \"1017.62 32.06\" \\
                  --tst 40370.12,37.60 --tst 7587.00,35.40 \\
                  --tst \"2390.00 33.92\" --tst \"1017.10 32.08\"

Options are applied in command-line order: lists given after four --ref
pairs fill the test curve.";

fn main() -> anyhow::Result<()> {
    // Matches are kept so bdrate can replay its options in command-line order.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Bdrate(args) => {
            let sub = matches
                .subcommand_matches("bdrate")
                .context("missing bdrate arguments")?;
            commands::bdrate::run(args, sub)
        }
        Commands::Md5 => commands::md5::run(),
        Commands::Flags { input } => commands::blocks::run_flags(input),
        Commands::Trace { input } => commands::blocks::run_trace(input),
    }
}
