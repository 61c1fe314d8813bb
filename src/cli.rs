//! The quatern command-line interface.
//!
//! Reads expressions from arguments or stdin, one line at a time, and hands each
//! line to the execution pipeline. Results go to stdout, diagnostics to stderr.

use std::io::{self, BufRead};
use std::process;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use termcolor::ColorChoice;
use tracing_subscriber::EnvFilter;

use crate::{
    cli::output::Output, diagnostics::print_error, engine::ExecutionPipeline, repl,
    syntax::ParseOptions, QuatError,
};

pub mod output;

// ============================================================================
// CLI ARGUMENTS - Command-line argument definitions
// ============================================================================

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "quatern",
    version,
    about = "Multiplies parenthesized quaternion expressions and prints the canonical product."
)]
pub struct QuatArgs {
    #[command(subcommand)]
    pub command: Option<ArgsCommand>,

    /// Reject stray characters, empty groups and repeated terms instead of skipping them.
    #[arg(long, global = true)]
    pub strict: bool,

    /// When to color output.
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    pub color: ColorMode,

    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum ArgsCommand {
    /// Multiply the groups of each expression and print the product (default).
    Eval {
        /// Expressions to evaluate; stdin is read line by line when none are given.
        exprs: Vec<String>,
    },
    /// Print the quaternions parsed from each expression.
    Parse {
        /// Expressions to parse; stdin is read line by line when none are given.
        exprs: Vec<String>,
        /// Print one JSON object per quaternion.
        #[arg(long)]
        json: bool,
    },
    /// Start an interactive session.
    Repl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn choice(self) -> ColorChoice {
        match self {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto if atty::is(atty::Stream::Stdout) => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
        }
    }
}

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// The main entry point for the CLI.
pub fn run() {
    let args = QuatArgs::parse();
    init_tracing(args.verbose);

    let pipeline = ExecutionPipeline::new(ParseOptions {
        strict: args.strict,
    });
    let mut output = Output::new(args.color.choice());

    let ok = match args.command.unwrap_or(ArgsCommand::Eval { exprs: vec![] }) {
        ArgsCommand::Eval { exprs } => for_each_line(exprs, |line| {
            let result = pipeline.execute(line)?;
            output.result(&result).map_err(|e| QuatError::io("writing result", e))
        }),
        ArgsCommand::Parse { exprs, json } => for_each_line(exprs, |line| {
            let quaternions = pipeline.parse_source(line)?;
            output
                .parsed(&quaternions, json)
                .map_err(|e| QuatError::io("writing parsed quaternions", e))
        }),
        ArgsCommand::Repl => repl::run_repl(&pipeline, &mut output),
    };

    if !ok {
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Runs `handle` on every expression, or on every non-blank stdin line when
/// there are none. Each failure is reported and processing moves on; returns
/// whether every line succeeded.
fn for_each_line<F>(exprs: Vec<String>, mut handle: F) -> bool
where
    F: FnMut(&str) -> Result<(), QuatError>,
{
    let mut ok = true;
    let mut report = |result: Result<(), QuatError>| {
        if let Err(e) = result {
            print_error(e);
            ok = false;
        }
    };

    if !exprs.is_empty() {
        for expr in &exprs {
            report(handle(expr));
        }
    } else {
        let stdin = io::stdin();
        for (number, line) in stdin.lock().lines().enumerate() {
            match line {
                Ok(line) if line.trim().is_empty() => {
                    tracing::debug!(line = number + 1, "skipping blank line");
                }
                Ok(line) => {
                    tracing::info!(line = number + 1, "evaluating");
                    report(handle(line.trim_end()));
                }
                Err(e) => {
                    report(Err(QuatError::io("reading stdin", e)));
                    break;
                }
            }
        }
    }

    ok
}
