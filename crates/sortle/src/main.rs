//! Sortle interpreter entry point
//!
//! Reads a Sortle program, runs it to termination, and prints the final
//! expression's name on standard out. All diagnostics go to standard error;
//! the exit code is 0 on success and 1 on any parse or runtime error.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use sortle_engine::{Interpreter, ProgramState, RuntimeError};
use sortle_eval::EvalError;
use sortle_parser::ParseError;
use tracing_subscriber::{EnvFilter, fmt};

/// Sortle esoteric language interpreter
#[derive(Parser, Debug)]
#[command(name = "sortle", version, about, long_about = None)]
struct Args {
    /// Sortle source file to run
    program: PathBuf,

    /// Abort with an error after this many rewrite steps
    #[arg(long)]
    max_steps: Option<u64>,

    /// Print the parsed program as JSON instead of running it
    #[arg(long)]
    dump_ast: bool,

    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let source = fs::read_to_string(&args.program)
        .with_context(|| format!("cannot read {}", args.program.display()))?;

    let program =
        sortle_parser::parse(&source).map_err(|error| parse_failure(&error, &source))?;

    if args.dump_ast {
        println!("{}", serde_json::to_string_pretty(&program)?);
        return Ok(());
    }

    tracing::info!(expressions = program.len(), "program loaded");
    let state = ProgramState::new(program).map_err(runtime_failure)?;
    let mut interpreter = Interpreter::new(state);

    let mut steps: u64 = 0;
    while !interpreter.is_halted() {
        if args.max_steps.is_some_and(|limit| steps >= limit) {
            anyhow::bail!("step limit of {steps} exceeded");
        }
        interpreter.step().map_err(runtime_failure)?;
        steps += 1;
    }

    if let Some(name) = interpreter.output() {
        println!("{name}");
    }
    Ok(())
}

/// Attach the carat-underline snippet to a parse error.
fn parse_failure(error: &ParseError, source: &str) -> anyhow::Error {
    match error.snippet(source) {
        Some(snippet) => anyhow::anyhow!("{error}\n{snippet}"),
        None => anyhow::anyhow!("{error}"),
    }
}

/// Attach the offending pattern to a regex compile failure.
fn runtime_failure(error: RuntimeError) -> anyhow::Error {
    if let RuntimeError::Eval(EvalError::Regex { pattern, .. }) = &error {
        anyhow::anyhow!("{error}\nwhen evaluating regex: {pattern}")
    } else {
        anyhow::anyhow!("{error}")
    }
}
