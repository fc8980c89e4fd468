use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use stackcalc::calc_engine::{Calculator, EvaluationTrace, DEFAULT_MAX_DEPTH};

#[cfg(feature = "line")]
mod line_mode;
#[cfg(feature = "tui")]
mod render_help;
#[cfg(feature = "tui")]
mod tui_mode;

#[derive(Debug, Parser)]
#[command(
    name = "stackcalc",
    version,
    about = "Evaluate an arithmetic expression",
    long_about = "Reads one line from stdin, evaluates it and prints the result.\n\n\
        Supports + - * / % ^ (power, right associative), unary signs and parentheses.\n\n\
        EXAMPLES:\n\
        \n  echo '2 + 3 * 4' | stackcalc      Prints 14\n\
        \n  stackcalc -e '2^3^2' --details    Prints 512 and every fold\n\
        \n  stackcalc tui                     Full-screen calculator",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Maximum number of nested parentheses
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH, global = true)]
    max_depth: usize,

    #[command(flatten)]
    eval: EvalArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Args, Clone, Default)]
struct EvalArgs {
    /// Expression to evaluate instead of reading stdin
    #[arg(short = 'e', long = "expr", value_name = "EXPR")]
    expr: Option<String>,

    /// Print every fold to stderr after the result
    #[arg(long)]
    details: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate a single expression (the default)
    Eval(EvalArgs),

    /// Start the full-screen calculator
    #[cfg(feature = "tui")]
    Tui,

    /// Start the line-editing calculator prompt
    #[cfg(feature = "line")]
    Line,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn read_expression() -> Result<String> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read expression from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn run_eval(calc: &Calculator, args: &EvalArgs) -> i32 {
    let input = match &args.expr {
        Some(expr) => expr.clone(),
        None => match read_expression() {
            Ok(line) => line,
            Err(e) => {
                eprintln!("error: {e:#}");
                return 2;
            }
        },
    };

    let mut trace = EvaluationTrace::new(args.details);
    match calc.evaluate_traced(&input, &mut trace) {
        Ok(result) => {
            println!("{result}");
            for (i, step) in trace.steps.iter().enumerate() {
                eprintln!("Step {}: {}", i + 1, step);
            }
            0
        }
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    }
}

#[cfg(any(feature = "tui", feature = "line"))]
fn run_interactive(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {e:#}");
            2
        }
    }
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    log::debug!("{cli:?}");

    let calc = Calculator::new().with_max_depth(cli.max_depth);

    match cli.command {
        None => run_eval(&calc, &cli.eval),
        Some(Command::Eval(args)) => run_eval(&calc, &args),
        #[cfg(feature = "tui")]
        Some(Command::Tui) => run_interactive(tui_mode::run_tui(calc)),
        #[cfg(feature = "line")]
        Some(Command::Line) => run_interactive(line_mode::run_line(calc)),
    }
}

fn main() {
    std::process::exit(run_cli());
}
