mod render;

use std::fs;
use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result};
use ariadne::{Color, Fmt};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use log::{LevelFilter, debug};
use nestlist_core::{DEFAULT_MAX_DEPTH, Diagnostic, Lexer, ParserConfig, Token, check_str};
use nestlist_diagnostics as diag;

use crate::render::{Format, print_summary, render_diagnostics_pretty};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "nestlist",
    version,
    about = "Tokenize and recognize nested bracket-list statements such as [a,[b,c]] or [a]=[b]"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG`
    /// overrides it.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the token stream, one token per line.
    Tokens {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Recognize a statement and report diagnostics.
    Check {
        #[command(flatten)]
        input: InputArgs,
        /// Recognition strategy.
        #[arg(long, value_enum, default_value_t = StrategyArg::Backtracking)]
        strategy: StrategyArg,
        /// Lookahead width for the predictive strategy.
        #[arg(short = 'k', long = "lookahead", default_value_t = 2)]
        lookahead: usize,
        /// Maximum list nesting depth.
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },

    /// Explain a diagnostic ID (e.g. NL2001).
    Explain { id: String },
}

/// Where the input text comes from. Stdin when neither is given.
#[derive(Args, Debug)]
struct InputArgs {
    /// Input text given inline.
    input: Option<String>,
    /// Read input from a file ("-" for stdin).
    #[arg(long, short, conflicts_with = "input")]
    file: Option<String>,
}

/// Recognition strategy for the `check` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// LL(k) over a fixed lookahead window; statements must be plain lists.
    Predictive,
    /// Speculative parsing with rollback; accepts lists and assignments.
    Backtracking,
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let format = Format::resolve_or_detect(cli.output.as_deref());

    if let Err(err) = run(cli.cmd, format) {
        report_failure(&err, format);
        process::exit(1);
    }
}

fn run(cmd: Cmd, format: Format) -> Result<()> {
    match cmd {
        Cmd::Tokens { input } => cmd_tokens(&input, format),
        Cmd::Check {
            input,
            strategy,
            lookahead,
            max_depth,
        } => cmd_check(&input, strategy, lookahead, max_depth, format),
        Cmd::Explain { id } => cmd_explain(&id, format),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Command failures: a JSON envelope on stdout, or a plain line on stderr.
fn report_failure(err: &anyhow::Error, format: Format) {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "success": false,
                "error": "command_failed",
                "message": format!("{err:#}"),
            });
            println!("{out}");
        }
        Format::Pretty => eprintln!("error: {err:#}"),
    }
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_tokens(args: &InputArgs, format: Format) -> Result<()> {
    let (source, name) = read_input(args)?;

    let mut tokens: Vec<Token> = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    for item in Lexer::new(&source) {
        match item {
            Ok(tok) => tokens.push(tok),
            Err(err) => diagnostics.push(err.to_diagnostic()),
        }
    }
    debug!("tokens: {} lexed from {name}", tokens.len());

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "tokens": tokens,
                "diagnostics": diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            for tok in &tokens {
                println!("{:?}\t{}", tok.kind, tok.text);
            }
            render_diagnostics_pretty(&source, &name, &diagnostics);
            print_summary(&diagnostics);
        }
    }

    exit_on_errors(&diagnostics);
    Ok(())
}

fn cmd_check(
    args: &InputArgs,
    strategy: StrategyArg,
    lookahead: usize,
    max_depth: usize,
    format: Format,
) -> Result<()> {
    let config = match strategy {
        StrategyArg::Predictive => ParserConfig::predictive(lookahead),
        StrategyArg::Backtracking => ParserConfig::backtracking(),
    }
    .with_max_depth(max_depth);
    config.validate().context("invalid parser configuration")?;

    let (source, name) = read_input(args)?;
    let res = check_str(&source, &config);

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": res.ok(),
                "strategy": config.strategy.to_string(),
                "statement": res.statement,
                "diagnostics": res.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            render_diagnostics_pretty(&source, &name, &res.diagnostics);
            print_summary(&res.diagnostics);
            if let Some(statement) = res.statement {
                println!("ok: {statement}");
            }
        }
    }

    exit_on_errors(&res.diagnostics);
    Ok(())
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": id,
                "explanation": diag::explain(id),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            if let Some(text) = diag::explain(id) {
                println!("{}: {}", id.fg(Color::Cyan), text);
            } else {
                println!("{id}: (no explanation available)");
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Input text and a display name for diagnostics.
fn read_input(args: &InputArgs) -> Result<(String, String)> {
    if let Some(text) = &args.input {
        return Ok((text.clone(), String::from("<input>")));
    }
    match args.file.as_deref() {
        Some("-") | None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok((buf, String::from("<stdin>")))
        }
        Some(path) => {
            let text =
                fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
            Ok((text, path.to_string()))
        }
    }
}

/// Exit with code 1 if any diagnostic is an error.
/// Info notes alone do not cause a non-zero exit.
fn exit_on_errors(diagnostics: &[Diagnostic]) {
    if diagnostics.iter().any(Diagnostic::is_error) {
        process::exit(1);
    }
}
