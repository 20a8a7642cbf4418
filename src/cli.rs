//! CLI interface using clap
//!
//! Defines all command-line arguments and subcommands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};

use verex::{build, parse_chain, EngineError, EngineType, Expression, Pattern};

use crate::output::json::format_json;
use crate::output::text::{format_build_result, format_replace_result, format_test_result};
use crate::output::{BuildResult, ReplaceResult, TestResult};

#[derive(Parser)]
#[command(name = "verex")]
#[command(author, version, about = "Build regular expressions from readable chains", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Engine used to compile the expression
    #[arg(long, short = 'e', global = true, default_value = "auto")]
    pub engine: EngineChoice,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output (default)
    Json,
    /// Human-readable text
    Text,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum EngineChoice {
    /// regex when possible, fancy-regex for lookaround and backreferences
    Auto,
    /// Standard regex crate only
    Regex,
    /// fancy-regex only
    FancyRegex,
}

/// Where the chain comes from
#[derive(clap::Args)]
pub struct ChainSource {
    /// Chain as a JSON array of steps
    #[arg(long, short = 'c', conflicts_with = "file")]
    pub chain: Option<String>,

    /// File containing the JSON chain
    #[arg(long, short = 'F')]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build an expression and show the resulting pattern
    Build {
        #[command(flatten)]
        source: ChainSource,
    },

    /// Test an expression against input
    Test {
        #[command(flatten)]
        source: ChainSource,

        /// Input text to test against
        input: String,
    },

    /// Replace matches of an expression in input
    Replace {
        #[command(flatten)]
        source: ChainSource,

        /// Input text to transform
        input: String,

        /// The replacement string (supports $1, ${name}, $$)
        replacement: String,
    },
}

/// Parse CLI arguments
pub fn parse() -> Cli {
    Cli::parse()
}

fn load_expression(source: &ChainSource) -> anyhow::Result<Expression> {
    let json = match (&source.chain, &source.file) {
        (Some(chain), _) => chain.clone(),
        (None, Some(path)) => read_chain_file(path)?,
        (None, None) => bail!("No chain given. Use --chain '<json>' or --file <path>"),
    };

    let steps = parse_chain(&json).context("Invalid chain")?;
    tracing::debug!(steps = steps.len(), "parsed chain");
    Ok(build(&steps))
}

fn read_chain_file(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn compile(expression: &Expression, engine: EngineChoice) -> Result<Pattern, EngineError> {
    match engine {
        EngineChoice::Auto => expression.to_regex(),
        EngineChoice::Regex => expression.to_regex_with(EngineType::Regex),
        EngineChoice::FancyRegex => expression.to_regex_with(EngineType::FancyRegex),
    }
}

/// Handle the build command
pub fn handle_build(
    source: &ChainSource,
    engine: EngineChoice,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let expression = load_expression(source)?;
    let compiled = compile(&expression, engine);

    let result = BuildResult {
        pattern: expression.pattern(),
        prefix: expression.prefix().to_string(),
        source: expression.source().into_owned(),
        suffix: expression.suffix().to_string(),
        flags: expression.flags().to_string(),
        display: expression.to_string(),
        open_captures: expression.open_captures(),
        valid: compiled.is_ok(),
        engine: compiled.as_ref().ok().map(Pattern::engine),
        error: compiled.as_ref().err().map(ToString::to_string),
    };

    match format {
        OutputFormat::Json => Ok(format_json(&result)),
        OutputFormat::Text => Ok(format_build_result(&result)),
    }
}

/// Handle the test command
pub fn handle_test(
    source: &ChainSource,
    input: &str,
    engine: EngineChoice,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let expression = load_expression(source)?;
    let pattern = compile(&expression, engine)?;
    let matches = pattern.matches(input)?;

    let result = TestResult {
        pattern: pattern.as_str().to_string(),
        flags: pattern.flags().to_string(),
        engine: pattern.engine(),
        input_length: input.len(),
        matched: !matches.is_empty(),
        match_count: matches.len(),
        matches,
    };

    match format {
        OutputFormat::Json => Ok(format_json(&result)),
        OutputFormat::Text => Ok(format_test_result(&result)),
    }
}

/// Handle the replace command
pub fn handle_replace(
    source: &ChainSource,
    input: &str,
    replacement: &str,
    engine: EngineChoice,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let expression = load_expression(source)?;
    let pattern = compile(&expression, engine)?;

    let replacements_made = pattern.matches(input)?.len();

    let result = ReplaceResult {
        pattern: pattern.as_str().to_string(),
        flags: pattern.flags().to_string(),
        replacement: replacement.to_string(),
        original: input.to_string(),
        result: pattern.replace(input, replacement)?,
        global: pattern.flags().is_global(),
        replacements_made,
    };

    match format {
        OutputFormat::Json => Ok(format_json(&result)),
        OutputFormat::Text => Ok(format_replace_result(&result)),
    }
}
