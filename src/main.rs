//! verex - build regular expressions from readable chains
//!
//! Replays a JSON chain of builder steps and prints the pattern, matches or
//! replacement result.

mod cli;
mod output;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    use cli::{parse, Commands};

    init_tracing();
    let args = parse();

    // If no command, show help
    let Some(command) = args.command else {
        eprintln!("verex: build regular expressions from readable chains");
        eprintln!();
        eprintln!("Usage: verex <COMMAND>");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  build    Build an expression and show the resulting pattern");
        eprintln!("  test     Test an expression against input");
        eprintln!("  replace  Replace matches of an expression in input");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  -c, --chain <JSON>     Chain of steps, e.g. '[{{\"op\":\"find\",\"value\":\"foo\"}}]'");
        eprintln!("  -F, --file <PATH>      Read the chain from a file");
        eprintln!("  -f, --format <FORMAT>  Output format [json|text] (default: json)");
        eprintln!("  -e, --engine <ENGINE>  Engine [auto|regex|fancy-regex] (default: auto)");
        eprintln!("  -h, --help             Print help");
        eprintln!("  -V, --version          Print version");
        return ExitCode::SUCCESS;
    };

    let format = args.format;
    let engine = args.engine;

    let result = match command {
        Commands::Build { source } => cli::handle_build(&source, engine, format),
        Commands::Test { source, input } => cli::handle_test(&source, &input, engine, format),
        Commands::Replace {
            source,
            input,
            replacement,
        } => cli::handle_replace(&source, &input, &replacement, engine, format),
    };

    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            // Output error as structured JSON
            let error = output::ErrorResponse::new("COMMAND_ERROR", format!("{:#}", e));
            let error_json = serde_json::to_string(&error)
                .unwrap_or_else(|_| format!(r#"{{"error":true,"message":"{}"}}"#, e));
            eprintln!("{}", error_json);
            ExitCode::FAILURE
        }
    }
}
