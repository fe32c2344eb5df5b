//! CLI tool to inspect and check the tokens of GraphQL documents.

use std::fs;
use std::process::ExitCode;

use graphql_tokens::{Location, tokenize, validate};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: gqltok <command> [files...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  tokens    Print the tokens of each file");
        eprintln!("  check     Check that each file tokenizes cleanly");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  gqltok tokens schema.graphql");
        eprintln!("  gqltok check queries/*.graphql");
        eprintln!();
        eprintln!("Set RUST_LOG=debug for lexer diagnostics.");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let files = &args[2..];

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        match command {
            "tokens" => match tokenize(&content) {
                Ok(tokens) => {
                    for token in &tokens {
                        let Location { line, column } = Location::of(&content, token.start());
                        println!(
                            "{path}:{line}:{column}\t{}..{}\t{token}",
                            token.start(),
                            token.end()
                        );
                    }
                }
                Err(e) => {
                    eprintln!("{path}: {e}");
                    had_error = true;
                }
            },
            "check" => match validate(&content) {
                Ok(tokens) => {
                    eprintln!("{path}: ok ({} token(s))", tokens.len());
                }
                Err(e) => {
                    eprintln!("{path}: {e}");
                    had_error = true;
                }
            },
            _ => {
                eprintln!("Unknown command: {command}");
                return ExitCode::from(2);
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
