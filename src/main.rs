//! docblock CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use docblock_engine::cli::{Cli, Commands};
use docblock_engine::commands::{run_languages, run_parse, run_render, CommandContext};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run(cli: &Cli) -> docblock_engine::Result<String> {
    let ctx = CommandContext::from_cli(cli);

    match &cli.command {
        Commands::Render(args) => run_render(args, &ctx),
        Commands::Parse(args) => run_parse(args, &ctx),
        Commands::Languages => run_languages(&ctx),
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "docblock_engine=debug"
    } else {
        "docblock_engine=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
