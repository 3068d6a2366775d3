mod cli;
mod lines_cmd;
mod output;
mod parse_cmd;

use clap::Parser;
use cli::{Cli, Commands};
use municourt::StatsExtractor;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut builder = StatsExtractor::builder().kerning_threshold(cli.kerning_threshold);
    if let Some(password) = cli.password {
        builder = builder.password(password);
    }
    let extractor = builder.build();

    let result = match cli.command {
        Commands::Parse {
            ref input,
            ref json,
            ref csv,
        } => parse_cmd::run(&extractor, input, json.as_deref(), csv.as_deref()),
        Commands::Lines { ref file, page } => lines_cmd::run(&extractor, file, page),
    };

    if let Err(e) = result {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
