mod catalog;
mod cli;
mod error;
mod fmt;
mod headers;
mod ingest;
mod logging;
mod models;
mod normalizer;
mod report;
mod settings;

use clap::Parser;

use cli::{Cli, Commands, Context};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = Context::from_cli(&cli).and_then(|ctx| match cli.command {
        None => cli::interactive::run(&ctx),
        Some(Commands::Search { query }) => cli::search::run(&ctx, &query),
        Some(Commands::Export { output, format }) => {
            cli::export::run(&ctx, output, format.as_deref())
        }
        Some(Commands::Scan) => cli::scan::run(&ctx),
        Some(Commands::Config { init }) => cli::config::run(&ctx, init),
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
