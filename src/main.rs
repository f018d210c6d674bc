use std::path::PathBuf;

use clap::Parser;
use leaf_db::start_repl;
use log::LevelFilter;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the database file
    file: Option<PathBuf>,

    /// Enables verbose tracing
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let Some(path) = cli.file else {
        eprintln!("Usage: db <db_filename> [--debug]");
        std::process::exit(1);
    };

    env_logger::Builder::new()
        .filter_level(if cli.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .target(env_logger::Target::Stdout)
        .init();

    if cli.debug {
        println!("Debug mode enabled.");
    }

    start_repl("db".into(), path)
}
