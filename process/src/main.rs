use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use store::FactStore;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory containing math/, trivia/, years/ and dates/ dump directories
    data_dir: PathBuf,

    /// SQLite database to populate
    #[arg(long, default_value = "facts.db")]
    database: PathBuf,

    /// Drop and recreate the schema before importing
    #[arg(long)]
    reset: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let store = FactStore::open(&args.database)?;
    if args.reset {
        println!("Resetting {}", args.database.display());
        store.reset()?;
    }

    let stats = process::import_all(&store, &args.data_dir)?;
    println!("Total: {} inserted, {} skipped", stats.inserted, stats.skipped);

    Ok(())
}
