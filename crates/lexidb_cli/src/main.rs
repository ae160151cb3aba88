//! LexiDB CLI
//!
//! Command-line front end for a LexiDB vocabulary store.
//!
//! # Commands
//!
//! - `add` - Add an entry, merging into an existing `(word, topic)`
//! - `list` - List entries, most recently updated first
//! - `bump` / `set` - Change familiarity of one or more entries
//! - `delete` - Remove entries
//! - `import` / `export` - Exchange entries as CSV
//! - `backups` - List backup snapshots

mod commands;

use clap::{Parser, Subcommand};
use commands::add::AddArgs;
use commands::list::ListArgs;
use lexidb_core::{Config, Store};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// LexiDB personal vocabulary store.
#[derive(Parser)]
#[command(name = "lexidb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the store directory
    #[arg(global = true, short, long, default_value = ".")]
    root: PathBuf,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an entry, merging into an existing one with the same word and topic
    Add(AddArgs),

    /// List entries, most recently updated first
    List(ListArgs),

    /// Add a delta to the familiarity of entries
    Bump {
        /// Entry ids or unique id prefixes
        #[arg(required = true)]
        ids: Vec<String>,

        /// Amount to add (negative to lower)
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        delta: i64,
    },

    /// Set the familiarity of entries
    Set {
        /// New familiarity, clamped to 1..=5
        #[arg(allow_negative_numbers = true)]
        value: i64,

        /// Entry ids or unique id prefixes
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Delete entries
    Delete {
        /// Entry ids or unique id prefixes
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Import entries from a CSV file with at least `word` and `topic` columns
    Import {
        /// CSV file to read
        file: PathBuf,
    },

    /// Export all entries to a CSV file
    Export {
        /// Output file (defaults to the store's export directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List backup snapshots, oldest first
    Backups,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Commands::Version = cli.command {
        println!("LexiDB CLI v{}", env!("CARGO_PKG_VERSION"));
        println!("LexiDB Core v{}", lexidb_core::VERSION);
        return Ok(());
    }

    let store = Store::open(&Config::new(&cli.root))?;

    match cli.command {
        Commands::Add(args) => commands::add::run(&store, args)?,
        Commands::List(args) => commands::list::run(&store, &args)?,
        Commands::Bump { ids, delta } => commands::familiarity::bump(&store, &ids, delta)?,
        Commands::Set { value, ids } => commands::familiarity::set(&store, &ids, value)?,
        Commands::Delete { ids } => commands::delete::run(&store, &ids)?,
        Commands::Import { file } => commands::transfer::import(&store, &file)?,
        Commands::Export { output } => commands::transfer::export(&store, output.as_deref())?,
        Commands::Backups => commands::backups::run(&store)?,
        Commands::Version => {}
    }

    Ok(())
}
