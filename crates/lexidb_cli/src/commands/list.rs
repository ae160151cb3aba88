//! List command implementation.

use super::short_id;
use clap::Args;
use lexidb_core::{Entry, EntryFilter, Store};

/// Arguments of the list command.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only show these topics (repeatable)
    #[arg(short, long = "topic")]
    pub topics: Vec<String>,

    /// Minimum familiarity
    #[arg(long, default_value_t = 1)]
    pub min: u32,

    /// Maximum familiarity
    #[arg(long, default_value_t = 5)]
    pub max: u32,

    /// Case-insensitive text search over word, meaning, example, phrases
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// List topics instead of entries
    #[arg(long)]
    pub topics_only: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

/// Runs the list command.
pub fn run(store: &Store, args: &ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.topics_only {
        for topic in store.topics() {
            println!("{topic}");
        }
        return Ok(());
    }

    let mut filter = EntryFilter::new()
        .topics(args.topics.iter().cloned())
        .familiarity_range(args.min, args.max);
    if let Some(keyword) = &args.keyword {
        filter = filter.keyword(keyword);
    }
    let entries = store.filter(&filter);

    match args.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        _ => {
            print_text_output(&entries);
        }
    }

    Ok(())
}

fn print_text_output(entries: &[Entry]) {
    if entries.is_empty() {
        println!("No entries.");
        return;
    }

    println!(
        "{:<8}  {:<20} {:<14} {:>3}  {}",
        "ID", "WORD", "TOPIC", "FAM", "MEANING"
    );
    for entry in entries {
        println!(
            "{:<8}  {:<20} {:<14} {:>3}  {}",
            short_id(&entry.id),
            entry.word,
            entry.topic,
            entry.familiarity,
            entry.meaning
        );
    }
    println!();
    println!("{} entries", entries.len());
}
