//! Add command implementation.

use clap::Args;
use lexidb_core::{MergeOutcome, NewEntry, Store};

/// Arguments of the add command.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// The word or expression
    pub word: String,

    /// Topic the entry belongs to
    pub topic: String,

    /// Pronunciation
    #[arg(long, default_value = "")]
    pub phonetic: String,

    /// Definition
    #[arg(short, long, default_value = "")]
    pub meaning: String,

    /// Example sentence
    #[arg(short, long, default_value = "")]
    pub example: String,

    /// A useful phrase (repeatable)
    #[arg(short, long = "phrase")]
    pub phrases: Vec<String>,

    /// Familiarity, 1 (new) to 5 (mastered)
    #[arg(short, long, default_value_t = 1)]
    pub familiarity: u32,

    /// Free-form notes
    #[arg(short, long, default_value = "")]
    pub notes: String,
}

impl AddArgs {
    fn into_new_entry(self) -> NewEntry {
        NewEntry::new(self.word, self.topic)
            .phonetic(self.phonetic)
            .meaning(self.meaning)
            .example(self.example)
            .phrases(self.phrases)
            .familiarity(self.familiarity)
            .notes(self.notes)
    }
}

/// Runs the add command.
pub fn run(store: &Store, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let label = format!("{} [{}]", args.word.trim(), args.topic.trim());
    if args.word.trim().is_empty() || args.topic.trim().is_empty() {
        return Err("word and topic must not be blank".into());
    }

    match store.add(args.into_new_entry())? {
        MergeOutcome::Appended => println!("✓ Added {label}"),
        MergeOutcome::Merged => println!("✓ Merged into existing entry {label}"),
    }
    Ok(())
}
