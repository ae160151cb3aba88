//! Benchmark utilities.

use lexidb_core::{NewEntry, Store, Table};
use rand::seq::SliceRandom;
use rand::Rng;

const TOPICS: [&str; 6] = ["Food", "Travel", "Sports", "Work", "Health", "Music"];

/// Generate a random lowercase word of 3 to 10 letters.
pub fn random_word<R: Rng>(rng: &mut R) -> String {
    let len = rng.gen_range(3..=10);
    (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
}

/// Generate `count` entries with random words, topics, and phrases.
pub fn generate_entries(count: usize) -> Vec<NewEntry> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let topic = TOPICS.choose(&mut rng).copied().unwrap_or("Misc");
            let phrases: Vec<String> = (0..rng.gen_range(0..4))
                .map(|_| format!("{} {}", random_word(&mut rng), random_word(&mut rng)))
                .collect();
            NewEntry::new(random_word(&mut rng), topic)
                .meaning(format!("meaning of {}", random_word(&mut rng)))
                .phrases(phrases)
                .familiarity(rng.gen_range(1..=5))
        })
        .collect()
}

/// Generate an import table of `rows` rows.
pub fn generate_table(rows: usize) -> Table {
    let mut rng = rand::thread_rng();
    let mut table = Table::new(["word", "topic", "meaning", "phrases", "familiarity"]);
    for _ in 0..rows {
        let topic = TOPICS.choose(&mut rng).copied().unwrap_or("Misc");
        table.push_row([
            random_word(&mut rng),
            topic.to_string(),
            random_word(&mut rng),
            format!("{}; {}", random_word(&mut rng), random_word(&mut rng)),
            rng.gen_range(1..=5).to_string(),
        ]);
    }
    table
}

/// Open an in-memory store holding `count` random entries.
pub fn populated_store(count: usize) -> Store {
    let store = Store::open_in_memory();
    let table = generate_table(count);
    store
        .import_tabular(&table)
        .expect("in-memory import cannot fail");
    store
}
