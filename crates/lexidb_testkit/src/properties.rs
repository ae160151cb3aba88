//! Property tests for merge-on-write, familiarity, and backups.

use crate::fixtures::TestStore;
use crate::generators::{import_table_strategy, new_entry_strategy, PropTestConfig, IMPORT_COLUMNS};
use lexidb_core::{familiarity, MergeOutcome, NewEntry};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn identity(word: &str, topic: &str) -> (String, String) {
    (word.trim().to_lowercase(), topic.trim().to_lowercase())
}

proptest! {
    #![proptest_config(PropTestConfig::quick().to_proptest_config())]

    #[test]
    fn same_identity_merges_into_one_row(
        a in new_entry_strategy(),
        b in new_entry_strategy(),
    ) {
        let store = TestStore::memory();
        let first = a.build_at(store.now());
        prop_assert_eq!(store.add_entry(first.clone()).unwrap(), MergeOutcome::Appended);

        store.tick();
        let mut second = b.build_at(store.now());
        second.word = first.word.to_uppercase();
        second.topic = first.topic.to_lowercase();
        prop_assert_eq!(store.add_entry(second.clone()).unwrap(), MergeOutcome::Merged);

        let rows = store.load_all();
        prop_assert_eq!(rows.len(), 1);
        let merged = &rows[0];

        prop_assert_eq!(&merged.id, &first.id);
        prop_assert_eq!(&merged.word, &first.word);
        prop_assert_eq!(&merged.created_at, &first.created_at);
        prop_assert_eq!(&merged.updated_at, &store.now());

        let preferred = |existing: &String, incoming: &String| {
            if incoming.is_empty() { existing.clone() } else { incoming.clone() }
        };
        prop_assert_eq!(&merged.meaning, &preferred(&first.meaning, &second.meaning));
        prop_assert_eq!(&merged.example, &preferred(&first.example, &second.example));

        let union: Vec<String> = first
            .phrases
            .iter()
            .chain(second.phrases.iter())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        prop_assert_eq!(&merged.phrases, &union);

        let expected = familiarity::clamp(i64::from(first.familiarity.max(second.familiarity)));
        prop_assert_eq!(merged.familiarity, expected);
    }

    #[test]
    fn adds_keep_one_row_per_identity(
        batch in prop::collection::vec(new_entry_strategy(), 1..20),
    ) {
        let store = TestStore::memory();
        let mut identities = BTreeSet::new();
        for new in batch {
            let entry = new.build_at(store.now());
            identities.insert(identity(&entry.word, &entry.topic));
            store.add_entry(entry).unwrap();
            store.tick();
        }

        let rows = store.load_all();
        prop_assert_eq!(rows.len(), identities.len());
        for row in &rows {
            prop_assert!((1..=5).contains(&row.familiarity));
        }
    }

    #[test]
    fn familiarity_updates_stay_in_range(start in 1i64..=5, delta in -20i64..20) {
        let store = TestStore::memory();
        store.add(NewEntry::new("run", "sports")).unwrap();
        let id = store.load_all()[0].id.clone();

        prop_assert!(store.set_familiarity(&id, start).unwrap());
        prop_assert!(store.update_familiarity(&id, delta).unwrap());
        prop_assert_eq!(store.load_all()[0].familiarity, familiarity::clamp(start + delta));
    }

    #[test]
    fn every_mutation_backs_up_previous_file(deltas in prop::collection::vec(-3i64..3, 1..6)) {
        let store = TestStore::file();
        store.add(NewEntry::new("run", "sports").familiarity(3)).unwrap();
        let before_first = store.raw_file().unwrap();
        let id = store.load_all()[0].id.clone();

        let mut previous = before_first.clone();
        for delta in &deltas {
            store.tick();
            store.update_familiarity(&id, *delta).unwrap();

            let backups = store.list_backups().unwrap();
            let latest = backups.last().unwrap();
            prop_assert!(store.read_backup(latest).unwrap() == previous);
            previous = store.raw_file().unwrap();
        }

        let backups = store.list_backups().unwrap();
        prop_assert!(backups.len() >= deltas.len());
        prop_assert_eq!(store.read_backup(&backups[0]).unwrap(), before_first);
    }

    #[test]
    fn import_is_one_persist(table in import_table_strategy(1, 60)) {
        let store = TestStore::memory();
        store.add(NewEntry::new("seed", "Misc")).unwrap();
        store.tick();

        let processed = store.import_tabular(&table).unwrap();
        prop_assert_eq!(processed, table.len());
        prop_assert_eq!(store.list_backups().unwrap().len(), 1);

        let word = IMPORT_COLUMNS[0];
        let topic = IMPORT_COLUMNS[1];
        let mut identities: BTreeSet<_> = (0..table.len())
            .map(|row| identity(table.get(row, word).unwrap(), table.get(row, topic).unwrap()))
            .collect();
        identities.insert(identity("seed", "Misc"));
        prop_assert_eq!(store.load_all().len(), identities.len());
    }
}
