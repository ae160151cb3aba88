//! Familiarity commands.

use super::resolve_ids;
use lexidb_core::Store;

/// Adds `delta` to the familiarity of each entry in `ids`.
pub fn bump(store: &Store, ids: &[String], delta: i64) -> Result<(), Box<dyn std::error::Error>> {
    let ids = resolve_ids(&store.load_all(), ids)?;
    let changed = store.update_familiarity_batch(&ids, delta)?;
    report(changed, ids.len());
    Ok(())
}

/// Sets the familiarity of each entry in `ids` to `value`.
pub fn set(store: &Store, ids: &[String], value: i64) -> Result<(), Box<dyn std::error::Error>> {
    let ids = resolve_ids(&store.load_all(), ids)?;
    let changed = store.set_familiarity_batch(&ids, value)?;
    report(changed, ids.len());
    Ok(())
}

fn report(changed: usize, requested: usize) {
    println!("✓ Updated {changed} of {requested} entries");
    if changed < requested {
        println!("  {} id(s) not found", requested - changed);
    }
}
