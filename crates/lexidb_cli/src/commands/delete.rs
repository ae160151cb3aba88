//! Delete command implementation.

use super::resolve_ids;
use lexidb_core::Store;

/// Runs the delete command.
pub fn run(store: &Store, ids: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let ids = resolve_ids(&store.load_all(), ids)?;
    let removed = store.delete_entries(&ids)?;
    println!("✓ Deleted {removed} of {} entries", ids.len());
    Ok(())
}
