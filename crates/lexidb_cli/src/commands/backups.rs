//! Backup listing.

use lexidb_core::Store;

/// Lists backup snapshots, oldest first.
pub fn run(store: &Store) -> Result<(), Box<dyn std::error::Error>> {
    let backups = store.list_backups()?;
    if backups.is_empty() {
        println!("No backups yet.");
        return Ok(());
    }

    let dir = store.dir().map(|d| d.backup_dir().display().to_string());
    for name in &backups {
        match &dir {
            Some(dir) => println!("{dir}/{name}"),
            None => println!("{name}"),
        }
    }
    println!();
    println!("{} backups", backups.len());
    Ok(())
}
