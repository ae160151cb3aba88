//! CSV import and export.
//!
//! The store speaks [`Table`]; this module converts between tables and CSV
//! files. Exports start with a UTF-8 byte order mark so spreadsheet tools
//! pick the right encoding.

use lexidb_core::{Store, Table};
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Default export file name inside the store's export directory.
pub const DEFAULT_EXPORT_FILE: &str = "vocab_export.csv";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Runs the import command.
pub fn import(store: &Store, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!("Importing entries from {:?}", path);

    let table = read_csv(File::open(path)?)?;
    let processed = store.import_tabular(&table)?;

    println!("✓ Imported {processed} of {} rows", table.len());
    if processed < table.len() {
        println!("  {} row(s) skipped (blank word or topic)", table.len() - processed);
    }
    Ok(())
}

/// Runs the export command.
pub fn export(store: &Store, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => default_export_path(store)?,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let table = store.export_tabular();
    let mut file = BufWriter::new(File::create(&path)?);
    write_csv(&mut file, &table)?;
    file.into_inner().map_err(|e| e.into_error())?.sync_all()?;

    println!("✓ Exported {} entries", table.len());
    println!("  Path: {}", path.display());
    Ok(())
}

fn default_export_path(store: &Store) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let dir = store
        .dir()
        .ok_or("store has no export directory; pass --output")?;
    Ok(dir.export_dir().join(DEFAULT_EXPORT_FILE))
}

/// Reads a CSV document into a table. The first record is the header row.
pub fn read_csv<R: Read>(reader: R) -> Result<Table, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let mut table = Table::new(reader.headers()?.iter());
    for record in reader.records() {
        table.push_row(record?.iter());
    }
    Ok(table)
}

/// Writes a table as CSV, preceded by a UTF-8 byte order mark.
pub fn write_csv<W: Write>(mut out: W, table: &Table) -> Result<(), Box<dyn std::error::Error>> {
    out.write_all(UTF8_BOM)?;
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
