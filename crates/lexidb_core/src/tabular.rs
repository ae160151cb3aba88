//! Tabular import/export boundary.
//!
//! A [`Table`] is a header row plus string rows, the shape a CSV reader
//! produces and a CSV writer consumes. CSV encoding itself is left to the
//! caller.
//!
//! Import resolves columns once per call through a [`ColumnMap`]: header
//! names are matched case-insensitively (surrounding whitespace and a UTF-8
//! byte order mark are ignored) and must include `word` and `topic`.

use crate::entry::{Entry, NewEntry};
use crate::error::{CoreError, CoreResult};
use std::collections::HashMap;

/// A field of an entry as it appears in tabular form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Entry identifier.
    Id,
    /// Primary label.
    Word,
    /// Pronunciation.
    Phonetic,
    /// Definition.
    Meaning,
    /// Grouping label.
    Topic,
    /// Example sentence.
    Example,
    /// Phrases, `"; "`-joined on export.
    Phrases,
    /// Familiarity score.
    Familiarity,
    /// Free-form notes.
    Notes,
    /// Creation timestamp.
    CreatedAt,
    /// Last update timestamp.
    UpdatedAt,
}

impl Field {
    /// All fields in export column order.
    pub const ALL: [Field; 11] = [
        Field::Id,
        Field::Word,
        Field::Phonetic,
        Field::Meaning,
        Field::Topic,
        Field::Example,
        Field::Phrases,
        Field::Familiarity,
        Field::Notes,
        Field::CreatedAt,
        Field::UpdatedAt,
    ];

    /// Returns the column name of this field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Word => "word",
            Field::Phonetic => "phonetic",
            Field::Meaning => "meaning",
            Field::Topic => "topic",
            Field::Example => "example",
            Field::Phrases => "phrases",
            Field::Familiarity => "familiarity",
            Field::Notes => "notes",
            Field::CreatedAt => "created_at",
            Field::UpdatedAt => "updated_at",
        }
    }

    fn cell(self, entry: &Entry) -> String {
        match self {
            Field::Id => entry.id.to_string(),
            Field::Word => entry.word.clone(),
            Field::Phonetic => entry.phonetic.clone(),
            Field::Meaning => entry.meaning.clone(),
            Field::Topic => entry.topic.clone(),
            Field::Example => entry.example.clone(),
            Field::Phrases => entry.phrases_text(),
            Field::Familiarity => entry.familiarity.to_string(),
            Field::Notes => entry.notes.clone(),
            Field::CreatedAt => entry.created_at.to_string(),
            Field::UpdatedAt => entry.updated_at.to_string(),
        }
    }
}

/// Rows of named string fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates an empty table with the given header row.
    #[must_use]
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row. Short rows read as empty cells; extra cells are kept
    /// but have no column name.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Builder-style [`Table::push_row`].
    #[must_use]
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(cells);
        self
    }

    /// Returns the header row.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Returns the data rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Returns the number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the cell of `row` under the column named `column`, matched
    /// exactly.
    #[must_use]
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.headers.iter().position(|h| h == column)?;
        self.rows.get(row)?.get(index).map(String::as_str)
    }
}

/// Normalizes a header for case-insensitive matching.
fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Column positions of the importable fields, resolved once per import.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    word: usize,
    topic: usize,
    optional: HashMap<Field, usize>,
}

impl ColumnMap {
    /// Fields read from an import besides `word` and `topic`.
    const OPTIONAL: [Field; 6] = [
        Field::Phonetic,
        Field::Meaning,
        Field::Example,
        Field::Phrases,
        Field::Familiarity,
        Field::Notes,
    ];

    /// Resolves the columns of `headers`.
    ///
    /// When two headers normalize to the same name, the later one wins.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingColumns`] if `word` or `topic` is absent.
    pub fn resolve(headers: &[String]) -> CoreResult<Self> {
        let by_name: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(index, header)| (normalize_header(header), index))
            .collect();

        let word = by_name.get(Field::Word.name()).copied();
        let topic = by_name.get(Field::Topic.name()).copied();
        let (word, topic) = match (word, topic) {
            (Some(word), Some(topic)) => (word, topic),
            (word, topic) => {
                let missing = [(Field::Word, word), (Field::Topic, topic)]
                    .into_iter()
                    .filter(|(_, index)| index.is_none())
                    .map(|(field, _)| field.name());
                return Err(CoreError::missing_columns(missing));
            }
        };

        let optional = Self::OPTIONAL
            .iter()
            .filter_map(|field| by_name.get(field.name()).map(|&index| (*field, index)))
            .collect();

        Ok(Self {
            word,
            topic,
            optional,
        })
    }

    fn cell<'a>(&self, row: &'a [String], field: Field) -> &'a str {
        let index = match field {
            Field::Word => Some(self.word),
            Field::Topic => Some(self.topic),
            other => self.optional.get(&other).copied(),
        };
        index
            .and_then(|i| row.get(i))
            .map_or("", |cell| cell.as_str())
    }

    /// Builds the entry for one row, or `None` if its word or topic is blank.
    pub(crate) fn entry_for(&self, row: &[String]) -> Option<NewEntry> {
        let word = self.cell(row, Field::Word).trim();
        let topic = self.cell(row, Field::Topic).trim();
        if word.is_empty() || topic.is_empty() {
            return None;
        }

        Some(
            NewEntry::new(word, topic)
                .phonetic(self.cell(row, Field::Phonetic))
                .meaning(self.cell(row, Field::Meaning))
                .example(self.cell(row, Field::Example))
                .phrases(split_phrases(self.cell(row, Field::Phrases)))
                .familiarity_literal(self.cell(row, Field::Familiarity))
                .notes(self.cell(row, Field::Notes)),
        )
    }
}

/// Splits a phrases cell on `;` or newlines into trimmed, non-empty tokens.
#[must_use]
pub fn split_phrases(cell: &str) -> Vec<String> {
    cell.split([';', '\n'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Converts entries into an export table, one row per entry in the given
/// order.
#[must_use]
pub fn entries_to_table(entries: &[Entry]) -> Table {
    let mut table = Table::new(Field::ALL.iter().map(|f| f.name()));
    for entry in entries {
        table.push_row(Field::ALL.iter().map(|f| f.cell(entry)));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let map = ColumnMap::resolve(&headers(&["\u{feff}Word", " TOPIC ", "Meaning"])).unwrap();
        let row = headers(&["run", "sports", "to move fast"]);
        let entry = map.entry_for(&row).unwrap().build();
        assert_eq!(entry.word, "run");
        assert_eq!(entry.topic, "sports");
        assert_eq!(entry.meaning, "to move fast");
    }

    #[test]
    fn resolve_reports_missing_columns() {
        let err = ColumnMap::resolve(&headers(&["meaning"])).unwrap_err();
        match err {
            CoreError::MissingColumns { missing } => assert_eq!(missing, vec!["word", "topic"]),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = ColumnMap::resolve(&headers(&["word"])).unwrap_err();
        match err {
            CoreError::MissingColumns { missing } => assert_eq!(missing, vec!["topic"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_identity_rows_are_skipped() {
        let map = ColumnMap::resolve(&headers(&["word", "topic"])).unwrap();
        assert!(map.entry_for(&headers(&["  ", "sports"])).is_none());
        assert!(map.entry_for(&headers(&["run", ""])).is_none());
        assert!(map.entry_for(&headers(&["run"])).is_none());
    }

    #[test]
    fn row_cells_are_parsed() {
        let map = ColumnMap::resolve(&headers(&[
            "word",
            "topic",
            "phrases",
            "familiarity",
            "notes",
        ]))
        .unwrap();

        let entry = map
            .entry_for(&headers(&["run", "sports", "run out;\nrun into ; ", "3", " n "]))
            .unwrap()
            .build();
        assert_eq!(entry.phrases, vec!["run out", "run into"]);
        assert_eq!(entry.familiarity, 3);
        assert_eq!(entry.notes, "n");

        let entry = map
            .entry_for(&headers(&["run", "sports", "", "high", ""]))
            .unwrap()
            .build();
        assert!(entry.phrases.is_empty());
        assert_eq!(entry.familiarity, 1);
    }

    #[test]
    fn split_phrases_handles_separators() {
        assert_eq!(split_phrases("a; b;c"), vec!["a", "b", "c"]);
        assert_eq!(split_phrases("a\r\nb"), vec!["a", "b"]);
        assert!(split_phrases(" ; ;\n").is_empty());
    }

    #[test]
    fn export_flattens_phrases() {
        let entry = NewEntry::new("run", "sports")
            .phrases(["jump", "run"])
            .familiarity(2)
            .build();
        let table = entries_to_table(std::slice::from_ref(&entry));

        assert_eq!(table.headers()[0], "id");
        assert_eq!(table.headers().len(), 11);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0, "phrases"), Some("jump; run"));
        assert_eq!(table.get(0, "familiarity"), Some("2"));
        assert_eq!(table.get(0, "id"), Some(entry.id.as_str()));
    }

    #[test]
    fn table_get_handles_short_rows() {
        let table = Table::new(["word", "topic"]).with_row(["run"]);
        assert_eq!(table.get(0, "word"), Some("run"));
        assert_eq!(table.get(0, "topic"), None);
        assert_eq!(table.get(1, "word"), None);
    }
}
