use crate::config::{Columns, ABSENT_MARKER};
use crate::error::Result;
use crate::loader::{Record, Table};

/// Column positions for the six character fields, resolved once per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: usize,
    pub localized_name: usize,
    pub role: usize,
    pub category: usize,
    pub relation_to_protagonist: usize,
    pub other_relations: usize,
}

impl ColumnMap {
    /// Fails with `FieldMissing` on the first configured header the table lacks.
    pub fn resolve(table: &Table, columns: &Columns) -> Result<Self> {
        Ok(Self {
            name: table.column(&columns.name)?,
            localized_name: table.column(&columns.localized_name)?,
            role: table.column(&columns.role)?,
            category: table.column(&columns.category)?,
            relation_to_protagonist: table.column(&columns.relation_to_protagonist)?,
            other_relations: table.column(&columns.other_relations)?,
        })
    }

    pub fn row<'a>(&self, record: &'a Record) -> CharacterRow<'a> {
        let romanized = present(record.get(self.name)).unwrap_or("");
        let localized = present(record.get(self.localized_name)).unwrap_or(romanized);
        CharacterRow {
            index: record.index,
            romanized,
            localized,
            role: present(record.get(self.role)),
            category: present(record.get(self.category)),
            relation_to_protagonist: non_blank(record.get(self.relation_to_protagonist)),
            other_relations: non_blank(record.get(self.other_relations)),
        }
    }

    pub fn rows<'a>(&self, table: &'a Table) -> Vec<CharacterRow<'a>> {
        table.records().iter().map(|r| self.row(r)).collect()
    }
}

/// The character fields of one record, with absent names already defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterRow<'a> {
    pub index: usize,
    /// Empty when the source cell is absent
    pub romanized: &'a str,
    /// Falls back to `romanized`
    pub localized: &'a str,
    pub role: Option<&'a str>,
    pub category: Option<&'a str>,
    pub relation_to_protagonist: Option<&'a str>,
    pub other_relations: Option<&'a str>,
}

impl<'a> CharacterRow<'a> {
    /// Name shown on the node: the localized name, else the romanized one.
    pub fn label(&self) -> &'a str {
        if is_present(self.localized) {
            self.localized
        } else {
            self.romanized
        }
    }
}

pub fn is_present(text: &str) -> bool {
    !text.is_empty() && text != ABSENT_MARKER
}

fn present(cell: Option<&str>) -> Option<&str> {
    cell.filter(|t| is_present(t))
}

fn non_blank(cell: Option<&str>) -> Option<&str> {
    present(cell).filter(|t| !t.trim().is_empty())
}
