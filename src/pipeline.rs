use crate::config::BookConfig;
use crate::error::Result;
use crate::identity::{self, CollisionPolicy};
use crate::loader::Table;
use crate::models::Book;
use crate::relations;
use crate::row::ColumnMap;
use crate::stats::ConversionStats;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

pub struct Conversion {
    pub book: Book,
    pub stats: ConversionStats,
}

/// Run identity resolution then relation extraction over a loaded table.
pub fn convert(table: &Table, config: &BookConfig, policy: CollisionPolicy) -> Result<Conversion> {
    let columns = ColumnMap::resolve(table, &config.columns)?;
    let rows = columns.rows(table);

    let identities = identity::resolve(&rows, &config.protagonist, policy)?;
    let hub = identities
        .protagonist_found
        .then_some(config.protagonist.id.as_str());
    let relations = relations::extract(&rows, &identities.names, hub);

    let stats = ConversionStats::new(table.len(), &identities, &relations);
    let book = Book::new(&config.book, identities.nodes, relations.edges);

    Ok(Conversion { book, stats })
}

/// Two-space indented JSON; non-ASCII text is written as-is.
pub fn render_book(book: &Book) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(book)?)
}

pub fn write_book(book: &Book, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&render_book(book)?)?;
    writer.flush()?;

    info!(
        path = %path.display(),
        nodes = book.nodes.len(),
        edges = book.edges.len(),
        "Book written"
    );
    Ok(())
}
