use crate::config::Columns;
use crate::error::Result;
use crate::loader::Table;
use std::io::Write;

/// Print headers, row count and the name/relation fields of the first `rows` records.
pub fn describe<W: Write>(table: &Table, columns: &Columns, rows: usize, out: &mut W) -> Result<()> {
    let shown = [
        columns.name.as_str(),
        columns.localized_name.as_str(),
        columns.relation_to_protagonist.as_str(),
        columns.other_relations.as_str(),
    ];
    let positions = shown
        .iter()
        .map(|name| table.column(name))
        .collect::<Result<Vec<_>>>()?;

    writeln!(out, "Columns:")?;
    for header in table.headers() {
        writeln!(out, "  - {}", header)?;
    }
    writeln!(out)?;
    writeln!(out, "Total rows: {}", table.len())?;

    for record in table.records().iter().take(rows) {
        writeln!(out)?;
        writeln!(out, "=== Row {} ===", record.index + 1)?;
        for (name, &col) in shown.iter().zip(&positions) {
            writeln!(out, "{}: {}", name, record.get(col).unwrap_or("-"))?;
        }
    }
    Ok(())
}
