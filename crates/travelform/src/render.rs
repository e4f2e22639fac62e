//! Read-only rendering of the stored record list.

use std::io::Write;

use crate::error::Result;
use crate::record::StoredRecord;

/// Text shown for an absent passport number or photo.
const NONE_TEXT: &str = "Tidak ada";

/// How the list is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFormat {
    /// One block per record, like the card list of the form page.
    #[default]
    Plain,
    /// One row per record.
    Table,
    /// The stored JSON list.
    Json,
}

/// Write the record list in the chosen format.
///
/// # Errors
///
/// Returns an error if writing or JSON serialization fails.
pub fn render<W: Write>(records: &[StoredRecord], format: ListFormat, out: &mut W) -> Result<()> {
    match format {
        ListFormat::Plain => render_plain(records, out),
        ListFormat::Table => render_table(records, out),
        ListFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, records)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn or_none(value: &str) -> &str {
    if value.is_empty() {
        NONE_TEXT
    } else {
        value
    }
}

fn render_plain<W: Write>(records: &[StoredRecord], out: &mut W) -> Result<()> {
    writeln!(out, "Data Tersimpan ({})", records.len())?;

    if records.is_empty() {
        writeln!(out)?;
        writeln!(out, "Belum ada data tersimpan")?;
        writeln!(out, "Silakan isi form untuk menambah data")?;
        return Ok(());
    }

    for record in records {
        let draft = &record.draft;
        writeln!(out)?;
        writeln!(out, "{}", draft.nama)?;
        writeln!(out, "  Tanggal Lahir:  {}", draft.tanggal_lahir)?;
        writeln!(out, "  Jenis Kelamin:  {}", draft.jenis_kelamin)?;
        writeln!(out, "  Nomor Passport: {}", or_none(&draft.nomor_passport))?;
        match record.photo_link() {
            Some(link) => writeln!(out, "  Foto Passport:  Lihat Foto: {link}")?,
            None => writeln!(out, "  Foto Passport:  {NONE_TEXT}")?,
        }
    }
    Ok(())
}

fn render_table<W: Write>(records: &[StoredRecord], out: &mut W) -> Result<()> {
    const HEADERS: [&str; 5] = [
        "Nama",
        "Tanggal Lahir",
        "Jenis Kelamin",
        "Nomor Passport",
        "Foto Passport",
    ];

    let rows: Vec<[&str; 5]> = records
        .iter()
        .map(|r| {
            [
                r.draft.nama.as_str(),
                r.draft.tanggal_lahir.as_str(),
                r.draft.jenis_kelamin.as_str(),
                or_none(&r.draft.nomor_passport),
                r.photo_link().unwrap_or(NONE_TEXT),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, &HEADERS, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join("  "))?;
    for row in &rows {
        write_row(out, row, &widths)?;
    }
    writeln!(out, "({} records)", records.len())?;
    Ok(())
}

fn write_row<W: Write>(out: &mut W, cells: &[&str], widths: &[usize]) -> std::io::Result<()> {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    writeln!(out, "{}", line.join("  ").trim_end())
}
