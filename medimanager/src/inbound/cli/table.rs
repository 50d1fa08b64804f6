//! Plain-text doctor table.

use std::io::{self, Write};

use crate::domain::{DoctorField, DoctorRecord};

const ID_HEADING: &str = "ID";
const EMPTY_MESSAGE: &str = "No doctors found";

fn heading(field: DoctorField) -> &'static str {
    match field {
        DoctorField::DoctorName => "Doctor Name",
        DoctorField::Contact => "Contact",
        DoctorField::Address => "Address",
        DoctorField::Timing => "Timing",
        DoctorField::AvailableDays => "Available Days",
    }
}

fn row(record: &DoctorRecord) -> Vec<&str> {
    std::iter::once(record.id().as_ref())
        .chain(
            DoctorField::ALL
                .iter()
                .map(|field| record.details().field(*field)),
        )
        .collect()
}

fn write_row<W: Write>(out: &mut W, cells: &[&str], widths: &[usize]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    writeln!(out, "{}", line.trim_end())
}

/// Write `doctors` as an aligned table, or a placeholder when empty.
pub(super) fn write_doctors<W: Write>(out: &mut W, doctors: &[DoctorRecord]) -> io::Result<()> {
    if doctors.is_empty() {
        return writeln!(out, "{EMPTY_MESSAGE}");
    }

    let headings: Vec<&str> = std::iter::once(ID_HEADING)
        .chain(DoctorField::ALL.iter().map(|field| heading(*field)))
        .collect();
    let rows: Vec<Vec<&str>> = doctors.iter().map(row).collect();

    let mut widths: Vec<usize> = headings.iter().map(|cell| cell.chars().count()).collect();
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, &headings, &widths)?;
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    writeln!(out, "{}", rule.join("-+-"))?;
    for cells in &rows {
        write_row(out, cells, &widths)?;
    }
    Ok(())
}
