// src/csv.rs
use std::io::{self, Write};

/// Write one unquoted row. Callers guarantee no field contains `sep` or a line
/// break; nothing is escaped here.
pub fn write_row<W: Write>(mut w: W, row: &[&str], sep: char, eol: &str) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        debug_assert!(!cell.contains(sep) && !cell.contains(['\n', '\r']), "unsafe cell {cell:?}");
        w.write_all(cell.as_bytes())?;
    }
    w.write_all(eol.as_bytes())
}
