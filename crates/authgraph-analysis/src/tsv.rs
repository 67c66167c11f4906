//! Flat tab-separated files: one logical row per line, no header, no
//! escaping.

use std::io::{BufRead, BufWriter, Write};

use authgraph_core::errors::GraphError;

/// Buffered TSV row writer.
pub struct TsvWriter<W: Write> {
    inner: BufWriter<W>,
    rows: usize,
}

impl<W: Write> TsvWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: BufWriter::new(inner),
            rows: 0,
        }
    }

    /// Write one row. Fields must not contain tabs or newlines.
    pub fn write_row<S: AsRef<str>>(&mut self, fields: &[S]) -> std::io::Result<()> {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.inner.write_all(b"\t")?;
            }
            self.inner.write_all(field.as_ref().as_bytes())?;
        }
        self.inner.write_all(b"\n")?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and return the underlying writer.
    pub fn finish(self) -> std::io::Result<W> {
        self.inner.into_inner().map_err(|e| e.into_error())
    }
}

/// Visit every non-empty line of `reader` as tab-separated fields.
///
/// `f` receives the 1-based line number and the fields. Trailing
/// whitespace is stripped before splitting.
pub fn for_each_row<R, F, E>(reader: R, mut f: F) -> Result<usize, E>
where
    R: BufRead,
    F: FnMut(usize, &[&str]) -> Result<(), E>,
    E: From<GraphError>,
{
    let mut rows = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(GraphError::from)?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        f(index + 1, &fields)?;
        rows += 1;
    }
    Ok(rows)
}

/// Split a row into exactly two fields.
pub fn pair<'a>(
    context: &'static str,
    line: usize,
    fields: &[&'a str],
) -> Result<(&'a str, &'a str), GraphError> {
    match fields {
        [a, b] if !a.is_empty() && !b.is_empty() => Ok((*a, *b)),
        _ => Err(GraphError::MalformedLine {
            context,
            line,
            expected: 2,
        }),
    }
}
