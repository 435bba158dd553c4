//! Writing retained records back out as JSONL.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::dataset::Record;
use crate::error::Error;

/// Writes each record's original line followed by `\n`. Returns the number
/// of lines written.
pub fn write_records<'a, W, I>(mut writer: W, records: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    let mut written = 0;
    for record in records {
        writer.write_all(record.line.as_bytes())?;
        writer.write_all(b"\n")?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Creates (or truncates) `path` and writes the records into it.
pub fn write_to_path<'a, I>(path: impl AsRef<Path>, records: I) -> Result<usize, Error>
where
    I: IntoIterator<Item = &'a Record>,
{
    let path = path.as_ref();
    let write_err = |source: io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    write_records(BufWriter::new(file), records).map_err(write_err)
}
